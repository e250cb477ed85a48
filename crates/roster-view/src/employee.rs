//! Employee detail layout

use crate::descriptor::RecordDescriptor;
use crate::markup::{Element, Markup};
use crate::route::Route;
use roster_model::{Employee, RecordKind};

/// Employee detail page (`/employees/:id`)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeDescriptor;

impl RecordDescriptor for EmployeeDescriptor {
    type Record = Employee;

    fn render(employee: &Employee) -> Markup {
        let mut header = Element::new("header").child(Element::new("h1").text(&employee.name));
        if !employee.job_title.trim().is_empty() {
            header = header.child(
                Element::new("span")
                    .class("job-title")
                    .text(&employee.job_title),
            );
        }

        let mut facts = Element::new("dl").class("employee-facts");
        if !employee.email.trim().is_empty() {
            facts = facts
                .child(Element::new("dt").text("Email"))
                .child(Element::new("dd").text(&employee.email));
        }
        if let Some(phone) = &employee.phone_number {
            facts = facts
                .child(Element::new("dt").text("Phone"))
                .child(Element::new("dd").text(phone));
        }
        facts = facts
            .child(Element::new("dt").text("Gender"))
            .child(Element::new("dd").text(employee.gender.label()));

        let mut page = Element::new("div")
            .class("employee-detail")
            .child(header)
            .child(facts);
        if let Some(company) = &employee.company {
            let href = Route::for_record(RecordKind::Company, company.id)
                .href()
                .unwrap_or_default();
            page = page.child(
                Element::new("section")
                    .class("company")
                    .child(Element::new("h2").text("Company"))
                    .child(Element::new("a").attr("href", href).text(&company.name)),
            );
        }
        page.into()
    }
}
