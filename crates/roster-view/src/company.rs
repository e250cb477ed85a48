//! Company detail layout

use crate::descriptor::RecordDescriptor;
use crate::format::{format_amount, format_date, UNKNOWN};
use crate::markup::{Element, Markup};
use crate::route::Route;
use roster_model::{ActiveStatus, Company, Deal, EmployeeSummary, RecordKind};

/// Company detail page (`/companies/:id`)
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyDescriptor;

impl RecordDescriptor for CompanyDescriptor {
    type Record = Company;

    fn render(company: &Company) -> Markup {
        let mut page = Element::new("div")
            .class("company-detail")
            .child(header(company));
        if !company.description.trim().is_empty() {
            page = page.child(
                Element::new("p")
                    .class("description")
                    .text(&company.description),
            );
        }
        page.child(facts(company))
            .child(employees(&company.employees))
            .child(deals(&company.deals))
            .into()
    }
}

fn header(company: &Company) -> Element {
    let status = company.status();
    let class = match status {
        ActiveStatus::Active => "status status-active",
        ActiveStatus::Inactive => "status status-inactive",
    };
    Element::new("header")
        .child(Element::new("h1").text(&company.name))
        .child(Element::new("span").class(class).text(status.label()))
}

fn facts(company: &Company) -> Element {
    let founded = match company.date_founded {
        Some(date) => Element::new("dd").text(format_date(date)),
        None => Element::new("dd").class("placeholder").text(UNKNOWN),
    };
    let mut facts = Element::new("dl")
        .class("company-facts")
        .child(Element::new("dt").text("Founded"))
        .child(founded);

    if let Some(country) = &company.country {
        facts = facts
            .child(Element::new("dt").text("Country"))
            .child(Element::new("dd").text(format!("{} ({})", country.name, country.iso_code)));
    }
    if let Some(number) = &company.companies_house_id {
        facts = facts
            .child(Element::new("dt").text("Companies House"))
            .child(Element::new("dd").text(number));
    }
    facts
}

fn employees(employees: &[EmployeeSummary]) -> Element {
    let section = Element::new("section")
        .class("employees")
        .child(Element::new("h2").text(format!("Employees ({})", employees.len())));
    if employees.is_empty() {
        return section.child(Element::new("p").class("empty").text("No employees listed."));
    }
    section.child(Element::new("ul").children(employees.iter().map(employee_item)))
}

fn employee_item(employee: &EmployeeSummary) -> Element {
    let href = Route::for_record(RecordKind::Employee, employee.id)
        .href()
        .unwrap_or_default();
    let mut item = Element::new("li").child(Element::new("a").attr("href", href).text(&employee.name));
    if !employee.job_title.trim().is_empty() {
        item = item.child(Element::new("span").class("job-title").text(&employee.job_title));
    }
    if !employee.email.trim().is_empty() {
        item = item.child(Element::new("span").class("email").text(&employee.email));
    }
    if let Some(phone) = &employee.phone_number {
        item = item.child(Element::new("span").class("phone").text(phone));
    }
    item
}

fn deals(deals: &[Deal]) -> Element {
    let section = Element::new("section")
        .class("deals")
        .child(Element::new("h2").text(format!("Deals ({})", deals.len())));
    if deals.is_empty() {
        return section.child(Element::new("p").class("empty").text("No deals recorded."));
    }
    section.child(Element::new("ul").children(deals.iter().map(|deal| {
        Element::new("li")
            .child(
                Element::new("span")
                    .class("deal-date")
                    .text(format_date(deal.date_of_deal)),
            )
            .child(
                Element::new("span")
                    .class("deal-amount")
                    .text(format_amount(deal.amount_raised)),
            )
    })))
}
