//! Detail view lifecycle and rendering
//!
//! Rendered pages are pinned by the golden files in `tests/snapshots/`.

use chrono::NaiveDate;
use proptest::prelude::*;
use roster_client::{FetchError, RecordSource};
use roster_model::{
    Company, CompanyRef, Country, Deal, Employee, EmployeeSummary, Gender, RecordId,
};
use roster_test_utils::{
    assert_snapshot, company_json, company_json_with, employee_json, employee_json_with,
    employee_without_phone_json, network_error, FailingSource, GatedSource, PendingSource,
    StaticSource,
};
use roster_view::{
    CompanyDescriptor, CompanyDetail, EmployeeDescriptor, EmployeeDetail, Phase,
    RecordDescriptor, Settlement,
};
use serde_json::{json, Value};
use std::sync::Arc;

const SNAPSHOTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/snapshots");

/// Let spawned reads make progress until `done` holds
async fn until(done: impl Fn() -> bool) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

async fn render_company(body: Value) -> String {
    let source = StaticSource::new().with_record("/companies/1/", body);
    let mut view = CompanyDetail::new(Arc::new(source));
    assert_eq!(
        view.mount(RecordId(1)).settled().await,
        Settlement::Committed(Phase::Loaded)
    );
    view.render().to_html()
}

async fn render_employee(body: Value) -> String {
    let source = StaticSource::new().with_record("/employees/1/", body);
    let mut view = EmployeeDetail::new(Arc::new(source));
    assert_eq!(
        view.mount(RecordId(1)).settled().await,
        Settlement::Committed(Phase::Loaded)
    );
    view.render().to_html()
}

#[tokio::test]
async fn company_renders_employees_and_deals() {
    assert_snapshot(SNAPSHOTS, "company_loaded", &render_company(company_json()).await);
}

#[tokio::test]
async fn company_without_employees_shows_placeholder() {
    let html = render_company(company_json_with("employees", json!([]))).await;
    assert_snapshot(SNAPSHOTS, "company_without_employees", &html);
}

#[tokio::test]
async fn company_without_deals_shows_placeholder() {
    let html = render_company(company_json_with("deals", json!([]))).await;
    assert_snapshot(SNAPSHOTS, "company_without_deals", &html);
}

#[tokio::test]
async fn null_lists_render_like_empty_ones() {
    let mut body = company_json_with("employees", json!(null));
    body["deals"] = json!(null);
    let html = render_company(body).await;
    assert!(html.contains("No employees listed."));
    assert!(html.contains("No deals recorded."));
}

#[tokio::test]
async fn inactive_company_is_labelled() {
    let html = render_company(company_json_with("active", json!(false))).await;
    assert_snapshot(SNAPSHOTS, "company_inactive", &html);
}

#[tokio::test]
async fn employee_renders_all_fields() {
    assert_snapshot(SNAPSHOTS, "employee_loaded", &render_employee(employee_json()).await);
}

#[tokio::test]
async fn employee_without_phone_omits_it() {
    let html = render_employee(employee_without_phone_json()).await;
    assert_snapshot(SNAPSHOTS, "employee_without_phone", &html);
}

#[tokio::test]
async fn employee_without_company_omits_section() {
    let html = render_employee(employee_json_with("company", json!(null))).await;
    assert_snapshot(SNAPSHOTS, "employee_without_company", &html);
}

#[tokio::test]
async fn pending_fetch_renders_loading_only() {
    let source = Arc::new(PendingSource::new());
    let mut company = CompanyDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);
    let mut employee = EmployeeDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);

    let _company_fetch = company.mount(RecordId(1));
    let _employee_fetch = employee.mount(RecordId(1));
    until(|| source.calls() == 2).await;

    assert_eq!(company.phase(), Phase::Loading);
    assert_snapshot(SNAPSHOTS, "company_loading", &company.render().to_html());
    assert_snapshot(SNAPSHOTS, "employee_loading", &employee.render().to_html());
}

#[tokio::test]
async fn every_failure_renders_the_same_error() {
    let failures = [
        network_error("/companies/1/"),
        FetchError::Timeout {
            url: "/companies/1/".to_string(),
        },
        FetchError::Status {
            url: "/companies/1/".to_string(),
            status: 404,
        },
        FetchError::Status {
            url: "/companies/1/".to_string(),
            status: 500,
        },
        FetchError::Decode {
            url: "/companies/1/".to_string(),
            message: "expected value".to_string(),
        },
    ];
    for failure in failures {
        let source = Arc::new(FailingSource::new(failure));
        let mut view = CompanyDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);
        assert_eq!(
            view.mount(RecordId(1)).settled().await,
            Settlement::Committed(Phase::Error)
        );
        assert_eq!(source.calls(), 1);
        assert_snapshot(SNAPSHOTS, "company_error", &view.render().to_html());
    }

    let source = Arc::new(FailingSource::new(network_error("/employees/1/")));
    let mut view = EmployeeDetail::new(source);
    view.mount(RecordId(1)).settled().await;
    assert_snapshot(SNAPSHOTS, "employee_error", &view.render().to_html());
}

#[tokio::test]
async fn malformed_record_renders_error() {
    let source = StaticSource::new().with_record("/companies/1/", json!({ "id": 1 }));
    let mut view = CompanyDetail::new(Arc::new(source));
    view.mount(RecordId(1)).settled().await;
    assert_snapshot(SNAPSHOTS, "company_error", &view.render().to_html());
}

#[tokio::test]
async fn one_request_per_mount_and_identical_remount() {
    let source = Arc::new(StaticSource::new().with_record("/companies/1/", company_json()));
    let mut view = CompanyDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);

    view.mount(RecordId(1)).settled().await;
    let first = view.render().to_html();
    assert!(view.set_id(RecordId(1)).is_none());
    assert_eq!(source.request_count("/companies/1/"), 1);

    view.unmount();
    view.mount(RecordId(1)).settled().await;
    assert_eq!(source.request_count("/companies/1/"), 2);
    assert_eq!(view.render().to_html(), first);
}

#[tokio::test]
async fn late_response_after_unmount_is_ignored() {
    let source = Arc::new(GatedSource::new());
    let mut view = CompanyDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);

    let fetch = view.mount(RecordId(1));
    source.wait_for("/companies/1/").await;
    view.unmount();
    assert!(source.release("/companies/1/", Ok(company_json())));

    assert_eq!(fetch.settled().await, Settlement::Discarded);
    assert!(!view.is_mounted());
    assert_eq!(view.phase(), Phase::Loading);
    assert!(view.render().is_empty());
}

#[tokio::test]
async fn identifier_change_discards_stale_response() {
    let source = Arc::new(GatedSource::new());
    let mut view = CompanyDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);

    let stale = view.mount(RecordId(1));
    source.wait_for("/companies/1/").await;
    let current = view.set_id(RecordId(2)).expect("new identifier starts a read");
    source.wait_for("/companies/2/").await;

    // The stale response arrives first and must not land.
    assert!(source.release("/companies/1/", Ok(company_json())));
    assert_eq!(stale.settled().await, Settlement::Discarded);
    assert_eq!(view.phase(), Phase::Loading);

    let mut globex = company_json_with("id", json!(2));
    globex["name"] = json!("Globex");
    assert!(source.release("/companies/2/", Ok(globex)));
    assert_eq!(current.settled().await, Settlement::Committed(Phase::Loaded));
    assert_eq!(view.id(), Some(RecordId(2)));
    assert!(view.render().to_html().contains("<h1>Globex</h1>"));
}

#[tokio::test]
async fn identifier_change_after_load_restarts_at_loading() {
    let source = Arc::new(GatedSource::new());
    let mut view = EmployeeDetail::new(Arc::clone(&source) as Arc<dyn RecordSource>);

    let first = view.mount(RecordId(1));
    source.wait_for("/employees/1/").await;
    assert!(source.release("/employees/1/", Ok(employee_json())));
    first.settled().await;
    assert_eq!(view.phase(), Phase::Loaded);

    let _second = view.set_id(RecordId(2)).expect("new identifier starts a read");
    assert_eq!(view.phase(), Phase::Loading);
    assert_snapshot(SNAPSHOTS, "employee_loading", &view.render().to_html());
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (1i32..1_000_000).prop_map(|days| {
        NaiveDate::from_num_days_from_ce_opt(days).unwrap_or(NaiveDate::MIN)
    })
}

fn employee_summary() -> impl Strategy<Value = EmployeeSummary> {
    (
        1u64..10_000,
        ".*",
        ".*",
        proptest::option::of(".*"),
        proptest::option::of(".{0,3}"),
    )
        .prop_map(|(id, name, job_title, phone_number, gender)| EmployeeSummary {
            id: RecordId(id),
            name,
            job_title,
            email: String::new(),
            phone_number,
            gender: gender.as_deref().map(Gender::from),
        })
}

fn company() -> impl Strategy<Value = Company> {
    (
        ".*",
        ".*",
        proptest::option::of(date()),
        any::<bool>(),
        proptest::collection::vec(employee_summary(), 0..4),
        proptest::collection::vec((date(), any::<f64>()), 0..4),
        proptest::option::of(("[A-Z]{2}", ".*")),
    )
        .prop_map(|(name, description, date_founded, active, employees, deals, country)| Company {
            id: RecordId(1),
            companies_house_id: None,
            name,
            description,
            date_founded,
            country: country.map(|(iso_code, name)| Country {
                id: RecordId(1),
                iso_code,
                name,
            }),
            active,
            created: None,
            modified: None,
            creator_username: None,
            employees,
            deals: deals
                .into_iter()
                .zip(1u64..)
                .map(|((date_of_deal, amount_raised), id)| Deal {
                    id: RecordId(id),
                    date_of_deal,
                    amount_raised,
                })
                .collect(),
        })
}

proptest! {
    #[test]
    fn any_company_renders(company in company()) {
        let markup = CompanyDescriptor::render(&company);
        let html = markup.to_html();
        let employees_heading = format!("Employees ({})", company.employees.len());
        let deals_heading = format!("Deals ({})", company.deals.len());
        prop_assert!(html.contains(&employees_heading));
        prop_assert!(html.contains(&deals_heading));
        let status_marker = if company.active { ">Active<" } else { ">Inactive<" };
        prop_assert!(html.contains(status_marker));
        let _ = markup.to_text();
    }

    #[test]
    fn any_employee_renders(
        name in ".*",
        gender in ".{0,3}",
        phone in proptest::option::of(".*"),
        company in proptest::option::of(1u64..100),
    ) {
        let employee = Employee {
            id: RecordId(1),
            name,
            job_title: String::new(),
            gender: Gender::from(gender.as_str()),
            email: String::new(),
            phone_number: phone,
            company: company.map(|id| CompanyRef { id: RecordId(id), name: "Acme".to_string() }),
        };
        let html = EmployeeDescriptor::render(&employee).to_html();
        prop_assert!(html.contains("<dt>Gender</dt>"));
        prop_assert_eq!(html.contains("<section class=\"company\">"), employee.company.is_some());
        prop_assert_eq!(html.contains("<dt>Phone</dt>"), employee.phone_number.is_some());
    }
}
