//! Canned API payloads

use roster_client::FetchError;
use roster_model::SearchResults;
use serde_json::{json, Value};

pub fn company_json() -> Value {
    json!({
        "id": 1,
        "name": "Acme Corporation",
        "description": "A leading technology company specializing in innovative solutions.",
        "date_founded": "2010-05-15",
        "active": true,
        "country": {
            "id": 1,
            "iso_code": "GB",
            "name": "United Kingdom"
        },
        "employees": [
            {
                "id": 1,
                "name": "John Smith",
                "job_title": "Software Engineer",
                "email": "john.smith@acme.com",
                "phone_number": "+44 123 456 7890"
            },
            {
                "id": 2,
                "name": "Jane Doe",
                "job_title": "Product Manager",
                "email": "jane.doe@acme.com",
                "phone_number": "+44 123 456 7891"
            }
        ],
        "deals": [
            {
                "id": 1,
                "amount_raised": 1_000_000,
                "date_of_deal": "2023-01-15"
            },
            {
                "id": 2,
                "amount_raised": 2_500_000,
                "date_of_deal": "2023-06-20"
            }
        ]
    })
}

/// Company payload with one top-level key replaced
pub fn company_json_with(key: &str, value: Value) -> Value {
    let mut company = company_json();
    company[key] = value;
    company
}

pub fn employee_json() -> Value {
    json!({
        "id": 1,
        "name": "John Smith",
        "job_title": "Senior Software Engineer",
        "email": "john.smith@acme.com",
        "phone_number": "+44 123 456 7890",
        "gender": "M",
        "company": {
            "id": 1,
            "name": "Acme Corporation"
        }
    })
}

pub fn employee_without_phone_json() -> Value {
    json!({
        "id": 2,
        "name": "Jane Doe",
        "job_title": "Product Manager",
        "email": "jane.doe@acme.com",
        "phone_number": null,
        "gender": "F",
        "company": {
            "id": 1,
            "name": "Acme Corporation"
        }
    })
}

/// Employee payload with one top-level key replaced
pub fn employee_json_with(key: &str, value: Value) -> Value {
    let mut employee = employee_json();
    employee[key] = value;
    employee
}

pub fn search_results_json() -> Value {
    json!({
        "sections": [
            {
                "title": "Companies",
                "count": 1,
                "results": [
                    {
                        "title": "Acme Corporation",
                        "subtitle": "A leading technology company specializing in innovative solutions.",
                        "id": 1,
                        "url": "/companies/1"
                    }
                ]
            },
            {
                "title": "Employees",
                "count": 2,
                "results": [
                    {
                        "title": "John Smith",
                        "subtitle": "",
                        "id": 1,
                        "url": "/employees/1"
                    },
                    {
                        "title": "Jane Doe",
                        "subtitle": null,
                        "id": 2,
                        "url": "/employees/2"
                    }
                ]
            }
        ]
    })
}

pub fn search_results() -> SearchResults {
    serde_json::from_value(search_results_json()).unwrap()
}

pub fn network_error(path: &str) -> FetchError {
    FetchError::Transport {
        url: path.to_string(),
        message: "Network error".to_string(),
    }
}
