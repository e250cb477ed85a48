//! Company and employee records
//!
//! Shapes follow the directory API's JSON payloads. Records are decoded once
//! per fetch and never mutated afterwards.

use crate::error::RecordError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record identifier (positive integer primary key)
///
/// Zero is rejected both when parsed from a path segment and when decoded
/// from a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u64::deserialize(deserializer)? {
            0 => Err(serde::de::Error::custom(RecordError::InvalidId("0".to_string()))),
            raw => Ok(Self(raw)),
        }
    }
}

impl RecordId {
    /// Wrap a raw key
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw key value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordError;

    /// Only plain ASCII digits are accepted, and zero is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecordError::InvalidId(s.to_string()));
        }
        match s.parse::<u64>() {
            Ok(0) | Err(_) => Err(RecordError::InvalidId(s.to_string())),
            Ok(raw) => Ok(Self(raw)),
        }
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Record type addressed by the read endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Company,
    Employee,
}

impl RecordKind {
    /// API collection segment (`companies`, `employees`)
    #[inline]
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Employee => "employees",
        }
    }

    /// Lowercase noun used in user-facing text
    #[inline]
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Gender code with a fixed display label
///
/// Codes outside `M`/`F`/`O` are kept verbatim in `Unknown` so they survive
/// a decode/encode cycle; they display as "Not specified".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unknown(String),
}

impl Gender {
    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::Unknown(_) => "Not specified",
        }
    }

    /// Wire code
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
            Self::Unknown(code) => code,
        }
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<&str> for Gender {
    fn from(code: &str) -> Self {
        match code.trim() {
            c if c.eq_ignore_ascii_case("m") => Self::Male,
            c if c.eq_ignore_ascii_case("f") => Self::Female,
            c if c.eq_ignore_ascii_case("o") => Self::Other,
            _ => Self::Unknown(code.to_string()),
        }
    }
}

impl From<Option<String>> for Gender {
    fn from(code: Option<String>) -> Self {
        code.as_deref().map(Self::from).unwrap_or_default()
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.code().to_string()
    }
}

/// Active/inactive company status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl ActiveStatus {
    /// Display label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl From<bool> for ActiveStatus {
    fn from(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// Country a company is registered in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: RecordId,
    pub iso_code: String,
    pub name: String,
}

/// Employee entry nested in a company payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

/// Funding round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: RecordId,
    pub date_of_deal: NaiveDate,
    pub amount_raised: f64,
}

/// Company record returned by `GET /companies/:id/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub companies_house_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date_founded: Option<NaiveDate>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub creator_username: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub employees: Vec<EmployeeSummary>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deals: Vec<Deal>,
}

impl Company {
    /// Active/inactive status
    #[inline]
    #[must_use]
    pub fn status(&self) -> ActiveStatus {
        ActiveStatus::from(self.active)
    }

    /// Sum of all deal amounts
    #[must_use]
    pub fn total_raised(&self) -> f64 {
        self.deals.iter().map(|d| d.amount_raised).sum()
    }
}

/// Company reference nested in an employee payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub id: RecordId,
    pub name: String,
}

/// Employee record returned by `GET /employees/:id/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
}

/// A record type the viewer can fetch by identifier
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    /// Endpoint collection this record lives in
    const KIND: RecordKind;

    /// Record identifier
    fn id(&self) -> RecordId;

    /// Name shown in headings
    fn name(&self) -> &str;
}

impl Record for Company {
    const KIND: RecordKind = RecordKind::Company;

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Employee {
    const KIND: RecordKind = RecordKind::Employee;

    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Decode a JSON payload into a record
///
/// # Errors
/// - `RecordError::Malformed` if the payload does not match the record shape
pub fn decode<R: Record>(value: serde_json::Value) -> Result<R, RecordError> {
    serde_json::from_value(value).map_err(|source| RecordError::Malformed {
        kind: R::KIND,
        source,
    })
}

fn default_active() -> bool {
    true
}

/// Null, missing and whitespace-only strings all decode as `None`.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn acme() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Acme Corporation",
            "description": "A leading technology company.",
            "date_founded": "2010-05-15",
            "active": true,
            "country": { "id": 1, "iso_code": "GB", "name": "United Kingdom" },
            "employees": [
                { "id": 1, "name": "John Smith", "job_title": "Software Engineer",
                  "email": "john.smith@acme.com", "phone_number": "+44 123 456 7890" }
            ],
            "deals": [
                { "id": 1, "amount_raised": 1000000, "date_of_deal": "2023-01-15" },
                { "id": 2, "amount_raised": 2500000.5, "date_of_deal": "2023-06-20" }
            ]
        })
    }

    #[test]
    fn company_decodes_nested_lists() {
        let company: Company = decode(acme()).unwrap();
        assert_eq!(company.id, RecordId(1));
        assert_eq!(company.employees.len(), 1);
        assert_eq!(company.deals.len(), 2);
        assert_eq!(company.date_founded, NaiveDate::from_ymd_opt(2010, 5, 15));
        assert_eq!(company.country.as_ref().map(|c| c.iso_code.as_str()), Some("GB"));
        assert_eq!(company.total_raised(), 3_500_000.5);
        assert_eq!(company.status(), ActiveStatus::Active);
    }

    #[test]
    fn company_tolerates_missing_optionals() {
        let company: Company = decode(json!({
            "id": 7,
            "name": "Bare Ltd",
            "companies_house_id": "  ",
            "employees": null
        }))
        .unwrap();
        assert!(company.employees.is_empty());
        assert!(company.deals.is_empty());
        assert!(company.country.is_none());
        assert!(company.companies_house_id.is_none());
        assert!(company.active, "active defaults to true");
        assert_eq!(company.description, "");
    }

    #[test]
    fn employee_blank_phone_is_absent() {
        let employee: Employee = decode(json!({
            "id": 3, "name": "A", "job_title": "B", "email": "a@b.c",
            "phone_number": "", "gender": "O", "company": null
        }))
        .unwrap();
        assert_eq!(employee.phone_number, None);
        assert_eq!(employee.gender, Gender::Other);
        assert!(employee.company.is_none());
    }

    #[test]
    fn employee_null_gender_is_unknown() {
        let employee: Employee = decode(json!({
            "id": 3, "name": "A", "gender": null
        }))
        .unwrap();
        assert_eq!(employee.gender.label(), "Not specified");
    }

    #[test]
    fn malformed_payload_is_reported_with_kind() {
        let err = decode::<Employee>(json!({ "id": "three" })).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Malformed {
                kind: RecordKind::Employee,
                ..
            }
        ));
    }

    #[test]
    fn record_id_parsing() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId(42));
        assert!("0".parse::<RecordId>().is_err());
        assert!("+1".parse::<RecordId>().is_err());
        assert!("abc".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());
    }

    #[test]
    fn record_id_decoding_rejects_zero_like_parsing() {
        assert_eq!(serde_json::from_value::<RecordId>(json!(7)).unwrap(), RecordId(7));
        let err = serde_json::from_value::<RecordId>(json!(0)).unwrap_err();
        assert!(err.to_string().contains("invalid record id"), "{err}");
        assert!(serde_json::from_value::<RecordId>(json!(-1)).is_err());
        let mut payload = acme();
        assert!(decode::<Company>(payload.clone()).is_ok());
        payload["id"] = json!(0);
        assert!(decode::<Company>(payload).is_err());
    }

    #[test]
    fn gender_codes_map_to_labels() {
        assert_eq!(Gender::from("M").label(), "Male");
        assert_eq!(Gender::from("f").label(), "Female");
        assert_eq!(Gender::from("O").label(), "Other");
        let unknown = Gender::from("X");
        assert_eq!(unknown.label(), "Not specified");
        assert_eq!(String::from(unknown), "X");
    }

    #[test]
    fn active_status_labels() {
        assert_eq!(ActiveStatus::from(true).label(), "Active");
        assert_eq!(ActiveStatus::from(false).label(), "Inactive");
    }

    proptest! {
        #[test]
        fn gender_label_is_always_fixed(code in ".{0,8}") {
            let label = Gender::from(code.as_str()).label();
            prop_assert!(["Male", "Female", "Other", "Not specified"].contains(&label));
        }
    }
}
