//! Search queries and normalized search results
//!
//! [`SearchQuery`] validates the same parameters the search endpoint
//! accepts, so bad input is caught before a request goes out.
//! [`SearchResults`] is the sectioned shape the endpoint responds with.

use crate::error::QueryError;
use crate::record::{blank_as_none, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result count requested when `size` is not given
pub const DEFAULT_SEARCH_SIZE: u32 = 10;

/// Which indices to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    All,
    Companies,
    Employees,
}

impl SearchType {
    /// Query-string value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Companies => "companies",
            Self::Employees => "employees",
        }
    }
}

impl FromStr for SearchType {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "companies" => Ok(Self::Companies),
            "employees" => Ok(Self::Employees),
            other => Err(QueryError::InvalidType(other.to_string())),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Query-string value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(QueryError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Sortable company fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    DateFounded,
    EmployeeCount,
    TotalDealsAmount,
    LastDealDate,
}

impl SortField {
    /// Query-string value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DateFounded => "date_founded",
            Self::EmployeeCount => "employee_count",
            Self::TotalDealsAmount => "total_deals_amount",
            Self::LastDealDate => "last_deal_date",
        }
    }
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "date_founded" => Ok(Self::DateFounded),
            "employee_count" => Ok(Self::EmployeeCount),
            "total_deals_amount" => Ok(Self::TotalDealsAmount),
            "last_deal_date" => Ok(Self::LastDealDate),
            other => Err(QueryError::InvalidSortField(other.to_string())),
        }
    }
}

/// Validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Free-text query; empty matches everything
    pub q: String,
    /// Indices to search; `[All]` when `All` was requested
    pub types: Vec<SearchType>,
    /// Maximum hits per index
    pub size: u32,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub deal_amount_min: Option<f64>,
    pub deal_amount_max: Option<f64>,
    /// Country ISO codes
    pub countries: Vec<String>,
    pub employee_count_min: Option<u32>,
    pub employee_count_max: Option<u32>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            types: vec![SearchType::All],
            size: DEFAULT_SEARCH_SIZE,
            date_from: None,
            date_to: None,
            deal_amount_min: None,
            deal_amount_max: None,
            countries: Vec::new(),
            employee_count_min: None,
            employee_count_max: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl SearchQuery {
    /// Query for the given text, all indices, default size
    #[inline]
    #[must_use]
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Restrict to the given type (repeatable)
    #[must_use]
    pub fn with_type(mut self, search_type: SearchType) -> Self {
        if self.types == [SearchType::All] {
            self.types.clear();
        }
        self.types.push(search_type);
        self.normalize_types();
        self
    }

    /// With result size
    #[inline]
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Add a country filter
    #[inline]
    #[must_use]
    pub fn with_country(mut self, iso_code: impl Into<String>) -> Self {
        self.countries.push(iso_code.into());
        self
    }

    /// With sort field and optional direction
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, field: SortField, order: Option<SortOrder>) -> Self {
        self.sort_by = Some(field);
        self.sort_order = order;
        self
    }

    /// Parse query-string pairs
    ///
    /// Unknown keys are ignored. Empty values for optional filters are
    /// treated as absent, matching how the search endpoint reads them.
    ///
    /// # Errors
    /// - `QueryError::InvalidType` for a `type` outside all/companies/employees
    /// - `QueryError::InvalidSortOrder` / `InvalidSortField` for bad sort keys
    /// - `QueryError::InvalidNumber` / `InvalidDate` for unparsable filters
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self {
            types: Vec::new(),
            ..Self::default()
        };

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "q" => query.q = value.to_string(),
                "type" => query.types.push(value.parse()?),
                "size" => query.size = parse_number("size", value)?.unwrap_or(DEFAULT_SEARCH_SIZE),
                "date_from" => query.date_from = parse_date("date_from", value)?,
                "date_to" => query.date_to = parse_date("date_to", value)?,
                "deal_amount_min" => query.deal_amount_min = parse_amount("deal_amount_min", value)?,
                "deal_amount_max" => query.deal_amount_max = parse_amount("deal_amount_max", value)?,
                "country" if !value.is_empty() => query.countries.push(value.to_string()),
                "employee_count_min" => {
                    query.employee_count_min = parse_number("employee_count_min", value)?;
                }
                "employee_count_max" => {
                    query.employee_count_max = parse_number("employee_count_max", value)?;
                }
                "sort_by" if !value.is_empty() => query.sort_by = Some(value.parse()?),
                "sort_order" if !value.is_empty() => query.sort_order = Some(value.parse()?),
                _ => {}
            }
        }

        if query.types.is_empty() {
            query.types.push(SearchType::All);
        }
        query.normalize_types();
        Ok(query)
    }

    /// Serialize to query-string pairs
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        for t in &self.types {
            pairs.push(("type", t.as_str().to_string()));
        }
        pairs.push(("size", self.size.to_string()));
        if let Some(d) = self.date_from {
            pairs.push(("date_from", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(d) = self.date_to {
            pairs.push(("date_to", d.format("%Y-%m-%d").to_string()));
        }
        if let Some(v) = self.deal_amount_min {
            pairs.push(("deal_amount_min", v.to_string()));
        }
        if let Some(v) = self.deal_amount_max {
            pairs.push(("deal_amount_max", v.to_string()));
        }
        for c in &self.countries {
            pairs.push(("country", c.clone()));
        }
        if let Some(v) = self.employee_count_min {
            pairs.push(("employee_count_min", v.to_string()));
        }
        if let Some(v) = self.employee_count_max {
            pairs.push(("employee_count_max", v.to_string()));
        }
        if let Some(s) = self.sort_by {
            pairs.push(("sort_by", s.as_str().to_string()));
        }
        if let Some(o) = self.sort_order {
            pairs.push(("sort_order", o.as_str().to_string()));
        }
        pairs
    }

    /// Concrete indices this query hits (`All` expands to both)
    #[must_use]
    pub fn effective_types(&self) -> Vec<SearchType> {
        if self.types.contains(&SearchType::All) {
            vec![SearchType::Companies, SearchType::Employees]
        } else {
            self.types.clone()
        }
    }

    fn normalize_types(&mut self) {
        if self.types.contains(&SearchType::All) {
            self.types = vec![SearchType::All];
            return;
        }
        let mut seen = Vec::with_capacity(self.types.len());
        self.types.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<Option<u32>, QueryError> {
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| QueryError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_amount(field: &'static str, value: &str) -> Result<Option<f64>, QueryError> {
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(QueryError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<Option<NaiveDate>, QueryError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| QueryError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Normalized search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub sections: Vec<SearchSection>,
}

impl SearchResults {
    /// True when no section holds any hit
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.results.is_empty())
    }
}

/// One result section ("Companies", "Employees")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSection {
    pub title: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Client route of the hit, e.g. `/companies/1`
    #[serde(default)]
    pub url: String,
}
