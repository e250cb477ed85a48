//! Client route table
//!
//! Maps a location (`/companies/1`, `/?q=acme`) to the view that owns it.
//! Identifiers are path segments; anything that is not a positive integer
//! resolves to [`Route::NotFound`] rather than reaching a view.

use roster_client::Url;
use roster_model::{RecordId, RecordKind};

/// Origin used only to parse relative locations
const LOCAL_ORIGIN: &str = "http://roster.local";

/// View a pattern leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    Search,
    CompanyDetail,
    EmployeeDetail,
}

/// A path pattern; `:name` segments capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePattern {
    pub pattern: &'static str,
    pub target: ViewTarget,
}

/// Patterns the viewer serves
pub const ROUTES: &[RoutePattern] = &[
    RoutePattern {
        pattern: "/",
        target: ViewTarget::Search,
    },
    RoutePattern {
        pattern: "/companies/:id",
        target: ViewTarget::CompanyDetail,
    },
    RoutePattern {
        pattern: "/employees/:id",
        target: ViewTarget::EmployeeDetail,
    },
];

/// Resolved route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Search,
    CompanyDetail { id: RecordId },
    EmployeeDetail { id: RecordId },
    NotFound,
}

impl Route {
    /// Detail route for a record
    #[must_use]
    pub fn for_record(kind: RecordKind, id: RecordId) -> Self {
        match kind {
            RecordKind::Company => Self::CompanyDetail { id },
            RecordKind::Employee => Self::EmployeeDetail { id },
        }
    }

    /// Canonical path; `None` for [`Route::NotFound`]
    #[must_use]
    pub fn href(&self) -> Option<String> {
        match self {
            Self::Search => Some("/".to_string()),
            Self::CompanyDetail { id } => Some(format!("/companies/{id}")),
            Self::EmployeeDetail { id } => Some(format!("/employees/{id}")),
            Self::NotFound => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_detail(&self) -> bool {
        matches!(self, Self::CompanyDetail { .. } | Self::EmployeeDetail { .. })
    }
}

/// A parsed location: normalized path plus decoded query pairs in order
///
/// The path keeps its percent-encoding, so `/companies/%31` is not `/companies/1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parse `/path?k=v`; a missing leading slash is tolerated
    ///
    /// Returns `None` when the location cannot be parsed as a URL path.
    #[must_use]
    pub fn parse(location: &str) -> Option<Self> {
        let location = location.trim();
        let relative = if location.starts_with('/') {
            location.to_string()
        } else {
            format!("/{location}")
        };
        let url = Url::parse(&format!("{LOCAL_ORIGIN}{relative}")).ok()?;
        Some(Self {
            path: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        })
    }
}

/// Ordered pattern list; first match wins
#[derive(Debug, Clone)]
pub struct RouteTable {
    patterns: Vec<RoutePattern>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            patterns: ROUTES.to_vec(),
        }
    }
}

impl RouteTable {
    #[must_use]
    pub fn new(patterns: Vec<RoutePattern>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    /// Resolve a path (no query); trailing slashes are ignored
    #[must_use]
    pub fn resolve(&self, path: &str) -> Route {
        let segments = split(path);
        for pattern in &self.patterns {
            let Some(id) = match_pattern(pattern.pattern, &segments) else {
                continue;
            };
            return match pattern.target {
                ViewTarget::Search => Route::Search,
                ViewTarget::CompanyDetail => id
                    .and_then(|raw| raw.parse().ok())
                    .map_or(Route::NotFound, |id| Route::CompanyDetail { id }),
                ViewTarget::EmployeeDetail => id
                    .and_then(|raw| raw.parse().ok())
                    .map_or(Route::NotFound, |id| Route::EmployeeDetail { id }),
            };
        }
        Route::NotFound
    }

    /// Resolve a full location, ignoring its query
    #[must_use]
    pub fn resolve_location(&self, location: &str) -> Route {
        Location::parse(location).map_or(Route::NotFound, |loc| self.resolve(&loc.path))
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// `Some(capture)` when `segments` match; the capture is the `:id` segment
fn match_pattern<'a>(pattern: &str, segments: &[&'a str]) -> Option<Option<&'a str>> {
    let parts = split(pattern);
    if parts.len() != segments.len() {
        return None;
    }
    let mut capture = None;
    for (part, segment) in parts.iter().zip(segments) {
        if part.starts_with(':') {
            capture = Some(*segment);
        } else if part != segment {
            return None;
        }
    }
    Some(capture)
}
