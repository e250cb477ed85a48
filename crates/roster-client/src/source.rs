//! The read boundary views fetch through
//!
//! [`RecordSource`] is the single seam between views and the network: one
//! GET per call, no writes. Tests substitute `MockRecordSource` or the stub
//! sources from `roster-test-utils`.

use crate::error::FetchError;
use async_trait::async_trait;
use roster_model::{decode, Record, RecordId, RecordKind, SearchQuery, SearchResults};

/// Path of the search endpoint, relative to the API root
pub const SEARCH_PATH: &str = "/search/";

/// Read-only access to the directory API
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// GET `path` (relative to the API root) and return the JSON body
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value, FetchError>;

    /// GET the search endpoint with `query`
    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, FetchError>;
}

/// API path of one record, e.g. `/companies/1/`
#[inline]
#[must_use]
pub fn record_path(kind: RecordKind, id: RecordId) -> String {
    format!("/{}/{}/", kind.collection(), id)
}

/// Fetch and decode one record
///
/// # Errors
/// - whatever the source returns for the read
/// - `FetchError::Decode` if the body does not match `R`
pub async fn fetch_record<R: Record>(
    source: &dyn RecordSource,
    id: RecordId,
) -> Result<R, FetchError> {
    let path = record_path(R::KIND, id);
    let value = source.fetch_json(&path).await?;
    decode::<R>(value).map_err(|e| FetchError::Decode {
        url: path,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::Employee;
    use serde_json::json;

    #[test]
    fn record_paths() {
        assert_eq!(record_path(RecordKind::Company, RecordId(1)), "/companies/1/");
        assert_eq!(record_path(RecordKind::Employee, RecordId(42)), "/employees/42/");
    }

    #[tokio::test]
    async fn fetch_record_requests_record_path_once() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_json()
            .withf(|path| path == "/employees/2/")
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "id": 2, "name": "Jane Doe", "job_title": "Product Manager",
                    "email": "jane.doe@acme.com", "phone_number": null,
                    "gender": "F", "company": null
                }))
            });

        let employee: Employee = fetch_record(&source, RecordId(2)).await.unwrap();
        assert_eq!(employee.name, "Jane Doe");
    }

    #[tokio::test]
    async fn fetch_record_maps_shape_mismatch_to_decode() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_json()
            .returning(|_| Ok(json!(["not", "an", "object"])));

        let err = fetch_record::<Employee>(&source, RecordId(2)).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { ref url, .. } if url == "/employees/2/"));
    }

    #[tokio::test]
    async fn fetch_record_passes_source_errors_through() {
        let mut source = MockRecordSource::new();
        source.expect_fetch_json().returning(|path| {
            Err(FetchError::Status {
                url: path.to_string(),
                status: 500,
            })
        });

        let err = fetch_record::<Employee>(&source, RecordId(9)).await.unwrap_err();
        assert_eq!(err.cause(), "status");
    }
}
