use serde::{Deserialize, Serialize};

/// Error body the API sends with non-success statuses, e.g.
/// `{"detail": "product not found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

impl ApiErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Extracts `detail` from a raw response body, if the body has that shape.
    pub fn detail_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .map(|parsed| parsed.detail)
            .filter(|detail| !detail.trim().is_empty())
    }
}
