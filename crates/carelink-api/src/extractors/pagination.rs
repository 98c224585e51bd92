//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use carelink_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 20, max: 100).
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Restrict notification listings to unread rows.
    #[serde(default)]
    pub unread_only: bool,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

impl PaginationParams {
    /// Converts to a `PageRequest`, clamping out-of-range values.
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 20);
        assert!(!params.unread_only);
    }

    #[test]
    fn camel_case_unread_only() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page": 2, "limit": 10, "unreadOnly": true}"#).unwrap();
        assert_eq!(params.page, 2);
        assert!(params.unread_only);
    }

    #[test]
    fn clamps_through_page_request() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page": 0, "limit": 10000}"#).unwrap();
        let page = params.to_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }
}
