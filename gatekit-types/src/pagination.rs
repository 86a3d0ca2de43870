//! Pagination envelope for list endpoints

use serde::{Deserialize, Serialize};

/// A paginated API response.
///
/// List endpoints wrap their items in `data` alongside paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,

    #[serde(default)]
    pub page: u32,

    #[serde(rename = "perPage", default)]
    pub per_page: u32,

    #[serde(default)]
    pub total: u32,

    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    /// Whether the server reported more items than this page contains.
    pub fn is_truncated(&self) -> bool {
        self.total as usize > self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_tolerates_missing_metadata() {
        let page: Paginated<String> = serde_json::from_str(r#"{"data": ["a", "b"]}"#).unwrap();
        assert_eq!(page.data, vec!["a", "b"]);
        assert_eq!(page.total, 0);
        assert!(!page.is_truncated());
    }

    #[test]
    fn truncation_reported_when_total_exceeds_page() {
        let page: Paginated<String> =
            serde_json::from_str(r#"{"data": ["a"], "total": 250, "perPage": 1}"#).unwrap();
        assert!(page.is_truncated());
    }
}
