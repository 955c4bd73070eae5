use serde::{Deserialize, Serialize};

/// One page of results, as returned by the list endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    /// Current page number (0-indexed).
    pub number: i64,
    pub size: i64,
}

impl<T> Page<T> {
    /// True when this is the last page, or there are no results at all.
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }
}
