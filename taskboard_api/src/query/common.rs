//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] paging fields.

use url::form_urlencoded::Serializer;

/// Trait implemented by all query builders. Provides query-string
/// serialization and shared builder methods for pagination.
pub trait Query {
    /// Appends this query's parameters to an endpoint path, returning the
    /// path with its query string.
    fn add_to_path(&self, path: &str) -> String;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page number (0-indexed).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = page;
        self
    }

    /// Sets the number of results per page.
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }
}

/// Fields shared by all query types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    /// Page number (0-indexed). Defaults to 0.
    pub page: i64,
    /// Results per page. `None` uses the API default of 10.
    pub page_size: Option<i64>,
}

impl QueryCommon {
    /// Appends the pagination parameters.
    pub fn append_pairs(&self, pairs: &mut Serializer<'_, String>) {
        pairs.append_pair("page", &self.page.to_string());
        if let Some(page_size) = self.page_size {
            pairs.append_pair("size", &page_size.to_string());
        }
    }
}

/// Joins a path and an encoded query string.
pub(crate) fn join(path: &str, mut pairs: Serializer<'_, String>) -> String {
    let query = pairs.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
