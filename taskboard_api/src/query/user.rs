use url::form_urlencoded::Serializer;

use super::{
    common::{join, QueryCommon},
    Query,
};

/// Query for `GET /users`.
#[derive(Clone, Debug, Default)]
pub struct UserQuery {
    pub common: QueryCommon,
    /// Case-insensitive partial match on the user's name.
    pub name: Option<String>,
}

impl Query for UserQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_path(&self, path: &str) -> String {
        let mut pairs = Serializer::new(String::new());
        if let Some(name) = &self.name {
            pairs.append_pair("name", name.as_str());
        };
        self.common.append_pairs(&mut pairs);
        join(path, pairs)
    }
}

impl UserQuery {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}
