use url::form_urlencoded::Serializer;

use crate::types::TaskStatus;

use super::{
    common::{join, QueryCommon},
    Query,
};

/// Query for `GET /tasks`.
#[derive(Clone, Debug, Default)]
pub struct TaskQuery {
    pub common: QueryCommon,
    /// Only return tasks in this status.
    pub status: Option<TaskStatus>,
}

impl Query for TaskQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_path(&self, path: &str) -> String {
        let mut pairs = Serializer::new(String::new());
        if let Some(status) = self.status {
            pairs.append_pair("status", &status.to_string());
        };
        self.common.append_pairs(&mut pairs);
        join(path, pairs)
    }
}

impl TaskQuery {
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}
