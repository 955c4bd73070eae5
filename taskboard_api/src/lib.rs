mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_BASE_URL};
pub use self::errors::{ApiError, Error, VALIDATION_FAILED};
pub use self::query::{Query, QueryCommon, TaskQuery, UserQuery};
