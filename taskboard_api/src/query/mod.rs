mod common;
pub use self::common::{Query, QueryCommon};

mod user;
pub use self::user::UserQuery;

mod task;
pub use self::task::TaskQuery;
