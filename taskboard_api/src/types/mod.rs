mod page;
pub use self::page::Page;

mod user;
pub use self::user::{CreateUser, User, UserID};

mod task;
pub use self::task::{CreateTask, Task, TaskID, TaskPriority, TaskStatus};
