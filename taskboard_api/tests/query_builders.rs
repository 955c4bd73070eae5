use taskboard_api::types::TaskStatus;
use taskboard_api::{Query, TaskQuery, UserQuery};

#[test]
fn user_query_defaults() {
    let path = UserQuery::default().add_to_path("/users");
    assert_eq!(path, "/users?page=0");
}

#[test]
fn user_query_encodes_name() {
    let path = UserQuery::default()
        .with_name("o'brien & co")
        .add_to_path("/users");
    assert!(path.starts_with("/users?name="));
    assert!(path.contains("name=o%27brien+%26+co"));
}

#[test]
fn user_query_paging() {
    let path = UserQuery::default()
        .with_page(3)
        .with_page_size(50)
        .add_to_path("/users");
    assert!(path.contains("page=3"));
    assert!(path.contains("size=50"));
}

#[test]
fn task_query_status_filter() {
    for (status, expected) in [
        (TaskStatus::Todo, "status=TODO"),
        (TaskStatus::InProgress, "status=IN_PROGRESS"),
        (TaskStatus::Done, "status=DONE"),
    ] {
        let path = TaskQuery::default().with_status(status).add_to_path("/tasks");
        assert!(path.contains(expected), "{path}");
    }
}

#[test]
fn task_query_without_size_leaves_server_default() {
    let path = TaskQuery::default().with_page(1).add_to_path("/tasks");
    assert_eq!(path, "/tasks?page=1");
}
