use anyhow::Result;
use serde::Serialize;
use taskboard_api::types::{Page, Task, User};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct UserRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    #[serde(rename = "Email")]
    email: String,
    #[tabled(rename = "Created")]
    #[serde(rename = "Created")]
    created: String,
}

#[derive(Tabled, Serialize)]
struct TaskRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    #[serde(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    #[serde(rename = "Due")]
    due: String,
    #[tabled(rename = "Assignee")]
    #[serde(rename = "Assignee")]
    assignee: String,
}

// -- Row builders --

fn build_user_rows(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            created: u
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn build_task_rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks
        .iter()
        .map(|t| TaskRow {
            id: t.id,
            title: t.title.clone(),
            status: t.status.to_string(),
            priority: t.priority.to_string(),
            due: t.due_date.to_string(),
            assignee: t
                .assigned_user
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn render<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

// -- Users --

pub fn print_users(users: &[User], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&users);
            Ok(())
        }
        _ => render(build_user_rows(users), format),
    }
}

// -- Tasks --

pub fn print_tasks(tasks: &[Task], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&tasks);
            Ok(())
        }
        _ => render(build_task_rows(tasks), format),
    }
}

/// Paging summary, written to stderr so it never mixes with row output.
pub fn print_page_summary<T>(page: &Page<T>, noun: &str) {
    eprintln!("{}", page_summary(page, noun));
}

fn page_summary<T>(page: &Page<T>, noun: &str) -> String {
    let mut out = format!(
        "Page {}/{} ({} total {})",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements,
        noun
    );
    if !page.is_last() {
        // --page is 0-based, so the next page is `number + 1`
        out.push_str(&format!(", next: --page {}", page.number + 1));
    }
    out
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Errors --

pub fn print_error(err: &anyhow::Error) {
    let rendered = err
        .downcast_ref::<taskboard_api::Error>()
        .and_then(format_api_error);
    match rendered {
        Some(text) => eprintln!("{}", text),
        None => eprintln!("Error: {:#}", err),
    }
}

/// Renders an HTTP failure with one line per validation entry. Other errors
/// yield `None`.
fn format_api_error(err: &taskboard_api::Error) -> Option<String> {
    let status = err.status()?;
    let api = err.api_error()?;
    let mut out = format!("Error ({}): {}", status, api.message);
    if api.is_validation() {
        for (field, detail) in api.field_errors() {
            if field.is_empty() {
                out.push_str(&format!("\n  {}", detail));
            } else {
                out.push_str(&format!("\n  {}: {}", field, detail));
            }
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_api::ApiError;

    fn load_users_fixture() -> Vec<User> {
        let json_str = include_str!("../../taskboard_api/tests/fixtures/users.json");
        let page: Page<User> = serde_json::from_str(json_str).unwrap();
        page.content
    }

    fn load_tasks_fixture() -> Page<Task> {
        let json_str = include_str!("../../taskboard_api/tests/fixtures/tasks.json");
        serde_json::from_str(json_str).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::parse("xml"), OutputFormat::Table);
    }

    #[test]
    fn test_build_user_rows_mapping() {
        let rows = build_user_rows(&load_users_fixture());
        assert_eq!(rows.len(), 2);

        let row = &rows[0];
        assert_eq!(row.id, 2);
        assert_eq!(row.name, "Bo Chen");
        assert_eq!(row.email, "bo@example.com");
        assert_eq!(row.created, "2024-03-02 09:15");
    }

    #[test]
    fn test_build_task_rows_mapping() {
        let rows = build_task_rows(&load_tasks_fixture().content);

        let row = &rows[0];
        assert_eq!(row.title, "Write report");
        assert_eq!(row.status, "IN_PROGRESS");
        assert_eq!(row.priority, "HIGH");
        assert_eq!(row.due, "2024-12-31");
        assert_eq!(row.assignee, "Ann Lee");

        // unassigned task
        assert_eq!(rows[1].assignee, "");
    }

    #[test]
    fn test_build_rows_empty() {
        assert!(build_user_rows(&[]).is_empty());
        assert!(build_task_rows(&[]).is_empty());
    }

    #[test]
    fn test_page_summary() {
        let page = load_tasks_fixture();
        assert_eq!(
            page_summary(&page, "tasks"),
            "Page 1/6 (12 total tasks), next: --page 1"
        );

        let empty: Page<User> = Page {
            content: vec![],
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 10,
        };
        assert_eq!(page_summary(&empty, "users"), "Page 1/1 (0 total users)");
    }

    fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        wtr.flush().unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_csv_headers() {
        let csv = csv_from_rows(&build_user_rows(&load_users_fixture()));
        assert_eq!(csv.lines().next().unwrap(), "ID,Name,Email,Created");

        let csv = csv_from_rows(&build_task_rows(&load_tasks_fixture().content));
        assert_eq!(
            csv.lines().next().unwrap(),
            "ID,Title,Status,Priority,Due,Assignee"
        );
    }

    #[test]
    fn test_markdown_task_headers() {
        let mut table = Table::new(build_task_rows(&load_tasks_fixture().content));
        table.with(Style::markdown());
        let md = table.to_string();

        let header_line = md.lines().next().unwrap();
        assert!(header_line.contains("Title"));
        assert!(header_line.contains("Status"));
        assert!(md.contains("---"));
    }

    #[test]
    fn test_page_summary_last_page() {
        let page = Page {
            content: load_users_fixture(),
            total_elements: 2,
            total_pages: 1,
            number: 0,
            size: 10,
        };
        assert_eq!(page_summary(&page, "users"), "Page 1/1 (2 total users)");
    }

    #[test]
    fn test_format_api_error_with_fields() {
        let err = taskboard_api::Error::Http(ApiError::from_parts(
            422,
            "Unprocessable Entity",
            r#"{"errors":{"name":["required"]},"message":"Validation failed"}"#,
        ));
        assert_eq!(
            format_api_error(&err).unwrap(),
            "Error (422): Validation failed\n  name: required"
        );
    }

    #[test]
    fn test_format_api_error_plain() {
        let err = taskboard_api::Error::Http(ApiError::from_parts(404, "Not Found", ""));
        assert_eq!(
            format_api_error(&err).unwrap(),
            "Error (404): HTTP 404: Not Found"
        );
    }

    #[test]
    fn test_format_api_error_skips_other_errors() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(format_api_error(&taskboard_api::Error::Decode(decode)).is_none());
    }
}
