use anyhow::Result;
use clap::{Args, Subcommand};
use taskboard_api::types::CreateTask;
use taskboard_api::{Client, Query, TaskQuery};

use crate::output::{print_page_summary, print_tasks, OutputFormat};
use crate::validation;

#[derive(Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Subcommand)]
pub enum TasksCommand {
    /// List tasks, newest first
    List(ListArgs),
    /// Show a single task
    Get { id: i64 },
    /// Create a task
    Create(TaskFields),
    /// Replace every field of a task
    Update {
        id: i64,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task
    Delete { id: i64 },
    /// Print the total number of tasks
    Count,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status: todo, in-progress, done
    #[arg(long)]
    pub status: Option<String>,

    /// Page number (0-based)
    #[arg(long, default_value = "0")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct TaskFields {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    /// todo, in-progress, done
    #[arg(long, default_value = "todo")]
    pub status: String,

    /// low, medium, high
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due_date: String,

    /// ID of the assigned user
    #[arg(long = "user")]
    pub assigned_user_id: i64,
}

impl TaskFields {
    fn to_request(&self) -> Result<CreateTask, validation::ValidationError> {
        Ok(CreateTask {
            title: validation::sanitize_text("title", &self.title, validation::MAX_TITLE_LENGTH)?,
            description: validation::sanitize_text(
                "description",
                &self.description,
                validation::MAX_DESCRIPTION_LENGTH,
            )?,
            status: validation::validate_status(&self.status)?,
            priority: validation::validate_priority(&self.priority)?,
            due_date: validation::validate_date(&self.due_date)?,
            assigned_user_id: validation::validate_id(self.assigned_user_id)?,
        })
    }
}

pub async fn run(args: &TasksArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        TasksCommand::List(list) => {
            let mut query = TaskQuery::default()
                .with_page(validation::validate_page(list.page)?)
                .with_page_size(validation::validate_page_size(list.page_size)?);
            if let Some(status) = &list.status {
                query = query.with_status(validation::validate_status(status)?);
            }

            let page = client.get_tasks(&query).await?;
            print_page_summary(&page, "tasks");
            print_tasks(&page.content, format)?;
        }
        TasksCommand::Get { id } => {
            let task = client.get_task(validation::validate_id(*id)?).await?;
            print_tasks(&[task], format)?;
        }
        TasksCommand::Create(fields) => {
            let task = client.create_task(&fields.to_request()?).await?;
            print_tasks(&[task], format)?;
        }
        TasksCommand::Update { id, fields } => {
            let id = validation::validate_id(*id)?;
            let task = client.update_task(id, &fields.to_request()?).await?;
            print_tasks(&[task], format)?;
        }
        TasksCommand::Delete { id } => {
            let id = validation::validate_id(*id)?;
            client.delete_task(id).await?;
            eprintln!("Deleted task {}", id);
        }
        TasksCommand::Count => {
            println!("{}", client.count_tasks().await?);
        }
    }
    Ok(())
}
