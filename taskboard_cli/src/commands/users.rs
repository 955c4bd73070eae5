use anyhow::Result;
use clap::{Args, Subcommand};
use taskboard_api::types::CreateUser;
use taskboard_api::{Client, Query, UserQuery};

use crate::output::{print_page_summary, print_users, OutputFormat};
use crate::validation;

#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users, newest first
    List(ListArgs),
    /// Show a single user
    Get { id: i64 },
    /// Create a user
    Create(UserFields),
    /// Replace a user's name and email
    Update {
        id: i64,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user
    Delete { id: i64 },
    /// Print the total number of users
    Count,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by name (case-insensitive partial match)
    #[arg(long)]
    pub name: Option<String>,

    /// Page number (0-based)
    #[arg(long, default_value = "0")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct UserFields {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,
}

impl UserFields {
    fn to_request(&self) -> Result<CreateUser, validation::ValidationError> {
        Ok(CreateUser {
            name: validation::sanitize_text("name", &self.name, validation::MAX_NAME_LENGTH)?,
            email: validation::validate_email(&self.email)?,
        })
    }
}

pub async fn run(args: &UsersArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    match &args.command {
        UsersCommand::List(list) => {
            let mut query = UserQuery::default()
                .with_page(validation::validate_page(list.page)?)
                .with_page_size(validation::validate_page_size(list.page_size)?);
            if let Some(name) = &list.name {
                let name = validation::sanitize_text("name", name, validation::MAX_NAME_LENGTH)?;
                query = query.with_name(&name);
            }

            let page = client.get_users(&query).await?;
            print_page_summary(&page, "users");
            print_users(&page.content, format)?;
        }
        UsersCommand::Get { id } => {
            let user = client.get_user(validation::validate_id(*id)?).await?;
            print_users(&[user], format)?;
        }
        UsersCommand::Create(fields) => {
            let user = client.create_user(&fields.to_request()?).await?;
            print_users(&[user], format)?;
        }
        UsersCommand::Update { id, fields } => {
            let id = validation::validate_id(*id)?;
            let user = client.update_user(id, &fields.to_request()?).await?;
            print_users(&[user], format)?;
        }
        UsersCommand::Delete { id } => {
            let id = validation::validate_id(*id)?;
            client.delete_user(id).await?;
            eprintln!("Deleted user {}", id);
        }
        UsersCommand::Count => {
            println!("{}", client.count_users().await?);
        }
    }
    Ok(())
}
