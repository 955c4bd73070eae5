mod commands;
mod output;
mod validation;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskboard_api::{Client, DEFAULT_BASE_URL};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Manage users and tasks through the Taskboard API")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the API; endpoint paths are appended verbatim
    #[arg(long, env = "TASKBOARD_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET an endpoint and print the JSON response
    Get(commands::raw::PathArgs),
    /// POST a JSON payload to an endpoint
    Post(commands::raw::PayloadArgs),
    /// PUT a JSON payload to an endpoint
    Put(commands::raw::PayloadArgs),
    /// DELETE an endpoint
    Delete(commands::raw::PathArgs),
    /// List, show, create, update or delete users
    Users(commands::users::UsersArgs),
    /// List, show, create, update or delete tasks
    Tasks(commands::tasks::TasksArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskboard=info".parse().expect("static directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let format = OutputFormat::parse(&cli.output);
    let client = Client::with_base_url(&cli.base_url);
    tracing::debug!("Using API at {}", client.base_url());

    match &cli.command {
        Commands::Get(args) => commands::raw::get(args, &client).await?,
        Commands::Post(args) => commands::raw::post(args, &client).await?,
        Commands::Put(args) => commands::raw::put(args, &client).await?,
        Commands::Delete(args) => commands::raw::delete(args, &client).await?,
        Commands::Users(args) => commands::users::run(args, &client, &format).await?,
        Commands::Tasks(args) => commands::tasks::run(args, &client, &format).await?,
    }

    Ok(())
}
