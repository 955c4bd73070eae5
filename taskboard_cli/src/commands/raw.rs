//! Raw verbs: `get`, `post`, `put`, `delete` against any endpoint path.

use anyhow::Result;
use clap::Args;
use taskboard_api::Client;

use crate::output::print_json;
use crate::validation;

#[derive(Args)]
pub struct PathArgs {
    /// Endpoint path appended to the base URL (e.g. /users/1)
    pub path: String,
}

#[derive(Args)]
pub struct PayloadArgs {
    /// Endpoint path appended to the base URL (e.g. /users)
    pub path: String,

    /// JSON body: inline JSON, @file, or - for stdin
    pub data: String,
}

pub async fn get(args: &PathArgs, client: &Client) -> Result<()> {
    let value = client.get(&args.path).await?;
    print_json(&value);
    Ok(())
}

pub async fn post(args: &PayloadArgs, client: &Client) -> Result<()> {
    let payload = validation::read_payload(&args.data)?;
    let value = client.post(&args.path, &payload).await?;
    print_json(&value);
    Ok(())
}

pub async fn put(args: &PayloadArgs, client: &Client) -> Result<()> {
    let payload = validation::read_payload(&args.data)?;
    let value = client.put(&args.path, &payload).await?;
    print_json(&value);
    Ok(())
}

pub async fn delete(args: &PathArgs, client: &Client) -> Result<()> {
    let value = client.delete(&args.path).await?;
    if value.is_null() {
        eprintln!("Deleted {}", args.path);
    } else {
        print_json(&value);
    }
    Ok(())
}
