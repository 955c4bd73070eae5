//! CLI subcommand implementations.

pub mod raw;
pub mod tasks;
pub mod users;
