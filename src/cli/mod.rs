//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `token` - Exchange user credentials for an access token
//! - `records list|get|search|find` - Query records
//! - `my-records` - List the signed-in user's records
//! - `activities` - List a record's activities
//! - `workflow-histories` - List a record's workflow task history
//!
//! Results print as one JSON object per line; `--all` follows every page.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs, RecordFilterArgs, RecordsCommand};
pub use runner::Runner;
