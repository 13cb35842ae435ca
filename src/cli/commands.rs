//! CLI commands and argument parsing

use crate::resources::DateParam;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Accela Civic Platform command-line client
#[derive(Parser, Debug)]
#[command(name = "accela")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Access token
    #[arg(long, global = true, env = "ACCELA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Agency name
    #[arg(long, global = true, env = "ACCELA_AGENCY")]
    pub agency: Option<String>,

    /// Agency environment
    #[arg(long, global = true, env = "ACCELA_ENVIRONMENT")]
    pub environment: Option<String>,

    /// IANA zone applied to API timestamps
    #[arg(long, global = true, env = "ACCELA_TIMEZONE")]
    pub timezone: Option<String>,

    /// API root
    #[arg(long, global = true, env = "ACCELA_BASE_URL")]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Print raw API payloads instead of mapped attributes
    #[arg(long, global = true)]
    pub raw: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exchange user credentials for an access token
    Token(TokenArgs),

    /// Query records
    Records {
        #[command(subcommand)]
        action: RecordsCommand,
    },

    /// List the signed-in user's records
    MyRecords {
        #[command(flatten)]
        filter: RecordFilterArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List a record's activities
    Activities {
        /// Record id
        record_id: String,

        /// Fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List a record's workflow task history
    WorkflowHistories {
        /// Record id
        record_id: String,

        /// Fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// `records` subcommands
#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// List records
    List {
        #[command(flatten)]
        filter: RecordFilterArgs,

        /// Assigned department
        #[arg(long)]
        assigned_to_department: Option<String>,

        /// Assigned user
        #[arg(long)]
        assigned_user: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Fetch one record by custom id
    Get {
        /// Record custom id
        custom_id: String,

        /// Sub-resources to expand (comma-separated)
        #[arg(long, value_delimiter = ',')]
        expand: Vec<String>,

        /// Fields to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Search records with a JSON query body
    Search {
        /// Search body, inline JSON or @path to a JSON file
        query: String,

        /// Sub-resources to expand (comma-separated)
        #[arg(long, value_delimiter = ',')]
        expand: Vec<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Free-text search across records
    Find {
        /// Search text
        text: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Filters shared by record listings
#[derive(Args, Debug, Clone, Default)]
pub struct RecordFilterArgs {
    /// Record type
    #[arg(long = "type")]
    pub record_type: Option<String>,

    /// Module, e.g. Building
    #[arg(long)]
    pub module: Option<String>,

    /// Record status
    #[arg(long)]
    pub status: Option<String>,

    /// Custom id
    #[arg(long)]
    pub custom_id: Option<String>,

    /// Opened on or after (date, datetime or RFC 3339)
    #[arg(long)]
    pub opened_from: Option<DateParam>,

    /// Opened on or before
    #[arg(long)]
    pub opened_to: Option<DateParam>,

    /// Status changed on or after
    #[arg(long)]
    pub status_from: Option<DateParam>,

    /// Status changed on or before
    #[arg(long)]
    pub status_to: Option<DateParam>,
}

/// Paging options
#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page size
    #[arg(long, default_value = "100")]
    pub limit: u32,

    /// Starting offset
    #[arg(long, default_value = "0")]
    pub offset: u32,

    /// Follow every page
    #[arg(long)]
    pub all: bool,
}

/// `token` arguments
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Application id
    #[arg(long, env = "ACCELA_CLIENT_ID")]
    pub client_id: String,

    /// Application secret
    #[arg(long, env = "ACCELA_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// User name
    #[arg(long, env = "ACCELA_USERNAME")]
    pub username: String,

    /// Password
    #[arg(long, env = "ACCELA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Space-separated scopes
    #[arg(long, default_value = "records")]
    pub scope: String,

    /// Identity provider
    #[arg(long)]
    pub id_provider: Option<String>,

    /// Token endpoint
    #[arg(long)]
    pub token_url: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per line)
    Json,
    /// Indented JSON
    Pretty,
}
