use clap::{Args, Parser, Subcommand};
use listing::records::{AppSortKey, AuditSortKey, VariableSortKey};
use listing::state::DEFAULT_PAGE_SIZE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envsync", version, about = "Manage EnvSync environment variables")]
pub struct Cli {
    #[arg(long, global = true, default_value = "envsync.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a .env file without contacting the API. `-` reads stdin.
    Check { file: PathBuf },

    #[command(flatten)]
    Api(ApiCommand),
}

#[derive(Subcommand, Debug)]
pub enum ApiCommand {
    /// Bulk import a .env file into one environment.
    Import {
        file: PathBuf,
        #[arg(long)]
        app: String,
        #[arg(long)]
        env_type: String,
        /// Parse and preview only
        #[arg(long)]
        dry_run: bool,
    },

    /// List applications.
    Apps {
        /// all, active or archived
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value = "name")]
        sort: AppSortKey,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List the variables of one environment.
    Vars {
        #[arg(long)]
        app: String,
        #[arg(long)]
        env_type: String,
        /// all, sensitive or plain
        #[arg(long, default_value = "all")]
        kind: String,
        #[arg(long, default_value = "key")]
        sort: VariableSortKey,
        /// Print sensitive values instead of masking them
        #[arg(long)]
        reveal: bool,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List audit logs, newest first. Paged by the server.
    AuditLogs {
        #[arg(long)]
        event_type: Option<String>,
        #[arg(long, default_value = "created")]
        sort: AuditSortKey,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// Reverse the default sort order
    #[arg(long)]
    pub reverse: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

impl Default for ListArgs {
    fn default() -> Self {
        ListArgs {
            search: None,
            reverse: false,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
