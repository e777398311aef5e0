use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact JSON, exactly as served to the dashboard
    Raw,
}

/// Top-level CLI parser for the `lbd` binary.
#[derive(Debug, Parser)]
#[command(
    name = "lbd",
    version,
    about = "Lintboard - static-analysis report dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Database path (overrides `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a report file with the given tool and store it
    Upload {
        /// Tool id, see `lbd tools`
        #[arg(short, long)]
        tool: String,

        /// Report file to upload
        file: PathBuf,

        /// Reference of this upload (defaults to the file name)
        #[arg(short, long)]
        reference: Option<String>,
    },

    /// List the available analysis tools
    Tools,

    /// Print the statistics table of all stored reports
    Table,

    /// Print the issue distribution of one stored report
    Distribution {
        /// Tool id of the report
        #[arg(short, long)]
        tool: String,

        /// Reference the report was uploaded with
        #[arg(short, long)]
        reference: String,

        /// Issue property to group by (defaults to `general.default_property`)
        #[arg(short, long)]
        property: Option<String>,
    },

    /// List the ids of all stored reports
    References,
}
