use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rworklog
/// Local worklog ledger: remove import overlaps, sync days to a remote worklog API
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep a local worklog ledger free of overlaps and in sync with a remote worklog API",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add a worklog by hand
    Add {
        /// Day of the worklog (YYYY-MM-DD)
        date: String,

        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "end", help = "End time (HH:MM), same day as start")]
        end: String,

        #[arg(long)]
        project: String,

        #[arg(long)]
        activity: String,

        #[arg(long)]
        skill: String,

        #[arg(
            long = "billable",
            help = "Billable minutes (default: the whole duration)"
        )]
        billable: Option<i64>,

        #[arg(long = "desc", help = "Free-text description")]
        description: Option<String>,

        #[arg(long = "mapper", help = "Provenance: import mapper name")]
        mapper: Option<String>,

        #[arg(long = "file", help = "Provenance: source file")]
        source_file: Option<String>,
    },

    /// Delete a worklog by ID
    Del {
        id: i64,

        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },

    /// List worklogs day by day, with overlap counts
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (default: current month)"
        )]
        period: Option<String>,
    },

    /// Slide entries of adjustable imports around the fixed ones until no day overlaps
    Reconcile {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "dry-run", help = "Report what would move without writing")]
        dry_run: bool,
    },

    /// Submit worklogs to the remote worklog API, one day at a time
    Submit {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(
            long = "dry-run",
            help = "Fetch and classify, report overlaps and locked days, never write"
        )]
        dry_run: bool,

        #[arg(long, help = "Print the run summary as JSON")]
        json: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Export worklogs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
