//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use forgeboard_core::auth::UserRole;
use forgeboard_core::import::ImportKind;
use forgeboard_shared::{CommitPolicy, ImportMode};

/// Forgeboard operator tool.
#[derive(Debug, Parser)]
#[command(name = "forgeboard", version, about)]
pub struct Cli {
    /// Emit JSON log lines (overrides `log.json`).
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the sales dashboard for a fiscal month as JSON.
    SalesDashboard {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only count orders owned by this sales rep.
        #[arg(long)]
        rep_email: Option<String>,
    },
    /// Print the production dashboard for a fiscal month as JSON.
    ProductionDashboard {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Import orders or production batches from a CSV file.
    Import {
        /// Record type in the file.
        kind: ImportKind,
        /// CSV file to read.
        file: PathBuf,
        /// How the `id` column is treated (defaults to `import.mode`).
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Commit granularity (defaults to `import.commit_policy`).
        #[arg(long, value_enum)]
        commit: Option<CommitArg>,
    },
    /// Export all orders or production batches to CSV.
    Export {
        /// Record type to export.
        kind: ImportKind,
        /// Directory to write into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Write an import template with one example row.
    Template {
        /// Record type of the template.
        kind: ImportKind,
        /// Directory to write into.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List fiscal year labels, oldest first.
    FiscalYears {
        /// Years before the current one (defaults to `dashboard.years_back`).
        #[arg(long)]
        years_back: Option<u32>,
    },
    /// Read or write a dashboard note.
    #[command(subcommand)]
    Note(NoteCommand),
    /// Show or change business settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Fiscal period selection; both default to today's.
#[derive(Debug, Clone, Args)]
pub struct PeriodArgs {
    /// Fiscal year label, e.g. 2025/26.
    #[arg(long)]
    pub fy: Option<String>,
    /// Fiscal month name, e.g. March.
    #[arg(long)]
    pub month: Option<String>,
}

/// Note commands.
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Print the note for a role's dashboard.
    Get {
        #[command(flatten)]
        period: PeriodArgs,
        /// Dashboard role.
        #[arg(long)]
        role: UserRole,
    },
    /// Replace the note for a role's dashboard.
    Set {
        #[command(flatten)]
        period: PeriodArgs,
        /// Dashboard role.
        #[arg(long)]
        role: UserRole,
        /// Email of the account writing the note.
        #[arg(long)]
        author_email: String,
        /// Note text; empty clears the note.
        body: String,
    },
}

/// Settings commands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings as JSON.
    Show,
    /// Set the yearly box target and split it evenly over the months.
    SplitTarget {
        /// New yearly box target.
        yearly: i32,
    },
}

/// `--mode` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Positive ids update, other rows insert.
    Upsert,
    /// Every row inserts.
    InsertOnly,
}

impl From<ModeArg> for ImportMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Upsert => Self::Upsert,
            ModeArg::InsertOnly => Self::InsertOnly,
        }
    }
}

/// `--commit` values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CommitArg {
    /// Each row commits on its own.
    PerRow,
    /// The whole file commits or rolls back together.
    PerFile,
}

impl From<CommitArg> for CommitPolicy {
    fn from(arg: CommitArg) -> Self {
        match arg {
            CommitArg::PerRow => Self::PerRow,
            CommitArg::PerFile => Self::PerFile,
        }
    }
}
