use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quotesync_core::models::{Choice, Origin};

#[derive(Parser)]
#[command(name = "quotes")]
#[command(about = "Keep a quote collection in sync with a remote source")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to sync config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Quick capture: quotes "words worth keeping"
    #[arg(trailing_var_arg = true)]
    pub quote: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a quote
    #[command(alias = "new")]
    Add {
        /// Quote text (read from stdin when omitted)
        text: Vec<String>,
        /// Attribution (defaults to "You")
        #[arg(short, long)]
        author: Option<String>,
    },
    /// List quotes, newest first
    List {
        /// Number of quotes to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show quotes with this origin
        #[arg(long, value_enum)]
        origin: Option<OriginFilter>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a random quote
    Random {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit an existing quote
    Edit {
        /// Quote id (`local-...` or a remote number)
        id: String,
        /// Replacement text (read from stdin when omitted)
        text: Vec<String>,
        /// Replacement attribution
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Delete a quote
    Delete {
        /// Quote id
        id: String,
    },
    /// Pull remote quotes and merge them into the collection
    Sync {
        /// Resolve every conflict raised by this pass in favour of one side
        #[arg(long, value_enum, value_name = "SIDE")]
        keep: Option<KeepSide>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn periodic sync on or off
    AutoSync {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Stay running with auto-sync and resolve conflicts interactively
    Watch,
    /// Export quotes
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import quotes from a JSON export
    Import {
        /// JSON file produced by `quotes export`
        path: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Inspect sync configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for quotesync_core::export::ExportFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OriginFilter {
    Local,
    Remote,
}

impl From<OriginFilter> for Origin {
    fn from(filter: OriginFilter) -> Self {
        match filter {
            OriginFilter::Local => Self::Local,
            OriginFilter::Remote => Self::Remote,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum KeepSide {
    Local,
    Remote,
}

impl From<KeepSide> for Choice {
    fn from(side: KeepSide) -> Self {
        match side {
            KeepSide::Local => Self::Local,
            KeepSide::Remote => Self::Remote,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration and file locations
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
