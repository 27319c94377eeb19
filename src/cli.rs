use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::engine::FailOn;
use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// When complaints fail the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOnChoice {
    /// Exit with 1 when there is any complaint
    Any,
    /// Always exit with 0 after a successful analysis
    None,
}

impl From<FailOnChoice> for FailOn {
    fn from(choice: FailOnChoice) -> Self {
        match choice {
            FailOnChoice::Any => Self::Any,
            FailOnChoice::None => Self::None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "testcop")]
#[command(author, version, about = "Static analyzer for JUnit test suites")]
#[command(long_about = "Checks Java test sources and compiled test classes against \
    naming and structure rules.\n\n\
    Exit codes:\n  \
    0 - No complaints\n  \
    1 - Complaints found\n  \
    2 - Configuration error\n  \
    3 - Test roots missing or unreadable")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze test sources and classes
    Check(CheckArgs),

    /// List the available rules
    Rules,

    /// Manage the POS model used by `RulePresentSimpleMl`
    Model(ModelArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Root of the Java test sources
    #[arg(long, default_value = "src/test/java")]
    pub sources: PathBuf,

    /// Root of the compiled test classes
    #[arg(long, default_value = "target/test-classes")]
    pub classes: PathBuf,

    /// Path to configuration file (default: ./.testcop.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Run only these rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rules: Option<Vec<String>>,

    /// Suppress these rules everywhere (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub suppress: Vec<String>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// When complaints make the run fail
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOnChoice>,

    #[command(flatten)]
    pub model: ModelSourceArgs,
}

/// Where the POS model comes from
#[derive(clap::Args, Debug, Default)]
pub struct ModelSourceArgs {
    /// Cache file for the POS model
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// Download the POS model from this URL
    #[arg(long)]
    pub model_url: Option<String>,

    /// Never download the POS model
    #[arg(long)]
    pub offline: bool,
}

#[derive(Parser, Debug)]
pub struct ModelArgs {
    #[command(subcommand)]
    pub action: ModelAction,
}

#[derive(Subcommand, Debug)]
pub enum ModelAction {
    /// Download and cache the POS model
    Fetch(ModelFetchArgs),
}

#[derive(Parser, Debug)]
pub struct ModelFetchArgs {
    /// Path to configuration file (default: ./.testcop.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelSourceArgs,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
