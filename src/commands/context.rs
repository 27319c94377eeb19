use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, ColorChoice, ModelSourceArgs};
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::engine::AnalysisOptions;
use crate::output::ColorMode;
use crate::pos::is_remote_url;
use crate::{Result, TestcopError};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "TESTCOP_LOG";

pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Filter used when `TESTCOP_LOG` is not set.
pub(crate) const fn default_log_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        return "error";
    }
    match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber.
pub fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("testcop={}", default_log_level(cli))));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Load the configuration file, `./.testcop.toml` unless a path is given.
pub(crate) fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Apply `--model-*` and `--offline` on top of configured options.
pub(crate) fn apply_model_args(options: &mut AnalysisOptions, args: &ModelSourceArgs) -> Result<()> {
    if let Some(url) = &args.model_url {
        if !is_remote_url(url) {
            return Err(TestcopError::Config(format!(
                "--model-url must start with http:// or https://, got '{url}'"
            )));
        }
        options.model_url = Some(url.clone());
    }
    if let Some(path) = &args.model_path {
        options.model_path = Some(path.clone());
    }
    options.offline |= args.offline;
    Ok(())
}

/// Directory that output paths are shown relative to.
pub(crate) fn project_root() -> Option<PathBuf> {
    dunce::canonicalize(".").ok()
}

pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
