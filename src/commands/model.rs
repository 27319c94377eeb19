use tracing::info;

use crate::cli::{Cli, ModelAction, ModelArgs, ModelFetchArgs};
use crate::engine;
use crate::pos::LexiconTagger;
use crate::{EXIT_SUCCESS, Result, TestcopError};

use super::context::{apply_model_args, load_config};

#[must_use]
pub fn run_model(args: &ModelArgs, cli: &Cli) -> i32 {
    let result = match &args.action {
        ModelAction::Fetch(fetch) => run_fetch_impl(fetch),
    };
    match result {
        Ok(summary) => {
            if !cli.quiet {
                println!("{summary}");
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

/// Materialize the configured model source and check that it parses.
pub(crate) fn run_fetch_impl(args: &ModelFetchArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let mut options = config.to_options();
    apply_model_args(&mut options, &args.model)?;

    let source = engine::model_source(&options);
    let bytes = source.bytes()?;
    let tagger = LexiconTagger::from_bytes(&bytes)
        .map_err(|e| TestcopError::ModelUnavailable(format!("{}: {e}", source.describe())))?;
    info!(source = %source.describe(), "POS model ready");

    Ok(format!(
        "POS model ready: {} ({} words)",
        source.describe(),
        tagger.len()
    ))
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
