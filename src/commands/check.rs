use std::path::PathBuf;

use tracing::warn;

use crate::cli::{CheckArgs, Cli};
use crate::config::Config;
use crate::engine::{self, AnalysisOptions, Report, RuleSelection};
use crate::output::{ColorMode, JsonFormatter, OutputFormat, OutputFormatter, TextFormatter};
use crate::rules;
use crate::{Result, TestcopError};

use super::context::{
    apply_model_args, color_choice_to_mode, load_config, project_root, write_output,
};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

pub(crate) fn run_check_impl(args: &CheckArgs, cli: &Cli) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    let options = build_options(&config, args)?;

    let report = engine::analyze(&args.sources, &args.classes, &options)?;
    for failure in &report.diagnostics {
        warn!(path = %failure.path.display(), reason = %failure.reason, "file not analyzed");
    }

    let output = format_report(
        args.format,
        &report,
        color_choice_to_mode(cli.color),
        project_root(),
    )?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(report.exit_code(options.fail_on))
}

/// Configuration overridden by command-line flags.
pub(crate) fn build_options(config: &Config, args: &CheckArgs) -> Result<AnalysisOptions> {
    let mut options = config.to_options();

    if let Some(ids) = &args.rules {
        if let Some(unknown) = ids.iter().find(|id| rules::find(id).is_none()) {
            return Err(TestcopError::Config(format!(
                "--rules: unknown rule '{unknown}'"
            )));
        }
        options.rules = RuleSelection::Only(ids.iter().cloned().collect());
    }
    options.suppressions.extend(args.suppress.iter().cloned());
    options.exclude.extend(args.exclude.iter().cloned());
    if let Some(fail_on) = args.fail_on {
        options.fail_on = fail_on.into();
    }
    apply_model_args(&mut options, &args.model)?;

    Ok(options)
}

pub(crate) fn format_report(
    format: OutputFormat,
    report: &Report,
    color_mode: ColorMode,
    project_root: Option<PathBuf>,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode)
            .with_project_root(project_root)
            .format(report),
        OutputFormat::Json => JsonFormatter::new()
            .with_project_root(project_root)
            .format(report),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
