use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, TesterArgs, parsers::status_threshold};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values only fill in options that were not given on the command line.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if config.run_seconds.is_some() && config.run_requests.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "run_seconds",
            right: "run_requests",
        }));
    }

    if !is_cli(matches, "url_file")
        && let Some(url_file) = config.url_file.clone()
    {
        args.url_file = Some(url_file);
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = format;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    // A termination given on the command line replaces the config's
    // termination entirely, whichever kind it is.
    let cli_termination = is_cli(matches, "run_seconds") || is_cli(matches, "run_requests");
    if !cli_termination {
        if let Some(seconds) = config.run_seconds {
            args.run_seconds = Some(ensure_positive_u64(seconds, "run_seconds")?);
        }
        if let Some(requests) = config.run_requests {
            args.run_requests = Some(ensure_positive_u64(requests, "run_requests")?);
        }
    }

    if !is_cli(matches, "fail_after")
        && let Some(fail_after) = config.fail_after
    {
        args.fail_after = Some(ensure_positive_u64(fail_after, "fail_after")?);
    }

    if !is_cli(matches, "fail_status")
        && let Some(fail_status) = config.fail_status
    {
        args.fail_status = status_threshold(fail_status).ok_or_else(|| {
            AppError::config(ConfigError::FailStatusOutOfRange { value: fail_status })
        })?;
    }

    if !is_cli(matches, "randomize")
        && let Some(randomize) = config.randomize
    {
        args.randomize = randomize;
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = output;
    }

    if !is_cli(matches, "summary_json")
        && let Some(path) = config.summary_json.clone()
    {
        args.summary_json = Some(path);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
