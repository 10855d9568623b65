use std::path::PathBuf;
use std::time::Duration;

use rand::{Rng, thread_rng};

use crate::application::commands::LocalRunCommand;
use crate::args::TesterArgs;
use crate::domain::{RunConfig, Termination};
use crate::error::{AppError, AppResult, ValidationError};

pub(crate) fn to_local_run_command(args: TesterArgs) -> AppResult<LocalRunCommand> {
    let Some(request_file) = args.url_file.as_deref().map(PathBuf::from) else {
        tracing::error!("Missing URL_FILE (pass it as an argument or set url_file in config).");
        return Err(AppError::validation(ValidationError::MissingUrlFile));
    };
    let run_config = to_run_config(&args)?;
    Ok(LocalRunCommand::new(
        run_config,
        request_file,
        args.format,
        PathBuf::from(args.output),
        args.summary_json.map(PathBuf::from),
    ))
}

pub(crate) fn to_run_config(args: &TesterArgs) -> AppResult<RunConfig> {
    let mut config = RunConfig::new(args.concurrency, map_termination(args)?);
    config.fail_after = args
        .fail_after
        .map(|millis| Duration::from_millis(millis.get()));
    config.fail_status_threshold = args.fail_status;
    config.randomize_start = args.randomize;
    config.seed = args.seed.unwrap_or_else(|| thread_rng().r#gen());
    Ok(config)
}

fn map_termination(args: &TesterArgs) -> AppResult<Termination> {
    match (args.run_requests, args.run_seconds) {
        (Some(_), Some(_)) => Err(AppError::validation(ValidationError::TerminationConflict)),
        (Some(count), None) => Ok(Termination::ByCount(count)),
        (None, Some(seconds)) => Ok(Termination::ByDuration(Duration::from_secs(seconds.get()))),
        (None, None) => Ok(Termination::default_duration()),
    }
}
