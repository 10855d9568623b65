use clap::ArgMatches;

use crate::adapters::cli::mapper::to_local_run_command;
use crate::app::run_local;
use crate::application::commands::LocalRunCommand;
use crate::args::TesterArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;

pub(super) fn build_plan(
    mut args: TesterArgs,
    matches: &ArgMatches,
) -> AppResult<LocalRunCommand> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    let command = to_local_run_command(args)?;
    let config = command.run_config();
    tracing::info!(
        "Running {} workers for {} against {} (seed {})",
        config.concurrency.get(),
        config.termination.describe(),
        command.request_file().display(),
        config.seed
    );
    Ok(command)
}

pub(super) fn execute_plan(command: &LocalRunCommand) -> AppResult<()> {
    run_local(command)?;
    Ok(())
}
