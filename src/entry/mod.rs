mod plan;

use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{DEFAULT_CONFIG_FILES, TesterArgs};
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

pub(crate) fn run() -> AppResult<()> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let Some((args, matches)) = parse_args(raw_args)? else {
        return Ok(());
    };

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let command = build_plan(args, &matches)?;
    execute_plan(&command).inspect_err(|err| tracing::error!("Run failed: {}", err))
}

/// Parses the command line, or prints help and returns `None` for a bare
/// invocation with no default config file to fall back on.
fn parse_args(raw_args: Vec<OsString>) -> AppResult<Option<(TesterArgs, ArgMatches)>> {
    let mut cmd = TesterArgs::command();
    if is_bare_invocation(&raw_args) && !default_config_present() {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

/// True when nothing but the program name (and possibly `--`) was given.
fn is_bare_invocation(raw_args: &[OsString]) -> bool {
    raw_args.iter().skip(1).all(|arg| arg == "--")
}

fn default_config_present() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|name| Path::new(name).is_file())
}
