use tracing::info;

use crate::application::commands::LocalRunCommand;
use crate::engine::{HttpTransport, TransportSettings, run_load};
use crate::error::AppResult;
use crate::metrics::AggregateStats;
use crate::requests::load_request_set;

use super::export::export_csv;
use super::summary::{RunSummary, print_summary, write_summary_json};

/// Loads the request set, drives the workers, then writes the export and
/// prints the summary.
///
/// # Errors
///
/// Returns an error when loading, the run itself, or any output fails.
pub(crate) fn run_local(command: &LocalRunCommand) -> AppResult<RunSummary> {
    let config = command.run_config();
    let requests = load_request_set(command.request_file(), command.format())?;
    info!(
        "Loaded {} requests from {}",
        requests.len(),
        command.request_file().display()
    );

    let settings = TransportSettings::from(config);
    let outcome = run_load(&requests, config, |_| HttpTransport::prepare(&settings))?;

    let rows = export_csv(command.output(), outcome.results())?;
    info!("Wrote {} results to {}", rows, command.output().display());

    let stats = AggregateStats::from_results(outcome.results(), config.fail_status_threshold);
    let summary = RunSummary::new(&stats, outcome.elapsed, config.seed);
    print_summary(&summary);

    if let Some(path) = command.summary_json() {
        write_summary_json(path, &summary)?;
        info!("Wrote summary to {}", path.display());
    }
    Ok(summary)
}
