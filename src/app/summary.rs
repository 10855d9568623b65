use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::error::{AppError, AppResult, ExportError};
use crate::metrics::{AggregateStats, LatencyReport};

/// Divisor for values carried as hundredths.
const PERCENT_DIVISOR: u64 = 100;
/// Microseconds per reported millisecond.
const US_PER_MS: u64 = 1_000;
/// Milliseconds per reported second.
const MS_PER_SEC: u64 = 1_000;

/// Percentile block in whole milliseconds, truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct LatencyMillis {
    pub(crate) p50: u64,
    pub(crate) p75: u64,
    pub(crate) p95: u64,
    pub(crate) max: u64,
}

impl From<LatencyReport> for LatencyMillis {
    fn from(report: LatencyReport) -> Self {
        Self {
            p50: report.p50 / US_PER_MS,
            p75: report.p75 / US_PER_MS,
            p95: report.p95 / US_PER_MS,
            max: report.max / US_PER_MS,
        }
    }
}

/// End-of-run numbers shared by the console summary and the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) total_requests: u64,
    pub(crate) successes: u64,
    pub(crate) failures: u64,
    pub(crate) bytes_received: u64,
    pub(crate) elapsed_ms: u64,
    pub(crate) throughput_rps_x100: u64,
    pub(crate) seed: u64,
    /// `None` when nothing succeeded.
    pub(crate) latency_ms: Option<LatencyMillis>,
}

impl RunSummary {
    pub(crate) fn new(stats: &AggregateStats, elapsed: Duration, seed: u64) -> Self {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Self {
            total_requests: stats.total(),
            successes: stats.successes(),
            failures: stats.failures(),
            bytes_received: stats.bytes_received(),
            elapsed_ms,
            throughput_rps_x100: throughput_x100(stats.total(), elapsed_ms),
            seed,
            latency_ms: stats.latency_report().map(LatencyMillis::from),
        }
    }
}

/// Requests per second in hundredths.
pub(crate) fn throughput_x100(total: u64, elapsed_ms: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(total)
        .saturating_mul(100_000)
        .checked_div(u128::from(elapsed_ms.max(1)))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Total Requests: {}", summary.total_requests),
        format!("Successful: {}", summary.successes),
        format!(
            "Elapsed: {}.{:03}s",
            summary.elapsed_ms / MS_PER_SEC,
            summary.elapsed_ms % MS_PER_SEC
        ),
        format!(
            "Throughput: {}.{:02} req/s",
            summary.throughput_rps_x100 / PERCENT_DIVISOR,
            summary.throughput_rps_x100 % PERCENT_DIVISOR
        ),
        "Request time (ms)".to_owned(),
    ];
    match summary.latency_ms {
        Some(latency) => {
            lines.push(format!(" 50%: {}", latency.p50));
            lines.push(format!(" 75%: {}", latency.p75));
            lines.push(format!(" 95%: {}", latency.p95));
            lines.push(format!(" max: {}", latency.max));
        }
        None => lines.push(" no data".to_owned()),
    }
    lines.push(format!("Failures: {}", summary.failures));
    lines
}

pub(crate) fn print_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

/// Writes `summary` as pretty JSON to `path`.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub(crate) fn write_summary_json(path: &Path, summary: &RunSummary) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(summary)
        .map_err(|err| AppError::export(ExportError::SerializeSummary { source: err }))?;
    std::fs::write(path, json).map_err(|err| {
        AppError::export(ExportError::WriteSummary {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
