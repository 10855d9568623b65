use serde::Serialize;

use crate::engine::RequestResult;

/// Percentiles are expressed in per-mille so index math stays integral.
pub const PERCENTILE_SCALE: u64 = 1_000;

const P50: u64 = 500;
const P75: u64 = 750;
const P95: u64 = 950;

/// Latency order statistics over successful requests, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencyReport {
    pub p50: u64,
    pub p75: u64,
    pub p95: u64,
    pub max: u64,
}

/// Counts and latencies derived from every result of a run.
#[derive(Debug, Clone, Default)]
pub struct AggregateStats {
    successes: u64,
    failures: u64,
    bytes_received: u64,
    /// Success latencies, sorted ascending.
    latencies_us: Vec<u64>,
}

impl AggregateStats {
    /// Classifies every result against `fail_status_threshold` (a status at
    /// or above it is a failure) and sorts the success latencies.
    pub fn from_results<'res, 'req: 'res, I>(results: I, fail_status_threshold: u16) -> Self
    where
        I: IntoIterator<Item = &'res RequestResult<'req>>,
    {
        let mut stats = Self::default();
        for result in results {
            stats.bytes_received = stats.bytes_received.saturating_add(result.bytes_received);
            if result.status >= fail_status_threshold {
                stats.failures = stats.failures.saturating_add(1);
            } else {
                stats.successes = stats.successes.saturating_add(1);
                stats.latencies_us.push(result.latency_micros());
            }
        }
        stats.latencies_us.sort_unstable();
        stats
    }

    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.successes
    }

    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.successes.saturating_add(self.failures)
    }

    #[must_use]
    pub const fn bytes_received(&self) -> u64 {
        self.bytes_received
    }

    #[must_use]
    pub fn latencies_us(&self) -> &[u64] {
        &self.latencies_us
    }

    /// Success latency at `per_mille` (1..=1000), or `None` with no
    /// successes.
    #[must_use]
    pub fn percentile(&self, per_mille: u64) -> Option<u64> {
        let index = percentile_index(self.latencies_us.len(), per_mille)?;
        self.latencies_us.get(index).copied()
    }

    /// The 50/75/95/max block, or `None` when nothing succeeded.
    #[must_use]
    pub fn latency_report(&self) -> Option<LatencyReport> {
        Some(LatencyReport {
            p50: self.percentile(P50)?,
            p75: self.percentile(P75)?,
            p95: self.percentile(P95)?,
            max: self.latencies_us.last().copied()?,
        })
    }
}

/// `floor(len * per_mille / 1000)` clamped to the last index. Truncates
/// rather than interpolates, so for small samples the upper percentiles
/// land on the maximum.
#[must_use]
pub fn percentile_index(len: usize, per_mille: u64) -> Option<usize> {
    let last = len.checked_sub(1)?;
    let len = u64::try_from(len).unwrap_or(u64::MAX);
    let scaled = len
        .saturating_mul(per_mille)
        .checked_div(PERCENTILE_SCALE)
        .unwrap_or(0);
    Some(usize::try_from(scaled).unwrap_or(last).min(last))
}
