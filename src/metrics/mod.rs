//! Failure classification and latency percentiles over a finished run.
mod aggregate;


pub use aggregate::{AggregateStats, LatencyReport, PERCENTILE_SCALE, percentile_index};
