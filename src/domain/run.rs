use std::time::Duration;

use crate::args::{PositiveU64, PositiveUsize};

/// Default duration used when neither a request count nor a duration was
/// requested.
pub const DEFAULT_RUN_SECONDS: u64 = 30;
/// Status at or above which a response counts as a failure.
pub const DEFAULT_FAIL_STATUS: u16 = 400;

/// How each worker decides it is done. Exactly one policy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every worker issues exactly this many requests.
    ByCount(PositiveU64),
    /// Every worker keeps issuing requests until this much wall-clock time
    /// has passed since it started.
    ByDuration(Duration),
}

impl Termination {
    #[must_use]
    pub const fn default_duration() -> Self {
        Termination::ByDuration(Duration::from_secs(DEFAULT_RUN_SECONDS))
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Termination::ByCount(count) => format!("{} requests per worker", count.get()),
            Termination::ByDuration(duration) => format!("{}s", duration.as_secs()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub concurrency: PositiveUsize,
    pub termination: Termination,
    /// Per-request timeout enforced by the transport.
    pub fail_after: Option<Duration>,
    pub fail_status_threshold: u16,
    pub randomize_start: bool,
    /// Base seed for the per-worker start-offset generators.
    pub seed: u64,
}

impl RunConfig {
    #[must_use]
    pub const fn new(concurrency: PositiveUsize, termination: Termination) -> Self {
        Self {
            concurrency,
            termination,
            fail_after: None,
            fail_status_threshold: DEFAULT_FAIL_STATUS,
            randomize_start: false,
            seed: 0,
        }
    }

    #[must_use]
    pub const fn is_failure(&self, status: u16) -> bool {
        status >= self.fail_status_threshold
    }
}
