use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Request set was empty.")]
    EmptyRequestSet,
    #[error("Failed to spawn worker {index}: {source}")]
    SpawnWorker {
        index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Worker {index} panicked: {message}")]
    WorkerPanicked { index: usize, message: String },
    #[error("Failed to allocate space for {requested} results: {source}")]
    ResultAllocation {
        requested: usize,
        #[source]
        source: std::collections::TryReserveError,
    },
    #[error("Request count {count} does not fit in memory on this platform.")]
    RequestCountTooLarge { count: u64 },
    #[error("Run duration overflows the monotonic clock.")]
    DeadlineOverflow,
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build request for '{url}': {source}")]
    BuildRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
