use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Cannot specify both --run-requests and --run-seconds.")]
    TerminationConflict,
    #[error("Missing URL_FILE (pass it as an argument or set url_file in config).")]
    MissingUrlFile,
    #[error("--fail-status must fit in an HTTP status code (got {value}).")]
    FailStatusOutOfRange { value: u64 },
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
