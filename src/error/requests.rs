use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestFileError {
    #[error("Failed to read request file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Request file '{path}' contains no requests.")]
    Empty { path: PathBuf },
    #[error("Failed to parse request file '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{location}: unknown HTTP method '{method}'. Use GET or POST.")]
    UnknownMethod { location: String, method: String },
    #[error("{location}: request must name exactly one method (get or post).")]
    MethodCount { location: String },
    #[error("{location}: URL is empty.")]
    EmptyUrl { location: String },
    #[error("{location}: invalid URL '{url}': {source}")]
    InvalidUrl {
        location: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{location}: expected METHOD<TAB>URL.")]
    MissingUrl { location: String },
    #[error("{location}: cannot set both 'payload' and 'payload64'.")]
    PayloadConflict { location: String },
    #[error("{location}: GET requests cannot carry a payload.")]
    PayloadOnGet { location: String },
    #[error(
        "{location}: base64-encoded payload length must be a positive multiple of 4 (was {length})."
    )]
    PayloadLength { location: String, length: usize },
    #[error("{location}: invalid base64 payload: {source}")]
    PayloadDecode {
        location: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("{location}: invalid header '{value}'. Expected 'Name: Value'.")]
    HeaderFormat { location: String, value: String },
    #[error("{location}: header entries must map one name to one value.")]
    HeaderEntry { location: String },
    #[error("{location}: invalid header name '{name}': {source}")]
    HeaderName {
        location: String,
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("{location}: invalid value for header '{name}': {source}")]
    HeaderValue {
        location: String,
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
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
