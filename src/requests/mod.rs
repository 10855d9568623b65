//! Request-set loading: turns a request file into the ordered, immutable
//! `RequestSpec` sequence the engine cycles through.
mod tsv;
mod validate;
mod yaml;


use std::path::Path;

use crate::args::RequestFormat;
use crate::domain::RequestSpec;
use crate::error::{AppError, AppResult, RequestFileError};

/// Reads and parses a request file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, any entry is malformed, or
/// the file holds no requests.
pub fn load_request_set(path: &Path, format: RequestFormat) -> AppResult<Vec<RequestSpec>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::requests(RequestFileError::ReadFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;

    let requests = match resolve_format(path, format) {
        RequestFormat::Yaml => yaml::parse(path, &content)?,
        RequestFormat::Tsv | RequestFormat::Auto => tsv::parse(&content)?,
    };

    if requests.is_empty() {
        return Err(AppError::requests(RequestFileError::Empty {
            path: path.to_path_buf(),
        }));
    }
    tracing::debug!("Loaded {} requests from {}", requests.len(), path.display());
    Ok(requests)
}

fn resolve_format(path: &Path, format: RequestFormat) -> RequestFormat {
    match format {
        RequestFormat::Auto => match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml" | "json") => RequestFormat::Yaml,
            _ => RequestFormat::Tsv,
        },
        RequestFormat::Tsv | RequestFormat::Yaml => format,
    }
}
