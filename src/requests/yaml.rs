//! Structured request files:
//!
//! ```yaml
//! - get: http://host/a
//! - post: http://host/b
//!   payload64: aGVsbG8gd29y
//!   headers:
//!     - Content-Type: text/plain
//! ```
use std::path::Path;

use bytes::Bytes;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::domain::{HttpMethod, RequestSpec};
use crate::error::{AppError, AppResult, RequestFileError};

use super::validate;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestEntry {
    #[serde(default, alias = "GET")]
    get: Option<String>,
    #[serde(default, alias = "POST")]
    post: Option<String>,
    #[serde(default)]
    payload: Option<String>,
    #[serde(default)]
    payload64: Option<String>,
    #[serde(default)]
    headers: Vec<Mapping>,
}

pub(super) fn parse(path: &Path, content: &str) -> AppResult<Vec<RequestSpec>> {
    let has_content = content.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(Vec::new());
    }

    let entries: Option<Vec<RequestEntry>> = serde_yaml::from_str(content).map_err(|err| {
        AppError::requests(RequestFileError::ParseYaml {
            path: path.to_path_buf(),
            source: err,
        })
    })?;

    entries
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| to_request(&format!("entry {}", index.saturating_add(1)), entry))
        .collect()
}

fn to_request(location: &str, entry: RequestEntry) -> AppResult<RequestSpec> {
    let (method, url) = match (entry.get, entry.post) {
        (Some(url), None) => (HttpMethod::Get, url),
        (None, Some(url)) => (HttpMethod::Post, url),
        (Some(_), Some(_)) | (None, None) => {
            return Err(AppError::requests(RequestFileError::MethodCount {
                location: location.to_owned(),
            }));
        }
    };
    let url = validate::url(location, &url)?;

    let payload = match (entry.payload, entry.payload64) {
        (Some(_), Some(_)) => {
            return Err(AppError::requests(RequestFileError::PayloadConflict {
                location: location.to_owned(),
            }));
        }
        (Some(raw), None) => Some(Bytes::from(raw)),
        (None, Some(encoded)) => Some(validate::payload64(location, &encoded)?),
        (None, None) => None,
    };

    let mut headers = Vec::with_capacity(entry.headers.len());
    for mapping in &entry.headers {
        headers.push(header_entry(location, mapping)?);
    }

    Ok(RequestSpec {
        method,
        url,
        payload: validate::payload_allowed(location, method, payload)?,
        headers,
    })
}

fn header_entry(location: &str, mapping: &Mapping) -> AppResult<(String, String)> {
    let invalid = || {
        AppError::requests(RequestFileError::HeaderEntry {
            location: location.to_owned(),
        })
    };
    let mut pairs = mapping.iter();
    let (name, value) = pairs.next().ok_or_else(invalid)?;
    if pairs.next().is_some() {
        return Err(invalid());
    }
    let name = scalar(name).ok_or_else(invalid)?;
    let value = scalar(value).ok_or_else(invalid)?;
    validate::header(location, &name, &value)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
