//! Tab-delimited request files:
//!
//! ```text
//! # comment
//! GET<TAB>http://host/a
//! POST<TAB>http://host/b<TAB>aGVsbG8gd29y<TAB>Content-Type: text/plain
//! ```
//!
//! After the URL, a field containing `:` is a header and a field without one
//! is the base64 payload.
use bytes::Bytes;

use crate::domain::RequestSpec;
use crate::error::{AppError, AppResult, RequestFileError};

use super::validate;

pub(super) fn parse(content: &str) -> AppResult<Vec<RequestSpec>> {
    let mut requests = Vec::new();
    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let location = format!("line {}", index.saturating_add(1));
        requests.push(parse_line(&location, line)?);
    }
    Ok(requests)
}

fn parse_line(location: &str, line: &str) -> AppResult<RequestSpec> {
    let mut fields = line.split('\t');
    let method = validate::method(location, fields.next().unwrap_or_default())?;
    let url = match fields.next() {
        Some(url) => validate::url(location, url)?,
        None => {
            return Err(AppError::requests(RequestFileError::MissingUrl {
                location: location.to_owned(),
            }));
        }
    };

    let mut payload: Option<Bytes> = None;
    let mut headers = Vec::new();
    for field in fields.filter(|field| !field.trim().is_empty()) {
        if field.contains(':') {
            headers.push(validate::header_line(location, field)?);
        } else if payload.is_some() {
            return Err(AppError::requests(RequestFileError::PayloadConflict {
                location: location.to_owned(),
            }));
        } else {
            payload = Some(validate::payload64(location, field)?);
        }
    }

    Ok(RequestSpec {
        method,
        url,
        payload: validate::payload_allowed(location, method, payload)?,
        headers,
    })
}
