use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue};

use crate::domain::HttpMethod;
use crate::error::{AppError, AppResult, RequestFileError};

pub(super) fn method(location: &str, value: &str) -> AppResult<HttpMethod> {
    HttpMethod::parse(value.trim()).ok_or_else(|| {
        AppError::requests(RequestFileError::UnknownMethod {
            location: location.to_owned(),
            method: value.to_owned(),
        })
    })
}

pub(super) fn url(location: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::requests(RequestFileError::EmptyUrl {
            location: location.to_owned(),
        }));
    }
    url::Url::parse(value).map_err(|err| {
        AppError::requests(RequestFileError::InvalidUrl {
            location: location.to_owned(),
            url: value.to_owned(),
            source: err,
        })
    })?;
    Ok(value.to_owned())
}

pub(super) fn header(location: &str, name: &str, value: &str) -> AppResult<(String, String)> {
    let name = name.trim();
    let value = value.trim();
    HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
        AppError::requests(RequestFileError::HeaderName {
            location: location.to_owned(),
            name: name.to_owned(),
            source: err,
        })
    })?;
    HeaderValue::from_str(value).map_err(|err| {
        AppError::requests(RequestFileError::HeaderValue {
            location: location.to_owned(),
            name: name.to_owned(),
            source: err,
        })
    })?;
    Ok((name.to_owned(), value.to_owned()))
}

/// Parses a `Name: Value` header line.
pub(super) fn header_line(location: &str, line: &str) -> AppResult<(String, String)> {
    match line.split_once(':') {
        Some((name, value)) => header(location, name, value),
        None => Err(AppError::requests(RequestFileError::HeaderFormat {
            location: location.to_owned(),
            value: line.to_owned(),
        })),
    }
}

/// Decodes a base64 payload into the raw bytes that go on the wire.
pub(super) fn payload64(location: &str, encoded: &str) -> AppResult<Bytes> {
    let encoded = encoded.trim();
    let length = encoded.len();
    if length == 0 || !length.is_multiple_of(4) {
        return Err(AppError::requests(RequestFileError::PayloadLength {
            location: location.to_owned(),
            length,
        }));
    }
    let decoded = B64.decode(encoded.as_bytes()).map_err(|err| {
        AppError::requests(RequestFileError::PayloadDecode {
            location: location.to_owned(),
            source: err,
        })
    })?;
    Ok(Bytes::from(decoded))
}

pub(super) fn payload_allowed(
    location: &str,
    method: HttpMethod,
    payload: Option<Bytes>,
) -> AppResult<Option<Bytes>> {
    match (method, payload) {
        (HttpMethod::Get, Some(_)) => Err(AppError::requests(RequestFileError::PayloadOnGet {
            location: location.to_owned(),
        })),
        (HttpMethod::Get, None) => Ok(None),
        (HttpMethod::Post, payload) => Ok(payload),
    }
}
