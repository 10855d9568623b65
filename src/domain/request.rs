use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Case-insensitive method lookup used by the request-file loaders.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("get") {
            Some(HttpMethod::Get)
        } else if value.eq_ignore_ascii_case("post") {
            Some(HttpMethod::Post)
        } else {
            None
        }
    }
}

/// One request to replay. Built once by the loader, then shared by
/// reference with every worker for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    /// Raw body bytes sent as-is on POST; `Bytes` so each send is a cheap
    /// reference-count bump instead of a copy.
    pub payload: Option<Bytes>,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            payload: None,
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn post(url: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            payload: Some(payload.into()),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.payload.as_ref().map_or(0, Bytes::len)
    }
}
