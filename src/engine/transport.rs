use std::io::{ErrorKind, Read};
use std::time::Duration;

use bytes::Bytes;
use reqwest::blocking::{Client, Request};
use reqwest::redirect;
use thiserror::Error;
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::domain::{HttpMethod, RequestSpec, RunConfig};
use crate::error::{AppError, AppResult, EngineError};

use super::clock::RunClock;
use super::result::RequestResult;

/// Non-standard status recorded when a transfer fails locally (timeout or
/// I/O error). Some proxies use it for read timeouts.
pub const TIMEOUT_STATUS: u16 = 598;

const READ_BUFFER_SIZE: usize = 16 * 1024;

/// One worker's connection handle.
pub trait Transport {
    /// Executes `spec` once and reports what happened.
    ///
    /// Transfer failures are not errors: they come back as a result with
    /// [`TIMEOUT_STATUS`], and the transport replaces its handle before the
    /// next request.
    ///
    /// # Errors
    ///
    /// Returns an error only when the request cannot be built or the handle
    /// cannot be recreated; both are fatal to the run.
    fn execute<'req>(
        &mut self,
        spec: &'req RequestSpec,
        clock: &RunClock,
    ) -> AppResult<RequestResult<'req>>;

    /// Releases the handle when the worker is done.
    fn teardown(self)
    where
        Self: Sized;
}

/// Handlers a transport calls while a transfer is in flight. Bound to one
/// result for one request only.
pub struct TransferRecorder<'res, 'req> {
    result: &'res mut RequestResult<'req>,
    clock: &'res RunClock,
}

impl TransferRecorder<'_, '_> {
    /// Response head arrived. Only the first call counts.
    pub fn on_header(&mut self, status: u16) {
        if self.result.status == 0 {
            self.result.status = status;
            self.result.time_first_byte = self.clock.now_micros();
        }
    }

    pub fn on_body_chunk(&mut self, len: usize) {
        let len = u64::try_from(len).unwrap_or(u64::MAX);
        self.result.bytes_received = self.result.bytes_received.saturating_add(len);
    }
}

/// Times one transfer and applies the first-byte convention.
///
/// The recorder handed to `transfer` is dropped before the result is
/// returned, so nothing can touch the result after this call.
pub fn instrumented<'req, E, F>(
    spec: &'req RequestSpec,
    clock: &RunClock,
    transfer: F,
) -> (RequestResult<'req>, Result<(), E>)
where
    F: FnOnce(&mut TransferRecorder<'_, 'req>) -> Result<(), E>,
{
    let mut result = RequestResult::started(spec, clock.now_micros());
    let outcome = {
        let mut recorder = TransferRecorder {
            result: &mut result,
            clock,
        };
        transfer(&mut recorder)
    };
    result.time_end = clock.now_micros();
    if result.status == 0 {
        result.time_first_byte = result.time_end;
    }
    (result, outcome)
}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub user_agent: String,
    /// Whole-request timeout; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl From<&RunConfig> for TransportSettings {
    fn from(config: &RunConfig) -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: config.fail_after,
        }
    }
}

#[derive(Debug, Error)]
enum TransferError {
    #[error("request failed: {0}")]
    Send(#[source] reqwest::Error),
    #[error("reading response body failed: {0}")]
    Body(#[source] std::io::Error),
}

/// Blocking HTTP transport. The client keeps its connection alive across
/// requests until a transfer fails, at which point it is thrown away so a
/// half-read socket is never reused.
pub struct HttpTransport {
    settings: TransportSettings,
    client: Client,
    buffer: Vec<u8>,
    reconnects: u64,
}

impl HttpTransport {
    /// Creates the client handle for one worker.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn prepare(settings: &TransportSettings) -> AppResult<Self> {
        Ok(Self {
            settings: settings.clone(),
            client: build_client(settings)?,
            buffer: vec![0; READ_BUFFER_SIZE],
            reconnects: 0,
        })
    }

    /// Number of times the handle was replaced after a failed transfer.
    #[must_use]
    pub const fn reconnects(&self) -> u64 {
        self.reconnects
    }

    fn reconnect(&mut self) -> AppResult<()> {
        let fresh = build_client(&self.settings)?;
        drop(std::mem::replace(&mut self.client, fresh));
        self.reconnects = self.reconnects.saturating_add(1);
        Ok(())
    }

    fn build_request(&self, spec: &RequestSpec) -> AppResult<Request> {
        let mut builder = match spec.method {
            HttpMethod::Get => self.client.get(&spec.url),
            HttpMethod::Post => self
                .client
                .post(&spec.url)
                .body(spec.payload.clone().unwrap_or_else(Bytes::new)),
        };
        for (name, value) in &spec.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.build().map_err(|err| {
            AppError::engine(EngineError::BuildRequest {
                url: spec.url.clone(),
                source: err,
            })
        })
    }
}

impl Transport for HttpTransport {
    fn execute<'req>(
        &mut self,
        spec: &'req RequestSpec,
        clock: &RunClock,
    ) -> AppResult<RequestResult<'req>> {
        let request = self.build_request(spec)?;
        let client = &self.client;
        let buffer = &mut self.buffer;
        let (mut result, outcome) =
            instrumented(spec, clock, |recorder| perform(client, request, recorder, buffer));

        if let Err(err) = outcome {
            debug!(
                "{} {} failed after {}us: {}",
                spec.method.as_str(),
                spec.url,
                result.latency_micros(),
                err
            );
            self.reconnect()?;
            result.status = TIMEOUT_STATUS;
        }
        Ok(result)
    }

    fn teardown(self) {
        debug!("Closing transport after {} reconnects", self.reconnects);
    }
}

fn build_client(settings: &TransportSettings) -> AppResult<Client> {
    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.timeout)
        .redirect(redirect::Policy::none())
        .build()
        .map_err(|err| AppError::engine(EngineError::BuildClient { source: err }))
}

fn perform(
    client: &Client,
    request: Request,
    recorder: &mut TransferRecorder<'_, '_>,
    buffer: &mut [u8],
) -> Result<(), TransferError> {
    let mut response = client.execute(request).map_err(TransferError::Send)?;
    recorder.on_header(response.status().as_u16());
    loop {
        match response.read(buffer) {
            Ok(0) => return Ok(()),
            Ok(read) => recorder.on_body_chunk(read),
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(TransferError::Body(err)),
        }
    }
}
