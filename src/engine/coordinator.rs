use std::any::Any;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::domain::{RequestSpec, RunConfig};
use crate::error::{AppError, AppResult, EngineError};

use super::clock::RunClock;
use super::result::RequestResult;
use super::transport::Transport;
use super::worker::run_worker;

/// Everything one worker produced, in issue order.
#[derive(Debug)]
pub struct WorkerReport<'req> {
    pub index: usize,
    pub results: Vec<RequestResult<'req>>,
}

#[derive(Debug)]
pub struct RunOutcome<'req> {
    /// Reports in worker-index order.
    pub workers: Vec<WorkerReport<'req>>,
    pub elapsed: Duration,
}

impl<'req> RunOutcome<'req> {
    /// Every result, worker by worker, each in completion order.
    pub fn results(&self) -> impl Iterator<Item = &RequestResult<'req>> {
        self.workers.iter().flat_map(|worker| worker.results.iter())
    }

    #[must_use]
    pub fn total_requests(&self) -> usize {
        self.workers
            .iter()
            .fold(0usize, |total, worker| total.saturating_add(worker.results.len()))
    }
}

/// Runs `config.concurrency` workers against `requests` and waits for all
/// of them.
///
/// `connect` is called once on each worker thread to create that worker's
/// transport.
///
/// # Errors
///
/// Returns an error when the request set is empty, a worker thread cannot
/// be spawned, or any worker fails or panics. No partial results are
/// returned.
pub fn run_load<'req, T, F>(
    requests: &'req [RequestSpec],
    config: &RunConfig,
    connect: F,
) -> AppResult<RunOutcome<'req>>
where
    T: Transport,
    F: Fn(usize) -> AppResult<T> + Sync,
{
    if requests.is_empty() {
        return Err(AppError::engine(EngineError::EmptyRequestSet));
    }

    let concurrency = config.concurrency.get();
    info!(
        "Starting {} workers over {} requests ({})",
        concurrency,
        requests.len(),
        config.termination.describe()
    );

    let clock = RunClock::start();
    let started = Instant::now();
    let connect = &connect;
    let clock_ref = &clock;

    let joined = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(concurrency);
        let mut spawn_error = None;
        for index in 0..concurrency {
            let spawned = thread::Builder::new()
                .name(format!("wideload-worker-{}", index))
                .spawn_scoped(scope, move || {
                    let transport = connect(index)?;
                    run_worker(index, requests, config, clock_ref, transport)
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    spawn_error = Some(EngineError::SpawnWorker { index, source: err });
                    break;
                }
            }
        }

        // Join everything that started before reporting any failure.
        let reports: Vec<AppResult<WorkerReport<'req>>> = handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                handle.join().unwrap_or_else(|payload| {
                    Err(AppError::engine(EngineError::WorkerPanicked {
                        index,
                        message: panic_message(payload.as_ref()),
                    }))
                })
            })
            .collect();
        (spawn_error, reports)
    });

    let (spawn_error, reports) = joined;
    if let Some(err) = spawn_error {
        return Err(AppError::engine(err));
    }
    let workers = reports.into_iter().collect::<AppResult<Vec<_>>>()?;

    Ok(RunOutcome {
        workers,
        elapsed: started.elapsed(),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_owned();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic payload".to_owned()
}
