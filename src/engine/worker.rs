use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::args::PositiveU64;
use crate::domain::{RequestSpec, RunConfig, Termination};
use crate::error::{AppError, AppResult, EngineError};

use super::accumulator::ResultAccumulator;
use super::clock::RunClock;
use super::coordinator::WorkerReport;
use super::result::RequestResult;
use super::transport::Transport;

/// Drives one worker to completion: cycles the request set from its start
/// offset until the termination policy is met, then tears down the
/// transport.
pub(super) fn run_worker<'req, T>(
    index: usize,
    requests: &'req [RequestSpec],
    config: &RunConfig,
    clock: &RunClock,
    mut transport: T,
) -> AppResult<WorkerReport<'req>>
where
    T: Transport,
{
    let offset = start_offset(config, index, requests.len())?;
    let mut cycle = requests.iter().cycle().skip(offset);

    let results = match config.termination {
        Termination::ByCount(count) => run_by_count(&mut transport, &mut cycle, clock, count)?,
        Termination::ByDuration(duration) => {
            run_by_duration(&mut transport, &mut cycle, clock, duration)?
        }
    };
    transport.teardown();

    debug!(
        "Worker {} finished {} requests starting at offset {}",
        index,
        results.len(),
        offset
    );
    Ok(WorkerReport { index, results })
}

/// Position in the request set where worker `index` begins.
///
/// Zero unless randomized; randomized offsets come from a generator owned
/// by this worker alone, seeded from the run seed and the worker index.
pub(super) fn start_offset(config: &RunConfig, index: usize, len: usize) -> AppResult<usize> {
    if len == 0 {
        return Err(AppError::engine(EngineError::EmptyRequestSet));
    }
    if !config.randomize_start {
        return Ok(0);
    }
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index));
    Ok(rng.gen_range(0..len))
}

fn run_by_count<'req, T, I>(
    transport: &mut T,
    cycle: &mut I,
    clock: &RunClock,
    count: PositiveU64,
) -> AppResult<Vec<RequestResult<'req>>>
where
    T: Transport,
    I: Iterator<Item = &'req RequestSpec>,
{
    let Ok(count) = usize::try_from(count.get()) else {
        return Err(AppError::engine(EngineError::RequestCountTooLarge {
            count: count.get(),
        }));
    };
    let mut results = Vec::new();
    results.try_reserve_exact(count).map_err(|err| {
        AppError::engine(EngineError::ResultAllocation {
            requested: count,
            source: err,
        })
    })?;
    for spec in cycle.take(count) {
        results.push(transport.execute(spec, clock)?);
    }
    Ok(results)
}

fn run_by_duration<'req, T, I>(
    transport: &mut T,
    cycle: &mut I,
    clock: &RunClock,
    duration: Duration,
) -> AppResult<Vec<RequestResult<'req>>>
where
    T: Transport,
    I: Iterator<Item = &'req RequestSpec>,
{
    let deadline = Instant::now()
        .checked_add(duration)
        .ok_or_else(|| AppError::engine(EngineError::DeadlineOverflow))?;
    let mut accumulator = ResultAccumulator::new();

    // The deadline is only checked between requests; one already in flight
    // always completes.
    while Instant::now() < deadline {
        let Some(spec) = cycle.next() else {
            break;
        };
        accumulator.push(transport.execute(spec, clock)?);
    }
    accumulator.into_results()
}
