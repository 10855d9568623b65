mod support;

use std::time::Duration;

use super::accumulator::{CHUNK_CAPACITY, ResultAccumulator};
use super::clock::RunClock;
use super::coordinator::run_load;
use super::result::RequestResult;
use super::transport::{TIMEOUT_STATUS, Transport};
use super::worker::start_offset;
use crate::args::{PositiveU64, PositiveUsize};
use crate::domain::{RequestSpec, RunConfig, Termination};
use crate::error::{AppError, AppResult, EngineError};
use scripted::ScriptedTransport;

fn by_count(concurrency: usize, count: u64) -> AppResult<RunConfig> {
    Ok(RunConfig::new(
        PositiveUsize::try_from(concurrency)?,
        Termination::ByCount(PositiveU64::try_from(count)?),
    ))
}

fn two_requests() -> Vec<RequestSpec> {
    vec![
        RequestSpec::get("http://localhost/a"),
        RequestSpec::get("http://localhost/b"),
    ]
}

fn urls<'req>(results: &[RequestResult<'req>]) -> Vec<&'req str> {
    results
        .iter()
        .map(|result| result.request.url.as_str())
        .collect()
}

#[test]
fn by_count_issues_exact_count_per_worker() -> AppResult<()> {
    let requests = two_requests();
    let config = by_count(3, 4)?;
    let outcome = run_load(&requests, &config, |_| Ok(ScriptedTransport::ok()))?;

    if outcome.workers.len() != 3 {
        return Err(AppError::engine(format!(
            "Expected 3 worker reports, got {}",
            outcome.workers.len()
        )));
    }
    for (position, worker) in outcome.workers.iter().enumerate() {
        if worker.index != position {
            return Err(AppError::engine("Reports out of worker order"));
        }
        if worker.results.len() != 4 {
            return Err(AppError::engine(format!(
                "Worker {} issued {} requests",
                worker.index,
                worker.results.len()
            )));
        }
    }
    if outcome.total_requests() != 12 || outcome.results().count() != 12 {
        return Err(AppError::engine("Expected 12 results in total"));
    }
    Ok(())
}

#[test]
fn workers_cycle_through_the_request_set() -> AppResult<()> {
    let requests = two_requests();
    let config = by_count(2, 3)?;
    let outcome = run_load(&requests, &config, |_| Ok(ScriptedTransport::ok()))?;

    let expected = vec!["http://localhost/a", "http://localhost/b", "http://localhost/a"];
    for worker in &outcome.workers {
        if urls(&worker.results) != expected {
            return Err(AppError::engine(format!(
                "Unexpected sequence for worker {}: {:?}",
                worker.index,
                urls(&worker.results)
            )));
        }
        if worker.results.iter().any(|result| result.status != 200) {
            return Err(AppError::engine("Expected every status to be 200"));
        }
    }
    Ok(())
}

#[test]
fn randomized_start_is_reproducible_for_a_seed() -> AppResult<()> {
    let requests = vec![
        RequestSpec::get("http://localhost/a"),
        RequestSpec::get("http://localhost/b"),
        RequestSpec::get("http://localhost/c"),
    ];
    let mut config = by_count(4, 5)?;
    config.randomize_start = true;
    config.seed = 7;

    let first = run_load(&requests, &config, |_| Ok(ScriptedTransport::ok()))?;
    let second = run_load(&requests, &config, |_| Ok(ScriptedTransport::ok()))?;

    for (left, right) in first.workers.iter().zip(second.workers.iter()) {
        if urls(&left.results) != urls(&right.results) {
            return Err(AppError::engine("Same seed produced different sequences"));
        }
        let offset = start_offset(&config, left.index, requests.len())?;
        let Some(expected) = requests.get(offset) else {
            return Err(AppError::engine("Offset outside the request set"));
        };
        let first_url = left.results.first().map(|result| result.request.url.as_str());
        if first_url != Some(expected.url.as_str()) {
            return Err(AppError::engine(format!(
                "Worker {} did not start at offset {}",
                left.index, offset
            )));
        }
    }
    Ok(())
}

#[test]
fn start_offset_stays_in_range() -> AppResult<()> {
    let mut config = by_count(1, 1)?;
    if start_offset(&config, 3, 5)? != 0 {
        return Err(AppError::engine("Offset must be zero without randomization"));
    }
    config.randomize_start = true;
    for seed in 0..50u64 {
        config.seed = seed;
        for index in 0..4usize {
            if start_offset(&config, index, 5)? >= 5 {
                return Err(AppError::engine("Offset out of range"));
            }
        }
    }
    if start_offset(&config, 0, 1)? != 0 {
        return Err(AppError::engine("Single-entry set must start at zero"));
    }
    Ok(())
}

#[test]
fn empty_request_set_is_fatal() -> AppResult<()> {
    let requests: Vec<RequestSpec> = Vec::new();
    let config = by_count(2, 1)?;
    match run_load(&requests, &config, |_| Ok(ScriptedTransport::ok())) {
        Err(AppError::Engine(EngineError::EmptyRequestSet)) => {}
        Err(err) => return Err(AppError::engine(format!("Unexpected error: {}", err))),
        Ok(_) => return Err(AppError::engine("Expected empty set to fail")),
    }
    let mut randomized = config;
    randomized.randomize_start = true;
    match start_offset(&randomized, 0, 0) {
        Err(AppError::Engine(EngineError::EmptyRequestSet)) => Ok(()),
        Err(err) => Err(AppError::engine(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::engine("Expected empty set to fail")),
    }
}

#[test]
fn timestamps_are_ordered_and_failures_marked() -> AppResult<()> {
    let requests = two_requests();
    let config = by_count(2, 4)?;
    let outcome = run_load(&requests, &config, |_| {
        Ok(ScriptedTransport::ok()
            .delayed(Duration::from_millis(1))
            .failing_on(1))
    })?;

    for worker in &outcome.workers {
        for (call, result) in worker.results.iter().enumerate() {
            if result.time_start > result.time_first_byte || result.time_first_byte > result.time_end
            {
                return Err(AppError::engine("Timestamps out of order"));
            }
            if call == 1 {
                if result.status != TIMEOUT_STATUS {
                    return Err(AppError::engine(format!(
                        "Expected synthetic status, got {}",
                        result.status
                    )));
                }
                if result.time_first_byte != result.time_end || result.bytes_received != 0 {
                    return Err(AppError::engine("Failed transfer must not record a response"));
                }
            } else if result.status != 200 || result.bytes_received == 0 {
                return Err(AppError::engine("Transfer after a failure should succeed"));
            }
        }
        let starts: Vec<u64> = worker.results.iter().map(|result| result.time_start).collect();
        if starts.windows(2).any(|pair| pair.first() > pair.get(1)) {
            return Err(AppError::engine("Worker results out of issue order"));
        }
    }
    Ok(())
}

#[test]
fn by_duration_stops_after_deadline() -> AppResult<()> {
    let requests = two_requests();
    let config = RunConfig::new(
        PositiveUsize::try_from(2)?,
        Termination::ByDuration(Duration::from_millis(60)),
    );
    let outcome = run_load(&requests, &config, |_| {
        Ok(ScriptedTransport::ok().delayed(Duration::from_millis(5)))
    })?;

    for worker in &outcome.workers {
        if worker.results.is_empty() {
            return Err(AppError::engine("Each worker should finish some requests"));
        }
    }
    if outcome.elapsed >= Duration::from_secs(5) {
        return Err(AppError::engine("Duration run did not stop"));
    }
    Ok(())
}

#[test]
fn accumulator_seals_full_chunks_in_order() -> AppResult<()> {
    let spec = RequestSpec::get("http://localhost/a");
    let mut accumulator = ResultAccumulator::new();
    if !accumulator.is_empty() {
        return Err(AppError::engine("New accumulator should be empty"));
    }
    for time in 0..2500u64 {
        accumulator.push(RequestResult::started(&spec, time));
    }

    let sealed = accumulator.sealed_chunks();
    if sealed.len() != 2 || sealed.iter().any(|chunk| chunk.len() != CHUNK_CAPACITY) {
        return Err(AppError::engine("Expected two full sealed chunks"));
    }
    if accumulator.active_len() != 500 || accumulator.len() != 2500 {
        return Err(AppError::engine(format!(
            "Unexpected counts: active {}, total {}",
            accumulator.active_len(),
            accumulator.len()
        )));
    }

    let results = accumulator.into_results()?;
    let in_order = results
        .iter()
        .zip(0..2500u64)
        .all(|(result, time)| result.time_start == time);
    if results.len() != 2500 || !in_order {
        return Err(AppError::engine("Flattened results lost order"));
    }
    Ok(())
}

#[test]
fn accumulator_exact_chunk_boundary() -> AppResult<()> {
    let spec = RequestSpec::get("http://localhost/a");
    let mut accumulator = ResultAccumulator::new();
    for time in 0..1000u64 {
        accumulator.push(RequestResult::started(&spec, time));
    }
    if accumulator.sealed_chunks().len() != 1 || accumulator.active_len() != 0 {
        return Err(AppError::engine("Full chunk should be sealed immediately"));
    }
    if accumulator.into_results()?.len() != 1000 {
        return Err(AppError::engine("Expected 1000 results"));
    }
    Ok(())
}

#[test]
fn connect_failure_aborts_run() -> AppResult<()> {
    let requests = two_requests();
    let config = by_count(3, 2)?;
    let result = run_load(&requests, &config, |index| {
        if index == 1 {
            Err(AppError::engine(EngineError::DeadlineOverflow))
        } else {
            Ok(ScriptedTransport::ok())
        }
    });
    match result {
        Err(AppError::Engine(EngineError::DeadlineOverflow)) => Ok(()),
        Err(err) => Err(AppError::engine(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::engine("Expected the run to fail")),
    }
}

#[test]
fn fatal_transport_error_aborts_run() -> AppResult<()> {
    let requests = two_requests();
    let config = by_count(2, 5)?;
    let result = run_load(&requests, &config, |_| Ok(ScriptedTransport::ok().fatal_on(2)));
    if result.is_ok() {
        return Err(AppError::engine("Expected the run to fail"));
    }
    Ok(())
}

#[test]
fn failed_transfer_reconnects_before_next_request() -> AppResult<()> {
    let spec = RequestSpec::get("http://localhost/a");
    let clock = RunClock::start();
    let mut transport = ScriptedTransport::with_status(503).failing_on(0);

    let failed = transport.execute(&spec, &clock)?;
    let next = transport.execute(&spec, &clock)?;
    if failed.status != TIMEOUT_STATUS || transport.reconnects != 1 {
        return Err(AppError::engine("Expected one synthetic failure"));
    }
    if next.status != 503 {
        return Err(AppError::engine(format!(
            "Server status should pass through, got {}",
            next.status
        )));
    }
    Ok(())
}
