//! Core library for the `wideload` CLI.
//!
//! The building blocks behind the binary: CLI argument types, configuration
//! parsing, request-file loading, the thread-per-worker load engine, and
//! latency aggregation. The primary user-facing interface is the `wideload`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod requests;
