mod adapters;
mod app;
mod application;
mod args;
mod config;
mod domain;
mod engine;
mod entry;
mod error;
mod metrics;
mod requests;
mod system;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
