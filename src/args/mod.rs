//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::TesterArgs;
pub use types::{PositiveU64, PositiveUsize, RequestFormat};

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_RESULTS_PATH, DEFAULT_USER_AGENT};
