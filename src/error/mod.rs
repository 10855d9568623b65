mod app;
mod config;
mod engine;
mod export;
mod requests;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use engine::EngineError;
pub use export::ExportError;
pub use requests::RequestFileError;
pub use validation::ValidationError;
