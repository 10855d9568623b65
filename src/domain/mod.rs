//! Immutable run inputs shared read-only by every worker.
pub mod request;
pub mod run;

pub use request::{HttpMethod, RequestSpec};
pub use run::{RunConfig, Termination};
