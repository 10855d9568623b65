//! Load-generation engine: a fixed pool of worker threads, each owning one
//! transport and cycling through the shared request set until its
//! termination policy is met.
mod accumulator;
mod clock;
mod coordinator;
mod result;
mod transport;
mod worker;

#[cfg(test)]
mod tests;

pub use accumulator::{CHUNK_CAPACITY, ResultAccumulator};
pub use clock::RunClock;
pub use coordinator::{RunOutcome, WorkerReport, run_load};
pub use result::RequestResult;
pub use transport::{
    HttpTransport, TIMEOUT_STATUS, TransferRecorder, Transport, TransportSettings, instrumented,
};
