use crate::domain::RequestSpec;

/// Outcome of one executed request. Timestamps are microseconds on the
/// run's [`RunClock`](super::RunClock).
///
/// `time_start <= time_first_byte <= time_end` always holds; when no
/// response head ever arrived, `time_first_byte == time_end`.
#[derive(Debug, Clone, Copy)]
pub struct RequestResult<'req> {
    pub request: &'req RequestSpec,
    /// Response status, 0 until the head arrives; synthetic 598 when the
    /// transfer failed locally.
    pub status: u16,
    pub bytes_received: u64,
    pub time_start: u64,
    pub time_first_byte: u64,
    pub time_end: u64,
}

impl<'req> RequestResult<'req> {
    pub(crate) const fn started(request: &'req RequestSpec, time_start: u64) -> Self {
        Self {
            request,
            status: 0,
            bytes_received: 0,
            time_start,
            time_first_byte: time_start,
            time_end: time_start,
        }
    }

    #[must_use]
    pub const fn latency_micros(&self) -> u64 {
        self.time_end.saturating_sub(self.time_start)
    }
}
