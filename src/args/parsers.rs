use super::types::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(super) fn parse_fail_status(s: &str) -> AppResult<u16> {
    let value = parse_positive_u64(s)?.get();
    status_threshold(value)
        .ok_or_else(|| AppError::validation(ValidationError::FailStatusOutOfRange { value }))
}

/// Narrows a positive threshold to a status code.
pub(crate) fn status_threshold(value: u64) -> Option<u16> {
    u16::try_from(value).ok().filter(|status| *status > 0)
}
