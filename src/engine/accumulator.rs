use crate::error::{AppError, AppResult, EngineError};

use super::result::RequestResult;

/// Results per chunk when the final count is not known up front.
pub const CHUNK_CAPACITY: usize = 1000;

/// Bounded-growth result buffer for duration-limited workers.
///
/// Results land in an active chunk; once it holds [`CHUNK_CAPACITY`]
/// entries it is sealed and a fresh chunk begins, so no single buffer ever
/// has to grow past one chunk.
#[derive(Debug)]
pub struct ResultAccumulator<'req> {
    sealed: Vec<Vec<RequestResult<'req>>>,
    active: Vec<RequestResult<'req>>,
}

impl Default for ResultAccumulator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'req> ResultAccumulator<'req> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sealed: Vec::new(),
            active: Vec::with_capacity(CHUNK_CAPACITY),
        }
    }

    pub fn push(&mut self, result: RequestResult<'req>) {
        self.active.push(result);
        if self.active.len() >= CHUNK_CAPACITY {
            let full = std::mem::replace(&mut self.active, Vec::with_capacity(CHUNK_CAPACITY));
            self.sealed.push(full);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sealed
            .len()
            .saturating_mul(CHUNK_CAPACITY)
            .saturating_add(self.active.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sealed.is_empty() && self.active.is_empty()
    }

    #[must_use]
    pub fn sealed_chunks(&self) -> &[Vec<RequestResult<'req>>] {
        &self.sealed
    }

    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Flattens every chunk, in push order, into one buffer sized exactly
    /// to the number of results.
    ///
    /// # Errors
    ///
    /// Returns an error when the flat buffer cannot be allocated.
    pub fn into_results(self) -> AppResult<Vec<RequestResult<'req>>> {
        let total = self.len();
        let mut results = Vec::new();
        results.try_reserve_exact(total).map_err(|err| {
            AppError::engine(EngineError::ResultAllocation {
                requested: total,
                source: err,
            })
        })?;
        for chunk in self.sealed {
            results.extend(chunk);
        }
        results.extend(self.active);
        Ok(results)
    }
}
