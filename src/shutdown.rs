use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative stop signal shared between the interrupt handler and a run.
///
/// Once set it stays set until [`CancellationFlag::clear`] is called. The CLI
/// never clears it, so a batch stops at the first interrupt.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Returns `true` if it was already set.
    pub fn cancel(&self) -> bool {
        self.0.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};

    #[test]
    fn flag_is_shared_between_clones() -> AppResult<()> {
        let flag = CancellationFlag::new();
        let observer = flag.clone();
        if observer.is_cancelled() {
            return Err(AppError::validation("Flag should start cleared"));
        }
        if flag.cancel() {
            return Err(AppError::validation("First cancel should report unset"));
        }
        if !observer.is_cancelled() {
            return Err(AppError::validation("Clone should observe cancel"));
        }
        if !flag.cancel() {
            return Err(AppError::validation("Second cancel should report set"));
        }
        observer.clear();
        if flag.is_cancelled() {
            return Err(AppError::validation("Clear should reset every clone"));
        }
        Ok(())
    }
}
