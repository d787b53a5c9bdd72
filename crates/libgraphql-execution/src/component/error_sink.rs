use crate::component::ExecutionError;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// An append-only list of [`ExecutionError`]s, safe to append to from
/// concurrently resolving components.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Mutex<Vec<ExecutionError>>,
}
impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, error: ExecutionError) {
        self.lock().push(error);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A snapshot of the errors recorded so far, in the order they were
    /// appended.
    pub fn errors(&self) -> Vec<ExecutionError> {
        self.lock().clone()
    }

    pub fn into_errors(self) -> Vec<ExecutionError> {
        self.errors.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // A panic while holding the lock cannot leave a half-appended entry.
    fn lock(&self) -> MutexGuard<'_, Vec<ExecutionError>> {
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
