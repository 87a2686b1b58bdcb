//! Executor trait for running independent work items.
//!
//! Results are always returned in input order, whatever order the items
//! actually complete in.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),

    #[error("Invalid parallelism: {0}")]
    InvalidParallelism(usize),
}

/// A strategy for mapping a function over a batch of items.
///
/// The generic methods keep this trait out of `dyn` position; use a concrete
/// executor or an enum wrapper instead.
pub trait Executor: Send + Sync {
    /// Apply `f` to every item, returning results in input order.
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// Like [`Executor::execute_all`] for fallible work. One failure never
    /// cancels the other items.
    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        self.execute_all(items, f)
    }

    /// Upper bound on how many items run at once.
    fn parallelism(&self) -> usize;

    /// Returns a human-readable name for this executor (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Runs every item on the calling thread, one after another.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}
