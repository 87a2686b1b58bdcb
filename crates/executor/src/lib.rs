//! Executor implementations for the fonthunter pipeline.
//!
//! Font downloads within one run are independent, so they can be fanned out
//! over a small worker pool and reduced in input order afterwards.
//!
//! ## Available Executors
//!
//! - [`RayonExecutor`]: Bounded work-stealing thread pool (feature: `rayon`)
//! - [`SyncExecutor`]: Sequential execution (re-exported from fonthunter-traits)
//!
//! ## Usage
//!
//! ```ignore
//! use fonthunter_executor::{ExecutorImpl, RayonExecutor};
//! use fonthunter_traits::Executor;
//!
//! let executor = ExecutorImpl::Rayon(RayonExecutor::with_threads(4)?);
//! let results = executor.execute_all(vec![1, 2, 3], |x| x * 2);
//! ```

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

// Re-export from fonthunter-traits
pub use fonthunter_traits::{Executor, ExecutorError, SyncExecutor};

/// A type-erased executor that wraps concrete executor implementations.
///
/// Since the `Executor` trait has generic methods, it cannot be used as a trait object
/// (`dyn Executor`). This enum provides a workaround by holding concrete executor types
/// and delegating method calls to them.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    /// Sequential executor (no parallelism)
    Sync(SyncExecutor),

    /// Rayon work-stealing thread pool executor
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl ExecutorImpl {
    /// Picks a pool bounded to `max_parallel` workers, or the sequential
    /// executor when no parallelism is wanted.
    pub fn bounded(max_parallel: usize) -> Result<Self, ExecutorError> {
        if max_parallel == 0 {
            return Err(ExecutorError::InvalidParallelism(max_parallel));
        }
        #[cfg(feature = "rayon")]
        {
            if max_parallel > 1 {
                return RayonExecutor::with_threads(max_parallel).map(ExecutorImpl::Rayon);
            }
        }
        Ok(ExecutorImpl::Sync(SyncExecutor::new()))
    }
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all(items, f),
        }
    }

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all_fallible(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all_fallible(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}

impl Default for ExecutorImpl {
    fn default() -> Self {
        ExecutorImpl::Sync(SyncExecutor::new())
    }
}
