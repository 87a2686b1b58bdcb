use fonthunter_traits::{Executor, ExecutorError};
use rayon::ThreadPool;
use rayon::prelude::*;
use std::sync::Arc;

/// Executes items on a dedicated rayon pool.
///
/// The pool is shared between clones, so a pipeline and its clones never
/// exceed the configured thread count.
#[derive(Clone, Debug)]
pub struct RayonExecutor {
    pool: Arc<ThreadPool>,
}

impl RayonExecutor {
    /// Creates a pool with one thread per logical CPU.
    pub fn new() -> Result<Self, ExecutorError> {
        Self::with_threads(rayon::current_num_threads())
    }

    pub fn with_threads(threads: usize) -> Result<Self, ExecutorError> {
        if threads == 0 {
            return Err(ExecutorError::InvalidParallelism(threads));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fonthunter-fetch-{}", i))
            .build()
            .map_err(|e| ExecutorError::PoolBuild(e.to_string()))?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        // `collect` on an indexed parallel iterator keeps input order.
        self.pool.install(|| items.into_par_iter().map(f).collect())
    }

    fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn name(&self) -> &'static str {
        "RayonExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_rayon_executor_preserves_order_despite_completion_order() {
        let exec = RayonExecutor::with_threads(4).unwrap();
        let results = exec.execute_all(vec![40u64, 1, 20, 5], |delay| {
            thread::sleep(Duration::from_millis(delay));
            delay
        });
        assert_eq!(results, vec![40, 1, 20, 5]);
    }

    #[test]
    fn test_rayon_executor_fallible() {
        let exec = RayonExecutor::with_threads(2).unwrap();
        let results = exec.execute_all_fallible(vec![1, 2, 3, 4], |x| {
            if x % 2 == 0 { Err(x) } else { Ok(x) }
        });
        assert_eq!(results, vec![Ok(1), Err(2), Ok(3), Err(4)]);
    }

    #[test]
    fn test_rayon_executor_rejects_zero_threads() {
        assert!(RayonExecutor::with_threads(0).is_err());
    }
}
