use crate::errors::PregelError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

pub mod computation;
pub mod context;
pub(crate) mod compute_step;
pub mod partition;
pub mod task_runner;
pub mod termination;

/// A dedicated pool of `n_threads` workers for one run
pub fn custom_pool(n_threads: usize) -> Result<Arc<ThreadPool>, PregelError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .thread_name(|i| format!("pregel-{i}"))
        .build()?;

    Ok(Arc::new(pool))
}
