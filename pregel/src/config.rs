use crate::errors::PregelError;
use serde::{Deserialize, Serialize};
use std::thread;

/// How the node id space is split between worker tasks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partitioning {
    /// Equally sized ranges of node ids
    #[default]
    Range,
    /// Ranges holding roughly the same number of relationships
    Degree,
    /// `Degree` if the graph has relationships, `Range` otherwise
    Auto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PregelConfig {
    pub max_iterations: usize,
    pub concurrency: usize,
    pub is_asynchronous: bool,
    pub track_sender: bool,
    pub partitioning: Partitioning,
}

impl Default for PregelConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            concurrency: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            is_asynchronous: false,
            track_sender: false,
            partitioning: Partitioning::Range,
        }
    }
}

impl PregelConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_asynchronous(mut self, is_asynchronous: bool) -> Self {
        self.is_asynchronous = is_asynchronous;
        self
    }

    pub fn with_track_sender(mut self, track_sender: bool) -> Self {
        self.track_sender = track_sender;
        self
    }

    pub fn with_partitioning(mut self, partitioning: Partitioning) -> Self {
        self.partitioning = partitioning;
        self
    }

    pub fn validate(&self) -> Result<(), PregelError> {
        if self.max_iterations == 0 {
            return Err(PregelError::InvalidMaxIterations(self.max_iterations));
        }
        if self.concurrency == 0 {
            return Err(PregelError::InvalidConcurrency(self.concurrency));
        }
        Ok(())
    }
}
