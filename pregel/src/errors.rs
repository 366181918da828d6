use crate::core::state::ValueType;
use pregel_api::core::entities::VID;

/// Error type user callbacks return to abort a run
pub type ComputeError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum PregelError {
    #[error("max_iterations must be at least 1, got {0}")]
    InvalidMaxIterations(usize),

    #[error("concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("Schema element '{0}' is defined more than once")]
    DuplicateSchemaElement(String),

    #[error("Default value for schema element '{key}' has type {actual} but the element is declared as {expected}")]
    DefaultValueTypeMismatch {
        key: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("No node value named '{0}' in the schema")]
    UnknownElement(String),

    #[error("Wrong type for node value {key}: expected {expected} but actual type is {actual}")]
    TypeMismatch {
        key: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("Node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: VID, node_count: usize },

    #[error("Node property '{0}' mixes long and double values")]
    InconsistentNodeProperty(String),

    #[error("Init failed for node {node}")]
    InitFailed {
        node: VID,
        #[source]
        source: ComputeError,
    },

    #[error("Compute failed for node {node} in superstep {superstep}")]
    ComputeFailed {
        node: VID,
        superstep: usize,
        #[source]
        source: ComputeError,
    },

    #[error("Failed to build thread pool")]
    ThreadPool {
        #[from]
        source: rayon::ThreadPoolBuildError,
    },
}

impl PregelError {
    /// Programming errors are reported at the call site rather than returned
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        panic!("{self}")
    }
}
