use crate::{
    config::PregelConfig,
    core::{
        messages::{Messages, Reducer},
        state::PregelSchema,
    },
    db::task::context::{ComputeContext, InitContext, MasterComputeContext},
    errors::{ComputeError, PregelError},
};
use std::{fmt, sync::Arc};

/// A vertex-centric algorithm.
///
/// Only [`schema`](Self::schema) and [`compute`](Self::compute) are
/// required. The computation value itself carries the algorithm parameters.
pub trait PregelComputation: Send + Sync {
    /// Layout of the per-node values, called once before the run starts
    fn schema(&self, config: &PregelConfig) -> Result<PregelSchema, PregelError>;

    /// Called once per node before the first superstep
    fn init(&self, _ctx: &mut InitContext<'_>) -> Result<(), ComputeError> {
        Ok(())
    }

    /// Called once per active node and superstep
    fn compute(&self, ctx: &mut ComputeContext<'_>, messages: Messages<'_>)
        -> Result<(), ComputeError>;

    /// Called after every superstep on a single thread.
    ///
    /// Returning `true` ends the run as converged.
    fn master_compute(&self, _ctx: &mut MasterComputeContext<'_>) -> bool {
        false
    }

    /// Combiner for the messages addressed to the same node
    fn reducer(&self) -> Option<Box<dyn Reducer>> {
        None
    }

    /// Value actually sent along a weighted relationship by
    /// [`ComputeContext::send_to_neighbors`]
    fn apply_relationship_weight(&self, value: f64, _weight: f64) -> f64 {
        value
    }

    fn name(&self) -> &str {
        "Pregel"
    }
}

impl<R: Reducer + ?Sized> Reducer for Arc<R> {
    fn identity(&self) -> f64 {
        (**self).identity()
    }

    fn reduce(&self, current: f64, message: f64) -> f64 {
        (**self).reduce(current, message)
    }
}

/// A computation made of a fixed schema and a compute closure
pub struct ComputeFn<F> {
    name: String,
    schema: PregelSchema,
    reducer: Option<Arc<dyn Reducer>>,
    compute: F,
}

impl<F> fmt::Debug for ComputeFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeFn")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("reducer", &self.reducer)
            .finish()
    }
}

impl<F> ComputeFn<F> {
    pub fn new(name: impl Into<String>, schema: PregelSchema, compute: F) -> Self
    where
        F: Fn(&mut ComputeContext<'_>, Messages<'_>) -> Result<(), ComputeError> + Send + Sync,
    {
        Self {
            name: name.into(),
            schema,
            reducer: None,
            compute,
        }
    }

    pub fn with_reducer(mut self, reducer: impl Reducer + 'static) -> Self {
        self.reducer = Some(Arc::new(reducer));
        self
    }
}

impl<F> PregelComputation for ComputeFn<F>
where
    F: Fn(&mut ComputeContext<'_>, Messages<'_>) -> Result<(), ComputeError> + Send + Sync,
{
    fn schema(&self, _config: &PregelConfig) -> Result<PregelSchema, PregelError> {
        Ok(self.schema.clone())
    }

    fn compute(
        &self,
        ctx: &mut ComputeContext<'_>,
        messages: Messages<'_>,
    ) -> Result<(), ComputeError> {
        (self.compute)(ctx, messages)
    }

    fn reducer(&self) -> Option<Box<dyn Reducer>> {
        self.reducer
            .clone()
            .map(|reducer| Box::new(reducer) as Box<dyn Reducer>)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
