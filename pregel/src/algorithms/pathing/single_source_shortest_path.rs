//! Shortest path distances from a single source node.
//!
//! Unweighted graphs count hops, weighted graphs sum relationship weights.
use crate::{
    config::PregelConfig,
    core::{
        messages::{Messages, Min, Reducer},
        state::{PregelSchema, ValueType, Visibility},
    },
    db::{
        graph::GraphView,
        task::{
            computation::PregelComputation,
            context::{ComputeContext, NodeValueOps},
            task_runner::{Pregel, PregelResult},
        },
    },
    errors::{ComputeError, PregelError},
};
use pregel_api::core::entities::VID;

pub const DISTANCE: &str = "distance";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingleSourceShortestPath {
    source: VID,
}

impl SingleSourceShortestPath {
    pub fn new(source: VID) -> Self {
        Self { source }
    }
}

impl PregelComputation for SingleSourceShortestPath {
    fn schema(&self, _config: &PregelConfig) -> Result<PregelSchema, PregelError> {
        PregelSchema::builder()
            .add_with_default(DISTANCE, ValueType::Double, f64::INFINITY, Visibility::Public)
            .build()
    }

    fn compute(
        &self,
        ctx: &mut ComputeContext<'_>,
        messages: Messages<'_>,
    ) -> Result<(), ComputeError> {
        let current = ctx.double_value(DISTANCE);
        let distance = if ctx.is_initial_superstep() {
            (ctx.node_id() == self.source).then_some(0.0)
        } else {
            messages.fold(None, |best: Option<f64>, d| {
                Some(best.map_or(d, |b| b.min(d)))
            })
        };

        if let Some(distance) = distance.filter(|d| *d < current) {
            ctx.set_node_value(DISTANCE, distance);
            if ctx.has_relationship_weights() {
                ctx.send_to_neighbors(distance);
            } else {
                ctx.send_to_neighbors(distance + 1.0);
            }
        }
        ctx.vote_to_halt();
        Ok(())
    }

    fn reducer(&self) -> Option<Box<dyn Reducer>> {
        Some(Box::new(Min))
    }

    fn apply_relationship_weight(&self, value: f64, weight: f64) -> f64 {
        value + weight
    }

    fn name(&self) -> &str {
        "SingleSourceShortestPath"
    }
}

/// Distances from `source` to every node, `f64::INFINITY` where unreachable
pub fn single_source_shortest_path(
    graph: &dyn GraphView,
    source: VID,
    config: PregelConfig,
) -> Result<PregelResult, PregelError> {
    Pregel::new(graph, config, SingleSourceShortestPath::new(source))?.run()
}
