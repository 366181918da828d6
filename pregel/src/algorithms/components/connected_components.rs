use crate::{
    config::PregelConfig,
    core::{
        messages::{Messages, Min, Reducer},
        state::{PregelSchema, ValueType},
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

pub const COMPONENT: &str = "component";

/// Min-label propagation.
///
/// Every node ends up labelled with the smallest node id it can be reached
/// from, which on an undirected graph is the smallest id of its weakly
/// connected component.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectedComponents;

impl PregelComputation for ConnectedComponents {
    fn schema(&self, _config: &PregelConfig) -> Result<PregelSchema, PregelError> {
        PregelSchema::builder()
            .add(COMPONENT, ValueType::Long)
            .build()
    }

    fn compute(
        &self,
        ctx: &mut ComputeContext<'_>,
        messages: Messages<'_>,
    ) -> Result<(), ComputeError> {
        if ctx.is_initial_superstep() {
            let own = ctx.node_id().index() as i64;
            ctx.set_node_value(COMPONENT, own);
            ctx.send_to_neighbors(own as f64);
        } else {
            let current = ctx.long_value(COMPONENT);
            let candidate = messages.map(|m| m as i64).min();
            if let Some(candidate) = candidate.filter(|c| *c < current) {
                ctx.set_node_value(COMPONENT, candidate);
                ctx.send_to_neighbors(candidate as f64);
            }
        }
        ctx.vote_to_halt();
        Ok(())
    }

    fn reducer(&self) -> Option<Box<dyn Reducer>> {
        Some(Box::new(Min))
    }

    fn name(&self) -> &str {
        "ConnectedComponents"
    }
}

/// Component labels of an undirected `graph`
pub fn connected_components(
    graph: &dyn GraphView,
    config: PregelConfig,
) -> Result<PregelResult, PregelError> {
    Pregel::new(graph, config, ConnectedComponents)?.run()
}
