//! PageRank with per-node convergence.
//!
//! Scores are not normalised: a node with no incoming rank scores
//! `1 - damping_factor`. Every node keeps sending its share each superstep,
//! the run converges once no score moved by more than `tolerance`.
use crate::{
    config::PregelConfig,
    core::{
        messages::{Messages, Reducer, Sum},
        state::{PregelSchema, ValueType, Visibility},
    },
    db::{
        graph::GraphView,
        task::{
            computation::PregelComputation,
            context::{ComputeContext, MasterComputeContext, NodeValueOps},
            task_runner::{Pregel, PregelResult},
        },
    },
    errors::{ComputeError, PregelError},
};
use serde::{Deserialize, Serialize};

pub const PAGE_RANK: &str = "pagerank";
const DELTA: &str = "delta";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRank {
    pub damping_factor: f64,
    pub tolerance: f64,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            tolerance: 1e-7,
        }
    }
}

impl PregelComputation for PageRank {
    fn schema(&self, _config: &PregelConfig) -> Result<PregelSchema, PregelError> {
        PregelSchema::builder()
            .add_with_default(
                PAGE_RANK,
                ValueType::Double,
                1.0 - self.damping_factor,
                Visibility::Public,
            )
            .add_with_default(DELTA, ValueType::Double, f64::INFINITY, Visibility::Private)
            .build()
    }

    fn compute(
        &self,
        ctx: &mut ComputeContext<'_>,
        messages: Messages<'_>,
    ) -> Result<(), ComputeError> {
        let mut rank = ctx.double_value(PAGE_RANK);
        if !ctx.is_initial_superstep() {
            let sum: f64 = messages.sum();
            let new_rank = (1.0 - self.damping_factor) + self.damping_factor * sum;
            ctx.set_node_value(DELTA, (new_rank - rank).abs());
            ctx.set_node_value(PAGE_RANK, new_rank);
            rank = new_rank;
        }

        let degree = ctx.degree();
        if degree > 0 {
            ctx.send_to_neighbors(rank / degree as f64);
        }
        Ok(())
    }

    fn master_compute(&self, ctx: &mut MasterComputeContext<'_>) -> bool {
        !ctx.is_initial_superstep()
            && ctx
                .node_values()
                .double_properties(DELTA)
                .iter()
                .all(|delta| *delta <= self.tolerance)
    }

    fn reducer(&self) -> Option<Box<dyn Reducer>> {
        Some(Box::new(Sum))
    }

    fn name(&self) -> &str {
        "PageRank"
    }
}

pub fn page_rank(
    graph: &dyn GraphView,
    config: PregelConfig,
    page_rank: PageRank,
) -> Result<PregelResult, PregelError> {
    Pregel::new(graph, config, page_rank)?.run()
}
