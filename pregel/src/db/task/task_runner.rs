use crate::{
    config::PregelConfig,
    core::{
        messages::Messenger,
        state::{NodeValueStore, PregelSchema},
    },
    db::{
        graph::GraphView,
        task::{
            computation::PregelComputation,
            compute_step::{compute_partition, init_partition},
            context::{MasterComputeContext, StepShared},
            custom_pool,
            partition::partitions,
            termination::{RunToCompletion, TerminationFlag},
        },
    },
    errors::PregelError,
};
use itertools::Itertools;
use pregel_api::atomic_extra::AtomicBitSet;
use rayon::{prelude::*, ThreadPool};
use serde::{Deserialize, Serialize};
use std::sync::{atomic::AtomicBool, Arc};
use tracing::{debug, info, instrument};

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Converged,
    MaxIterationsReached,
    Cancelled,
}

#[derive(Debug)]
pub struct PregelResult {
    pub node_values: NodeValueStore,
    /// Number of supersteps that ran to completion
    pub ran_iterations: usize,
    pub did_converge: bool,
    pub status: RunStatus,
}

impl PregelResult {
    fn new(node_values: NodeValueStore, ran_iterations: usize, status: RunStatus) -> Self {
        Self {
            node_values,
            ran_iterations,
            did_converge: status == RunStatus::Converged,
            status,
        }
    }
}

/// A single run of a computation over a graph.
///
/// All state allocated by the run is dropped when `run` returns, except for
/// the node values handed back in the [`PregelResult`].
pub struct Pregel<'a, C: PregelComputation> {
    graph: &'a dyn GraphView,
    config: PregelConfig,
    computation: C,
    schema: PregelSchema,
    pool: Option<Arc<ThreadPool>>,
    termination: Box<dyn TerminationFlag + 'a>,
}

impl<'a, C: PregelComputation> Pregel<'a, C> {
    /// Validate `config` and resolve the schema of `computation`
    pub fn new(
        graph: &'a dyn GraphView,
        config: PregelConfig,
        computation: C,
    ) -> Result<Self, PregelError> {
        config.validate()?;
        let schema = computation.schema(&config)?;
        Ok(Self {
            graph,
            config,
            computation,
            schema,
            pool: None,
            termination: Box::new(RunToCompletion),
        })
    }

    /// Run on `pool` instead of a pool built for this run
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_termination_flag(mut self, flag: impl TerminationFlag + 'a) -> Self {
        self.termination = Box::new(flag);
        self
    }

    pub fn schema(&self) -> &PregelSchema {
        &self.schema
    }

    pub fn config(&self) -> &PregelConfig {
        &self.config
    }

    #[instrument(level = "info", skip_all, fields(computation = self.computation.name()))]
    pub fn run(self) -> Result<PregelResult, PregelError> {
        let Self {
            graph,
            config,
            computation,
            schema,
            pool,
            termination,
        } = self;
        let name = computation.name();
        let node_count = graph.node_count();
        let mut node_values = NodeValueStore::new(schema, node_count);

        if node_count == 0 {
            info!("{name} :: Empty graph, nothing to compute");
            return Ok(PregelResult::new(node_values, 0, RunStatus::Converged));
        }

        let pool = match pool {
            Some(pool) => pool,
            None => custom_pool(config.concurrency)?,
        };
        let ranges = pool.install(|| partitions(graph, config.partitioning, config.concurrency));
        let (smallest, largest) = ranges
            .iter()
            .map(|r| r.len())
            .minmax()
            .into_option()
            .unwrap_or_default();
        debug!(
            partitions = ranges.len(),
            smallest,
            largest,
            "partitioned {node_count} nodes"
        );

        let mut messenger = Messenger::new(
            node_count,
            computation.reducer(),
            config.is_asynchronous,
            config.track_sender,
        );
        let halted = AtomicBitSet::new(node_count);
        let abort = AtomicBool::new(false);

        {
            let messages_sent = AtomicBool::new(false);
            let shared = StepShared {
                graph,
                config: &config,
                computation: &computation,
                messenger: &messenger,
                halted: &halted,
                messages_sent: &messages_sent,
                abort: &abort,
            };
            let partition_values = node_values.partitions_mut(&ranges);
            pool.install(|| {
                partition_values
                    .into_par_iter()
                    .try_for_each(|values| init_partition(&shared, values))
            })?;
        }

        let max_iterations = config.max_iterations;
        let mut ran_iterations = 0;
        let mut status = RunStatus::MaxIterationsReached;

        for superstep in 0..max_iterations {
            if !termination.running() {
                info!("{name} :: Cancelled before iteration {}", superstep + 1);
                status = RunStatus::Cancelled;
                break;
            }
            info!(
                "{name} :: Compute iteration {} of {max_iterations} :: Start",
                superstep + 1
            );

            let messages_sent = AtomicBool::new(false);
            {
                let shared = StepShared {
                    graph,
                    config: &config,
                    computation: &computation,
                    messenger: &messenger,
                    halted: &halted,
                    messages_sent: &messages_sent,
                    abort: &abort,
                };
                let partition_values = node_values.partitions_mut(&ranges);
                pool.install(|| {
                    partition_values
                        .into_par_iter()
                        .try_for_each(|values| compute_partition(&shared, superstep, values))
                })?;
            }

            let master_converged = {
                let mut ctx =
                    MasterComputeContext::new(graph, &config, superstep, &mut node_values);
                computation.master_compute(&mut ctx)
            };

            messenger.swap();
            ran_iterations = superstep + 1;
            info!(
                "{name} :: Compute iteration {} of {max_iterations} :: Finished",
                superstep + 1
            );

            let messages_sent = messages_sent.into_inner();
            let quiet = !messages_sent && halted.all_set() && !messenger.has_unread_messages();
            if master_converged || quiet {
                status = RunStatus::Converged;
                break;
            }
        }

        info!("{name} :: {status:?} after {ran_iterations} iterations");
        Ok(PregelResult::new(node_values, ran_iterations, status))
    }
}
