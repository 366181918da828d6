//! # pregel
//!
//! A vertex-centric, bulk synchronous parallel graph computation engine.
//!
//! A computation supplies a per-node `compute` callback that runs once per
//! node and superstep. Nodes communicate only through messages, which become
//! visible in the following superstep, and deactivate themselves by voting
//! to halt. A run ends when every node has halted and no message is in
//! flight, when the iteration limit is hit, or when its termination flag
//! trips.
//!
//! ## Example
//!
//! ```rust
//! use pregel::prelude::*;
//!
//! let graph = GraphBuilder::new()
//!     .add_relationships([(0, 1), (1, 2), (2, 3)])
//!     .build()
//!     .unwrap();
//!
//! let schema = PregelSchema::builder()
//!     .add("hops", ValueType::Long)
//!     .build()
//!     .unwrap();
//!
//! let hops = ComputeFn::new("hops", schema, |ctx, messages| {
//!     if ctx.is_initial_superstep() {
//!         if ctx.node_id() == VID(0) {
//!             ctx.send_to_neighbors(1.0);
//!         } else {
//!             ctx.set_node_value("hops", -1i64);
//!         }
//!     } else if let Some(hops) = messages.min_by(f64::total_cmp) {
//!         ctx.set_node_value("hops", hops as i64);
//!         ctx.send_to_neighbors(hops + 1.0);
//!     }
//!     ctx.vote_to_halt();
//!     Ok(())
//! });
//!
//! let config = PregelConfig::default().with_max_iterations(10);
//! let result = Pregel::new(&graph, config, hops).unwrap().run().unwrap();
//! assert!(result.did_converge);
//! assert_eq!(result.node_values.long_properties("hops"), &[0, 1, 2, 3]);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod graphgen;

pub mod prelude {
    pub use crate::{
        config::{Partitioning, PregelConfig},
        core::{
            messages::{Count, Max, Messages, Min, Reducer, Sum},
            state::{NodeValue, NodeValueStore, PregelSchema, ValueType, Visibility},
        },
        db::{
            graph::{Graph, GraphBuilder, GraphView, NodeProperty},
            task::{
                computation::{ComputeFn, PregelComputation},
                context::{ComputeContext, InitContext, MasterComputeContext, NodeValueOps},
                task_runner::{Pregel, PregelResult, RunStatus},
                termination::{StopFlag, TerminationFlag},
            },
        },
        errors::{ComputeError, PregelError},
    };
    pub use pregel_api::core::entities::VID;
}

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;
