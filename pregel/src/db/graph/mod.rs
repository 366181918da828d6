//! Read-only graph topology consumed by the engine.
//!
//! The engine only ever talks to [`GraphView`]; [`Graph`] is the in-memory
//! CSR implementation used by the algorithms and tests of this crate.
pub mod builder;
pub mod csr;

pub use builder::GraphBuilder;
pub use csr::Graph;

use pregel_api::core::entities::VID;
use serde::{Deserialize, Serialize};

/// A per-node property column carried by the graph, readable during init
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeProperty {
    Long(Vec<i64>),
    Double(Vec<f64>),
}

impl NodeProperty {
    pub fn len(&self) -> usize {
        match self {
            NodeProperty::Long(values) => values.len(),
            NodeProperty::Double(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn long_value(&self, node: VID) -> Option<i64> {
        match self {
            NodeProperty::Long(values) => values.get(node.index()).copied(),
            NodeProperty::Double(values) => values.get(node.index()).map(|v| *v as i64),
        }
    }

    pub fn double_value(&self, node: VID) -> Option<f64> {
        match self {
            NodeProperty::Long(values) => values.get(node.index()).map(|v| *v as f64),
            NodeProperty::Double(values) => values.get(node.index()).copied(),
        }
    }
}

/// Topology provider for a Pregel run.
///
/// Node ids are dense in `[0, node_count)`. Implementations must be safe to
/// read from many threads at once.
pub trait GraphView: Send + Sync {
    fn node_count(&self) -> usize;

    fn relationship_count(&self) -> usize;

    /// Number of outgoing relationships of `node`
    fn degree(&self, node: VID) -> usize;

    fn has_relationship_weights(&self) -> bool;

    /// Visit the outgoing relationships of `node` as `(target, weight)`.
    ///
    /// Unweighted graphs report a weight of `1.0`. Iteration stops as soon as
    /// the visitor returns `false`.
    fn for_each_relationship(&self, node: VID, visitor: &mut dyn FnMut(VID, f64) -> bool);

    fn to_original_id(&self, node: VID) -> u64;

    fn to_mapped_id(&self, original: u64) -> Option<VID>;

    fn node_property(&self, _key: &str) -> Option<&NodeProperty> {
        None
    }
}

impl<G: GraphView + ?Sized> GraphView for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn relationship_count(&self) -> usize {
        (**self).relationship_count()
    }

    fn degree(&self, node: VID) -> usize {
        (**self).degree(node)
    }

    fn has_relationship_weights(&self) -> bool {
        (**self).has_relationship_weights()
    }

    fn for_each_relationship(&self, node: VID, visitor: &mut dyn FnMut(VID, f64) -> bool) {
        (**self).for_each_relationship(node, visitor)
    }

    fn to_original_id(&self, node: VID) -> u64 {
        (**self).to_original_id(node)
    }

    fn to_mapped_id(&self, original: u64) -> Option<VID> {
        (**self).to_mapped_id(original)
    }

    fn node_property(&self, key: &str) -> Option<&NodeProperty> {
        (**self).node_property(key)
    }
}
