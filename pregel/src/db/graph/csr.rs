use super::{GraphView, NodeProperty};
use pregel_api::core::entities::VID;
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub(crate) struct GraphStorage {
    // offsets[v]..offsets[v + 1] indexes the relationships of v
    pub(crate) offsets: Vec<usize>,
    pub(crate) targets: Vec<VID>,
    pub(crate) weights: Option<Vec<f64>>,
    pub(crate) original_ids: Vec<u64>,
    pub(crate) mapping: FxHashMap<u64, VID>,
    pub(crate) properties: FxHashMap<String, NodeProperty>,
}

/// Immutable compressed sparse row graph.
///
/// Cheap to clone, all clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: Arc<GraphStorage>,
}

impl Graph {
    pub(crate) fn from_storage(storage: GraphStorage) -> Self {
        Self {
            inner: Arc::new(storage),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = VID> {
        (0..self.inner.original_ids.len()).map(VID)
    }

    /// Outgoing neighbours of `node` in insertion order
    pub fn neighbours(&self, node: VID) -> &[VID] {
        let (start, end) = self.bounds(node);
        &self.inner.targets[start..end]
    }

    fn bounds(&self, node: VID) -> (usize, usize) {
        let i = node.index();
        (self.inner.offsets[i], self.inner.offsets[i + 1])
    }
}

impl GraphView for Graph {
    fn node_count(&self) -> usize {
        self.inner.original_ids.len()
    }

    fn relationship_count(&self) -> usize {
        self.inner.targets.len()
    }

    fn degree(&self, node: VID) -> usize {
        let (start, end) = self.bounds(node);
        end - start
    }

    fn has_relationship_weights(&self) -> bool {
        self.inner.weights.is_some()
    }

    fn for_each_relationship(&self, node: VID, visitor: &mut dyn FnMut(VID, f64) -> bool) {
        let (start, end) = self.bounds(node);
        let targets = &self.inner.targets[start..end];
        match &self.inner.weights {
            Some(weights) => {
                for (target, weight) in targets.iter().zip(&weights[start..end]) {
                    if !visitor(*target, *weight) {
                        break;
                    }
                }
            }
            None => {
                for target in targets {
                    if !visitor(*target, 1.0) {
                        break;
                    }
                }
            }
        }
    }

    fn to_original_id(&self, node: VID) -> u64 {
        self.inner.original_ids[node.index()]
    }

    fn to_mapped_id(&self, original: u64) -> Option<VID> {
        self.inner.mapping.get(&original).copied()
    }

    fn node_property(&self, key: &str) -> Option<&NodeProperty> {
        self.inner.properties.get(key)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::graph::GraphBuilder;

    #[test]
    fn empty_graph() {
        let graph = Graph::default();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.relationship_count(), 0);
        assert_eq!(graph.nodes().count(), 0);
    }

    #[test]
    fn visitor_can_stop_early() {
        let graph = GraphBuilder::new()
            .add_relationship(0, 1)
            .add_relationship(0, 2)
            .add_relationship(0, 3)
            .build()
            .unwrap();
        let mut seen = vec![];
        graph.for_each_relationship(VID(0), &mut |target, weight| {
            assert_eq!(weight, 1.0);
            seen.push(target);
            seen.len() < 2
        });
        assert_eq!(seen, vec![VID(1), VID(2)]);
    }

    #[test]
    fn clones_share_storage() {
        let graph = GraphBuilder::new().add_relationship(5, 6).build().unwrap();
        let other = graph.clone();
        assert!(Arc::ptr_eq(&graph.inner, &other.inner));
        assert_eq!(other.neighbours(VID(0)), &[VID(1)]);
    }
}
