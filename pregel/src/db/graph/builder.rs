use super::{csr::GraphStorage, Graph, NodeProperty};
use crate::errors::PregelError;
use pregel_api::{compute::par_cum_sum, core::entities::VID};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
enum PropValue {
    Long(i64),
    Double(f64),
}

/// Collects nodes and relationships by original id and freezes them into a
/// [`Graph`].
///
/// Nodes get dense ids in order of first appearance. Relationships keep
/// their insertion order per source node.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    undirected: bool,
    original_ids: Vec<u64>,
    mapping: FxHashMap<u64, VID>,
    relationships: Vec<(VID, VID, Option<f64>)>,
    weighted: bool,
    properties: FxHashMap<String, Vec<(VID, PropValue)>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store every relationship in both directions
    pub fn undirected(mut self, undirected: bool) -> Self {
        self.undirected = undirected;
        self
    }

    fn resolve(&mut self, original: u64) -> VID {
        let next = VID(self.original_ids.len());
        let original_ids = &mut self.original_ids;
        *self.mapping.entry(original).or_insert_with(|| {
            original_ids.push(original);
            next
        })
    }

    pub fn add_node(mut self, original: u64) -> Self {
        self.resolve(original);
        self
    }

    pub fn add_nodes(mut self, originals: impl IntoIterator<Item = u64>) -> Self {
        for original in originals {
            self.resolve(original);
        }
        self
    }

    pub fn add_relationship(mut self, src: u64, dst: u64) -> Self {
        let (src, dst) = (self.resolve(src), self.resolve(dst));
        self.relationships.push((src, dst, None));
        self
    }

    /// Add a weighted relationship, relationships added without a weight
    /// get `1.0`
    pub fn add_weighted_relationship(mut self, src: u64, dst: u64, weight: f64) -> Self {
        let (src, dst) = (self.resolve(src), self.resolve(dst));
        self.relationships.push((src, dst, Some(weight)));
        self.weighted = true;
        self
    }

    pub fn add_relationships(mut self, pairs: impl IntoIterator<Item = (u64, u64)>) -> Self {
        for (src, dst) in pairs {
            self = self.add_relationship(src, dst);
        }
        self
    }

    pub fn add_long_property(mut self, key: &str, node: u64, value: i64) -> Self {
        let node = self.resolve(node);
        self.properties
            .entry(key.to_owned())
            .or_default()
            .push((node, PropValue::Long(value)));
        self
    }

    pub fn add_double_property(mut self, key: &str, node: u64, value: f64) -> Self {
        let node = self.resolve(node);
        self.properties
            .entry(key.to_owned())
            .or_default()
            .push((node, PropValue::Double(value)));
        self
    }

    pub fn build(self) -> Result<Graph, PregelError> {
        let node_count = self.original_ids.len();
        let properties = self
            .properties
            .into_iter()
            .map(|(key, values)| {
                let column = property_column(&key, node_count, &values)?;
                Ok((key, column))
            })
            .collect::<Result<FxHashMap<_, _>, PregelError>>()?;

        let mut edges = Vec::with_capacity(
            self.relationships.len() * if self.undirected { 2 } else { 1 },
        );
        for &(src, dst, weight) in &self.relationships {
            edges.push((src, dst, weight.unwrap_or(1.0)));
            if self.undirected {
                edges.push((dst, src, weight.unwrap_or(1.0)));
            }
        }

        let mut degrees = vec![0usize; node_count + 1];
        for (src, _, _) in &edges {
            degrees[src.index() + 1] += 1;
        }
        par_cum_sum(&mut degrees);
        let offsets = degrees;

        let mut cursor = offsets.clone();
        let mut targets = vec![VID::default(); edges.len()];
        let mut weights = vec![0.0; if self.weighted { edges.len() } else { 0 }];
        for (src, dst, weight) in edges {
            let slot = &mut cursor[src.index()];
            targets[*slot] = dst;
            if self.weighted {
                weights[*slot] = weight;
            }
            *slot += 1;
        }

        Ok(Graph::from_storage(GraphStorage {
            offsets,
            targets,
            weights: self.weighted.then_some(weights),
            original_ids: self.original_ids,
            mapping: self.mapping,
            properties,
        }))
    }
}

fn property_column(
    key: &str,
    node_count: usize,
    values: &[(VID, PropValue)],
) -> Result<NodeProperty, PregelError> {
    match values.first() {
        Some((_, PropValue::Double(_))) => {
            let mut column = vec![0.0; node_count];
            for (node, value) in values {
                match value {
                    PropValue::Double(v) => column[node.index()] = *v,
                    PropValue::Long(_) => {
                        return Err(PregelError::InconsistentNodeProperty(key.to_owned()))
                    }
                }
            }
            Ok(NodeProperty::Double(column))
        }
        _ => {
            let mut column = vec![0; node_count];
            for (node, value) in values {
                match value {
                    PropValue::Long(v) => column[node.index()] = *v,
                    PropValue::Double(_) => {
                        return Err(PregelError::InconsistentNodeProperty(key.to_owned()))
                    }
                }
            }
            Ok(NodeProperty::Long(column))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::graph::GraphView;
    use pretty_assertions::assert_eq;

    fn relationships(graph: &Graph, node: VID) -> Vec<(u64, f64)> {
        let mut out = vec![];
        graph.for_each_relationship(node, &mut |target, weight| {
            out.push((graph.to_original_id(target), weight));
            true
        });
        out
    }

    #[test]
    fn ids_are_assigned_in_order_of_appearance() {
        let graph = GraphBuilder::new()
            .add_node(10)
            .add_relationship(30, 20)
            .add_relationship(10, 30)
            .build()
            .unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.to_mapped_id(10), Some(VID(0)));
        assert_eq!(graph.to_mapped_id(30), Some(VID(1)));
        assert_eq!(graph.to_mapped_id(20), Some(VID(2)));
        assert_eq!(graph.to_mapped_id(99), None);
        assert_eq!(graph.to_original_id(VID(2)), 20);
    }

    #[test]
    fn csr_preserves_insertion_order() {
        let graph = GraphBuilder::new()
            .add_relationships([(0, 3), (1, 0), (0, 1), (0, 2)])
            .build()
            .unwrap();
        assert_eq!(graph.relationship_count(), 4);
        // ids follow first appearance: 0, 3, 1, 2
        assert_eq!(graph.degree(VID(0)), 3);
        assert_eq!(graph.degree(graph.to_mapped_id(1).unwrap()), 1);
        assert_eq!(graph.degree(graph.to_mapped_id(2).unwrap()), 0);
        assert_eq!(graph.degree(graph.to_mapped_id(3).unwrap()), 0);
        assert_eq!(
            relationships(&graph, VID(0)),
            vec![(3, 1.0), (1, 1.0), (2, 1.0)]
        );
        assert!(!graph.has_relationship_weights());
    }

    #[test]
    fn undirected_graphs_store_both_directions() {
        let graph = GraphBuilder::new()
            .undirected(true)
            .add_weighted_relationship(0, 1, 2.5)
            .add_relationship(1, 2)
            .build()
            .unwrap();
        assert_eq!(graph.relationship_count(), 4);
        assert!(graph.has_relationship_weights());
        assert_eq!(relationships(&graph, VID(1)), vec![(0, 2.5), (2, 1.0)]);
        assert_eq!(relationships(&graph, VID(2)), vec![(1, 1.0)]);
    }

    #[test]
    fn node_properties_are_columns_by_mapped_id() {
        let graph = GraphBuilder::new()
            .add_nodes([7, 8, 9])
            .add_double_property("seed", 9, 0.5)
            .add_long_property("rank", 8, 3)
            .build()
            .unwrap();
        let seed = graph.node_property("seed").unwrap();
        assert_eq!(seed, &NodeProperty::Double(vec![0.0, 0.0, 0.5]));
        let rank = graph.node_property("rank").unwrap();
        assert_eq!(rank.long_value(VID(1)), Some(3));
        assert_eq!(rank.double_value(VID(1)), Some(3.0));
        assert!(graph.node_property("missing").is_none());
    }

    #[test]
    fn mixed_property_types_are_rejected() {
        let err = GraphBuilder::new()
            .add_long_property("p", 0, 1)
            .add_double_property("p", 1, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, PregelError::InconsistentNodeProperty(key) if key == "p"));
    }
}
