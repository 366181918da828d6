use pregel::{
    algorithms::components::{connected_components, COMPONENT},
    graphgen::random_graph::{random_graph, RelationshipDistribution},
    prelude::*,
};
use rustc_hash::FxHashMap;

use crate::undirected;

fn union_find_labels(graph: &Graph) -> Vec<i64> {
    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }
    let mut parent: Vec<usize> = (0..graph.node_count()).collect();
    for node in graph.nodes() {
        for next in graph.neighbours(node) {
            let (a, b) = (find(&mut parent, node.index()), find(&mut parent, next.index()));
            parent[a.max(b)] = a.min(b);
        }
    }
    (0..graph.node_count())
        .map(|i| find(&mut parent, i) as i64)
        .collect()
}

#[test]
fn components_of_a_small_graph() {
    let graph = undirected(&[(0, 1), (1, 2), (3, 4), (5, 5)]);
    let result = connected_components(&graph, PregelConfig::default()).unwrap();
    assert!(result.did_converge);
    assert_eq!(
        result.node_values.long_properties(COMPONENT),
        &[0, 0, 0, 3, 3, 5]
    );
}

#[test]
fn components_match_union_find() {
    let directed = random_graph(1000, 1, RelationshipDistribution::Random, Some(77)).unwrap();
    let mut builder = GraphBuilder::new().undirected(true).add_nodes(0..1000);
    for node in directed.nodes() {
        for next in directed.neighbours(node) {
            builder = builder.add_relationship(node.as_u64(), next.as_u64());
        }
    }
    let graph = builder.build().unwrap();

    let config = PregelConfig::default()
        .with_concurrency(6)
        .with_max_iterations(1000);
    let result = connected_components(&graph, config).unwrap();
    assert!(result.did_converge);
    let labels = result.node_values.long_properties(COMPONENT);
    assert_eq!(labels, union_find_labels(&graph).as_slice());

    let mut sizes: FxHashMap<i64, usize> = FxHashMap::default();
    for label in labels {
        *sizes.entry(*label).or_default() += 1;
    }
    assert_eq!(sizes.values().sum::<usize>(), 1000);
}
