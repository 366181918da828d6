use pregel::{
    algorithms::pathing::single_source_shortest_path::{single_source_shortest_path, DISTANCE},
    graphgen::random_graph::{random_graph, RelationshipDistribution},
    prelude::*,
};
use pregel_api::core::utils::logging::global_info_logger;
use std::collections::VecDeque;

use crate::undirected;

fn reference_hops(graph: &Graph, source: VID) -> Vec<f64> {
    let mut distances = vec![f64::INFINITY; graph.node_count()];
    distances[source.index()] = 0.0;
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        for next in graph.neighbours(node) {
            if distances[next.index()].is_infinite() {
                distances[next.index()] = distances[node.index()] + 1.0;
                queue.push_back(*next);
            }
        }
    }
    distances
}

#[test]
fn hop_distances_match_breadth_first_search() {
    global_info_logger();
    let graph = random_graph(400, 2, RelationshipDistribution::Random, Some(5)).unwrap();
    let config = PregelConfig::default()
        .with_max_iterations(400)
        .with_partitioning(Partitioning::Auto);
    let result = single_source_shortest_path(&graph, VID(0), config).unwrap();
    assert!(result.did_converge);
    assert_eq!(
        result.node_values.double_properties(DISTANCE),
        reference_hops(&graph, VID(0)).as_slice()
    );
}

#[test]
fn unreachable_nodes_stay_infinite() {
    let graph = undirected(&[(0, 1), (2, 3)]);
    let result =
        single_source_shortest_path(&graph, VID(2), PregelConfig::default()).unwrap();
    assert_eq!(
        result.node_values.double_properties(DISTANCE),
        &[f64::INFINITY, f64::INFINITY, 0.0, 1.0]
    );
}
