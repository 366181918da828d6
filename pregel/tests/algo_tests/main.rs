use pregel::prelude::*;

mod centrality;
mod components;
mod pathing;

fn undirected(edges: &[(u64, u64)]) -> Graph {
    GraphBuilder::new()
        .undirected(true)
        .add_relationships(edges.iter().copied())
        .build()
        .unwrap()
}

fn assert_approx(actual: &[f64], expected: &[f64], precision: f64) {
    assert_eq!(actual.len(), expected.len(), "lengths differ");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= precision,
            "value mismatch for node {i}: {a} != {e}"
        );
    }
}
