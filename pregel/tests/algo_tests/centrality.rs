use pregel::{
    algorithms::centrality::pagerank::{page_rank, PageRank, PAGE_RANK},
    prelude::*,
};

use crate::{assert_approx, undirected};

#[test]
fn page_rank_of_a_star() {
    // leaves only link back to the centre
    let graph = undirected(&[(0, 1), (0, 2), (0, 3), (0, 4)]);
    let params = PageRank {
        tolerance: 1e-10,
        ..Default::default()
    };
    let config = PregelConfig::default().with_max_iterations(500);
    let result = page_rank(&graph, config, params).unwrap();
    assert!(result.did_converge);

    // centre: r0 = 0.15 + 0.85 * 4 * r1, leaf: r1 = 0.15 + 0.85 * r0 / 4
    let r0 = (0.15 + 0.85 * 0.15 * 4.0) / (1.0 - 0.85 * 0.85);
    let r1 = 0.15 + 0.85 * r0 / 4.0;
    assert_approx(
        result.node_values.double_properties(PAGE_RANK),
        &[r0, r1, r1, r1, r1],
        1e-6,
    );
}

#[test]
fn single_and_multi_threaded_runs_agree() {
    let graph = undirected(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)]);
    let run = |concurrency| {
        let config = PregelConfig::default()
            .with_concurrency(concurrency)
            .with_max_iterations(200);
        page_rank(&graph, config, PageRank::default())
            .unwrap()
            .node_values
            .double_properties(PAGE_RANK)
            .to_vec()
    };
    let expected = run(1);
    assert_approx(&run(4), &expected, 1e-9);
}
