//! Generates a directed graph with a chosen out-degree distribution
//!
//! # Examples
//!
//! ```
//! use pregel::graphgen::random_graph::{random_graph, RelationshipDistribution};
//! let graph = random_graph(1000, 5, RelationshipDistribution::PowerLaw, Some(42)).unwrap();
//! ```
use crate::{
    db::graph::{Graph, GraphBuilder},
    errors::PregelError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Pareto;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipDistribution {
    /// Every node has exactly `average_degree` relationships
    Uniform,
    /// Out-degrees drawn uniformly from `[0, 2 * average_degree]`
    Random,
    /// Out-degrees drawn from a Pareto distribution with the given mean
    PowerLaw,
}

/// Generate a random graph with `node_count` nodes numbered `0..node_count`.
///
/// Relationship targets are drawn uniformly, self loops and parallel
/// relationships are possible. Identical seeds produce identical graphs.
pub fn random_graph(
    node_count: usize,
    average_degree: usize,
    distribution: RelationshipDistribution,
    seed: Option<u64>,
) -> Result<Graph, PregelError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // shape 2 puts the mean at twice the scale
    let pareto = Pareto::new(average_degree as f64 / 2.0, 2.0).ok();

    let mut builder = GraphBuilder::new().add_nodes(0..node_count as u64);
    if node_count == 0 {
        return builder.build();
    }
    for src in 0..node_count as u64 {
        let degree = match distribution {
            RelationshipDistribution::Uniform => average_degree,
            RelationshipDistribution::Random => rng.gen_range(0..=2 * average_degree),
            RelationshipDistribution::PowerLaw => match &pareto {
                Some(pareto) => (rng.sample(pareto) as usize).min(node_count),
                None => 0,
            },
        };
        for _ in 0..degree {
            let dst = rng.gen_range(0..node_count as u64);
            builder = builder.add_relationship(src, dst);
        }
    }
    builder.build()
}
