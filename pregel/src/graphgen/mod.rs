//! Seeded random graphs for tests and benchmarks
pub mod random_graph;
