//! Algorithms written as Pregel computations
pub mod centrality;
pub mod components;
pub mod pathing;
