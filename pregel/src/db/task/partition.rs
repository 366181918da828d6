//! Splitting the node id space into the contiguous ranges owned by the
//! worker tasks of a superstep.
use crate::{config::Partitioning, db::graph::GraphView};
use pregel_api::{compute::par_cum_sum, core::entities::VID};
use rayon::prelude::*;
use std::ops::Range;

/// Equally sized contiguous ranges covering `[0, node_count)`.
///
/// Returns `min(concurrency, node_count)` ranges, the first
/// `node_count % n` of which hold one extra node.
pub fn range_partitions(node_count: usize, concurrency: usize) -> Vec<Range<usize>> {
    let n = concurrency.min(node_count);
    if n == 0 {
        return vec![];
    }
    let base = node_count / n;
    let extra = node_count % n;
    let mut start = 0;
    (0..n)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Contiguous ranges holding roughly the same number of relationships.
///
/// Every node weighs `degree + 1` so nodes without relationships still count
/// towards the work of their range.
pub fn degree_partitions(graph: &dyn GraphView, concurrency: usize) -> Vec<Range<usize>> {
    let node_count = graph.node_count();
    let n = concurrency.min(node_count);
    if n == 0 {
        return vec![];
    }
    let mut prefix: Vec<usize> = (0..node_count)
        .into_par_iter()
        .map(|i| graph.degree(VID(i)) + 1)
        .collect();
    par_cum_sum(&mut prefix);
    let total = prefix[node_count - 1];

    let mut ranges = Vec::with_capacity(n);
    let mut start = 0;
    for j in 1..=n {
        if start == node_count {
            break;
        }
        let end = if j == n {
            node_count
        } else {
            let target = total * j / n;
            prefix
                .partition_point(|&w| w <= target)
                .clamp(start + 1, node_count)
        };
        if end > start {
            ranges.push(start..end);
            start = end;
        }
    }
    ranges
}

/// Ranges for a run on `graph` according to `partitioning`
pub fn partitions(
    graph: &dyn GraphView,
    partitioning: Partitioning,
    concurrency: usize,
) -> Vec<Range<usize>> {
    match partitioning {
        Partitioning::Range => range_partitions(graph.node_count(), concurrency),
        Partitioning::Degree => degree_partitions(graph, concurrency),
        Partitioning::Auto if graph.relationship_count() > 0 => {
            degree_partitions(graph, concurrency)
        }
        Partitioning::Auto => range_partitions(graph.node_count(), concurrency),
    }
}
