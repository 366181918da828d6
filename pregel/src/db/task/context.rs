//! Views handed to the user callbacks of a computation.
//!
//! [`ComputeContext`] and [`InitContext`] are created once per partition and
//! moved from node to node; every value accessor is scoped to the node that
//! is currently being computed.
use crate::{
    config::PregelConfig,
    core::{
        messages::Messenger,
        state::{NodeValue, NodeValueStore, PartitionValues},
    },
    db::{
        graph::{GraphView, NodeProperty},
        task::computation::PregelComputation,
    },
    errors::PregelError,
};
use pregel_api::{atomic_extra::AtomicBitSet, core::entities::VID};
use std::sync::atomic::AtomicBool;

/// Run state shared by all partitions of a superstep
pub(crate) struct StepShared<'a> {
    pub(crate) graph: &'a dyn GraphView,
    pub(crate) config: &'a PregelConfig,
    pub(crate) computation: &'a dyn PregelComputation,
    pub(crate) messenger: &'a Messenger,
    pub(crate) halted: &'a AtomicBitSet,
    pub(crate) messages_sent: &'a AtomicBool,
    pub(crate) abort: &'a AtomicBool,
}

/// Typed access to the values of the current node
pub trait NodeValueOps {
    fn node_id(&self) -> VID;

    #[doc(hidden)]
    fn partition_values(&self) -> &PartitionValues<'_>;

    #[doc(hidden)]
    fn write_value(&mut self, key: &str, value: NodeValue);

    #[track_caller]
    fn long_value(&self, key: &str) -> i64 {
        self.partition_values().long_value(key, self.node_id())
    }

    #[track_caller]
    fn double_value(&self, key: &str) -> f64 {
        self.partition_values().double_value(key, self.node_id())
    }

    #[track_caller]
    fn long_array_value(&self, key: &str) -> &[i64] {
        self.partition_values().long_array_value(key, self.node_id())
    }

    #[track_caller]
    fn double_array_value(&self, key: &str) -> &[f64] {
        self.partition_values().double_array_value(key, self.node_id())
    }

    #[track_caller]
    fn set_node_value(&mut self, key: &str, value: impl Into<NodeValue>) {
        self.write_value(key, value.into())
    }
}

#[track_caller]
fn check_node(node: VID, node_count: usize) {
    if node.index() >= node_count {
        PregelError::NodeOutOfRange { node, node_count }.raise()
    }
}

pub struct InitContext<'a> {
    shared: &'a StepShared<'a>,
    values: PartitionValues<'a>,
    node: VID,
}

impl<'a> InitContext<'a> {
    pub(crate) fn new(shared: &'a StepShared<'a>, values: PartitionValues<'a>) -> Self {
        let node = VID(values.range().start);
        Self {
            shared,
            values,
            node,
        }
    }

    pub(crate) fn set_node(&mut self, node: VID) {
        self.node = node;
    }

    pub fn config(&self) -> &PregelConfig {
        self.shared.config
    }

    pub fn node_count(&self) -> usize {
        self.shared.graph.node_count()
    }

    pub fn degree(&self) -> usize {
        self.shared.graph.degree(self.node)
    }

    pub fn to_original_id(&self) -> u64 {
        self.shared.graph.to_original_id(self.node)
    }

    /// Node property column of the graph, if it carries one named `key`
    pub fn node_property(&self, key: &str) -> Option<&NodeProperty> {
        self.shared.graph.node_property(key)
    }
}

impl NodeValueOps for InitContext<'_> {
    fn node_id(&self) -> VID {
        self.node
    }

    fn partition_values(&self) -> &PartitionValues<'_> {
        &self.values
    }

    #[track_caller]
    fn write_value(&mut self, key: &str, value: NodeValue) {
        self.values.set_node_value(key, self.node, value)
    }
}

pub struct ComputeContext<'a> {
    shared: &'a StepShared<'a>,
    values: PartitionValues<'a>,
    superstep: usize,
    node: VID,
    sent_messages: bool,
}

impl<'a> ComputeContext<'a> {
    pub(crate) fn new(
        shared: &'a StepShared<'a>,
        superstep: usize,
        values: PartitionValues<'a>,
    ) -> Self {
        let node = VID(values.range().start);
        Self {
            shared,
            values,
            superstep,
            node,
            sent_messages: false,
        }
    }

    pub(crate) fn set_node(&mut self, node: VID) {
        self.node = node;
    }

    pub(crate) fn sent_messages(&self) -> bool {
        self.sent_messages
    }

    pub fn superstep(&self) -> usize {
        self.superstep
    }

    pub fn is_initial_superstep(&self) -> bool {
        self.superstep == 0
    }

    pub fn config(&self) -> &PregelConfig {
        self.shared.config
    }

    pub fn node_count(&self) -> usize {
        self.shared.graph.node_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.shared.graph.relationship_count()
    }

    pub fn degree(&self) -> usize {
        self.shared.graph.degree(self.node)
    }

    pub fn has_relationship_weights(&self) -> bool {
        self.shared.graph.has_relationship_weights()
    }

    pub fn to_original_id(&self, node: VID) -> u64 {
        self.shared.graph.to_original_id(node)
    }

    pub fn to_internal_id(&self, original: u64) -> Option<VID> {
        self.shared.graph.to_mapped_id(original)
    }

    /// Send `value` to an arbitrary node, readable in the next superstep
    #[track_caller]
    pub fn send_to(&mut self, target: VID, value: f64) {
        check_node(target, self.node_count());
        self.shared.messenger.send(self.node, target, value);
        self.sent_messages = true;
    }

    /// Send `value` along every outgoing relationship of the current node.
    ///
    /// On weighted graphs each message goes through
    /// [`PregelComputation::apply_relationship_weight`] first.
    pub fn send_to_neighbors(&mut self, value: f64) {
        let StepShared {
            graph,
            computation,
            messenger,
            ..
        } = *self.shared;
        let source = self.node;
        let weighted = graph.has_relationship_weights();
        let mut sent = false;
        graph.for_each_relationship(source, &mut |target, weight| {
            let value = if weighted {
                computation.apply_relationship_weight(value, weight)
            } else {
                value
            };
            messenger.send(source, target, value);
            sent = true;
            true
        });
        self.sent_messages |= sent;
    }

    /// Visit the outgoing neighbours of the current node until `visitor`
    /// returns `false`
    pub fn for_each_neighbor(&self, mut visitor: impl FnMut(VID) -> bool) {
        self.shared
            .graph
            .for_each_relationship(self.node, &mut |target, _| visitor(target));
    }

    pub fn for_each_relationship(&self, mut visitor: impl FnMut(VID, f64) -> bool) {
        self.shared
            .graph
            .for_each_relationship(self.node, &mut |target, weight| visitor(target, weight));
    }

    /// Deactivate the current node until it receives a message
    pub fn vote_to_halt(&mut self) {
        self.shared.halted.set(self.node.index());
    }
}

impl NodeValueOps for ComputeContext<'_> {
    fn node_id(&self) -> VID {
        self.node
    }

    fn partition_values(&self) -> &PartitionValues<'_> {
        &self.values
    }

    #[track_caller]
    fn write_value(&mut self, key: &str, value: NodeValue) {
        self.values.set_node_value(key, self.node, value)
    }
}

/// Single threaded view over the whole run, between two supersteps
pub struct MasterComputeContext<'a> {
    graph: &'a dyn GraphView,
    config: &'a PregelConfig,
    superstep: usize,
    node_values: &'a mut NodeValueStore,
}

impl<'a> MasterComputeContext<'a> {
    pub(crate) fn new(
        graph: &'a dyn GraphView,
        config: &'a PregelConfig,
        superstep: usize,
        node_values: &'a mut NodeValueStore,
    ) -> Self {
        Self {
            graph,
            config,
            superstep,
            node_values,
        }
    }

    pub fn superstep(&self) -> usize {
        self.superstep
    }

    pub fn is_initial_superstep(&self) -> bool {
        self.superstep == 0
    }

    pub fn config(&self) -> &PregelConfig {
        self.config
    }

    pub fn graph(&self) -> &dyn GraphView {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn node_values(&self) -> &NodeValueStore {
        &*self.node_values
    }

    pub fn node_values_mut(&mut self) -> &mut NodeValueStore {
        &mut *self.node_values
    }

    /// Visit node ids in order until `visitor` returns `false`
    pub fn for_each_node(&self, mut visitor: impl FnMut(VID) -> bool) {
        for node in (0..self.node_count()).map(VID) {
            if !visitor(node) {
                break;
            }
        }
    }
}
