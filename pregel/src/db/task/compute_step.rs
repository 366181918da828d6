//! The per-partition worker of the init step and of every superstep.
use crate::{
    core::state::PartitionValues,
    db::task::context::{ComputeContext, InitContext, StepShared},
    errors::PregelError,
};
use pregel_api::core::entities::VID;
use std::sync::atomic::Ordering;
use tracing::debug;

pub(crate) fn init_partition<'a>(
    shared: &'a StepShared<'a>,
    values: PartitionValues<'a>,
) -> Result<(), PregelError> {
    let range = values.range();
    let mut ctx = InitContext::new(shared, values);
    for node in range.map(VID) {
        if shared.abort.load(Ordering::Relaxed) {
            break;
        }
        ctx.set_node(node);
        if let Err(source) = shared.computation.init(&mut ctx) {
            shared.abort.store(true, Ordering::Relaxed);
            return Err(PregelError::InitFailed { node, source });
        }
    }
    Ok(())
}

pub(crate) fn compute_partition<'a>(
    shared: &'a StepShared<'a>,
    superstep: usize,
    values: PartitionValues<'a>,
) -> Result<(), PregelError> {
    let range = values.range();
    debug!(superstep, ?range, "computing partition");
    let mut ctx = ComputeContext::new(shared, superstep, values);
    let mut computed = 0usize;
    for node in range.map(VID) {
        if shared.abort.load(Ordering::Relaxed) {
            break;
        }
        let i = node.index();
        if superstep > 0 && shared.halted.get(i) && !shared.messenger.has_messages(node) {
            continue;
        }
        shared.halted.clear(i);
        let messages = shared.messenger.messages_for(node);

        ctx.set_node(node);
        computed += 1;
        if let Err(source) = shared.computation.compute(&mut ctx, messages) {
            shared.abort.store(true, Ordering::Relaxed);
            return Err(PregelError::ComputeFailed {
                node,
                superstep,
                source,
            });
        }
    }
    if ctx.sent_messages() {
        shared.messages_sent.store(true, Ordering::Relaxed);
    }
    debug!(superstep, computed, "partition finished");
    Ok(())
}
