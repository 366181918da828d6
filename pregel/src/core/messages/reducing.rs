use super::{Messages, Reducer};
use parking_lot::Mutex;
use pregel_api::{
    atomic_extra::{atomic_f64_vec, load_f64, store_f64, update_f64, AtomicBitSet},
    core::entities::VID,
};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

/// Double-buffered inboxes holding one reduced value per node.
///
/// Sends fold into the slot of the target with a CAS loop, so memory stays
/// at one value per node no matter how many messages are sent. When senders
/// are tracked, a send holds the lock of its slot's sender so the value and
/// the sender that produced it always change together.
#[derive(Debug)]
pub struct ReducingMessenger {
    reducer: Box<dyn Reducer>,
    current: Vec<AtomicU64>,
    next: Vec<AtomicU64>,
    current_present: AtomicBitSet,
    next_present: AtomicBitSet,
    // both empty unless senders are tracked
    current_senders: Vec<Mutex<VID>>,
    next_senders: Vec<Mutex<VID>>,
}

fn sender_slots(len: usize) -> Vec<Mutex<VID>> {
    (0..len).map(|_| Mutex::new(VID::default())).collect()
}

impl ReducingMessenger {
    pub fn new(node_count: usize, reducer: Box<dyn Reducer>, track_sender: bool) -> Self {
        let identity = reducer.identity();
        let senders = if track_sender { node_count } else { 0 };
        Self {
            current: atomic_f64_vec(node_count, identity),
            next: atomic_f64_vec(node_count, identity),
            current_present: AtomicBitSet::new(node_count),
            next_present: AtomicBitSet::new(node_count),
            current_senders: sender_slots(senders),
            next_senders: sender_slots(senders),
            reducer,
        }
    }

    fn track_sender(&self) -> bool {
        !self.next_senders.is_empty()
    }

    #[inline]
    pub fn send(&self, sender: VID, target: VID, value: f64) {
        let target = target.index();
        let reducer = &self.reducer;
        let reduce = |current| reducer.reduce(current, value);
        if !self.track_sender() {
            update_f64(&self.next[target], reduce);
            self.next_present.set(target);
            return;
        }

        let mut last_sender = self.next_senders[target].lock();
        let (prev, new) = update_f64(&self.next[target], reduce);
        let was_present = self.next_present.set(target);
        if !was_present || prev.to_bits() != new.to_bits() {
            *last_sender = sender;
        }
    }

    /// Take the reduced message of `node`, leaving its slot empty
    pub fn messages_for(&self, node: VID) -> Messages<'_> {
        let i = node.index();
        if !self.current_present.clear(i) {
            return Messages::empty();
        }
        let sender = self
            .track_sender()
            .then(|| *self.current_senders[i].lock());
        Messages::single(load_f64(&self.current[i], Ordering::Acquire), sender)
    }

    pub fn has_messages(&self, node: VID) -> bool {
        self.current_present.get(node.index())
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        std::mem::swap(&mut self.current_present, &mut self.next_present);
        std::mem::swap(&mut self.current_senders, &mut self.next_senders);

        let identity = self.reducer.identity();
        self.next
            .par_iter()
            .for_each(|slot| store_f64(slot, identity, Ordering::Relaxed));
        self.next_present.clear_all();
    }
}
