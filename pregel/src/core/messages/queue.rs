use super::{inbox::Inbox, Messages};
use parking_lot::Mutex;
use pregel_api::core::entities::VID;
use rayon::prelude::*;

/// Double-buffered unreduced queues.
///
/// Messages sent in superstep `k` land in `next` and only become readable
/// after the swap that starts superstep `k + 1`.
#[derive(Debug)]
pub struct SyncQueueMessenger {
    current: Vec<Mutex<Inbox>>,
    next: Vec<Mutex<Inbox>>,
    track_sender: bool,
}

fn inboxes(len: usize) -> Vec<Mutex<Inbox>> {
    (0..len).map(|_| Mutex::new(Inbox::default())).collect()
}

impl SyncQueueMessenger {
    pub fn new(node_count: usize, track_sender: bool) -> Self {
        Self {
            current: inboxes(node_count),
            next: inboxes(node_count),
            track_sender,
        }
    }

    #[inline]
    pub fn send(&self, sender: VID, target: VID, value: f64) {
        let sender = self.track_sender.then_some(sender);
        self.next[target.index()].lock().push(sender, value);
    }

    pub fn messages_for(&self, node: VID) -> Messages<'_> {
        let inbox = std::mem::take(&mut *self.current[node.index()].lock());
        let (values, senders) = inbox.into_parts();
        Messages::queue(values, senders)
    }

    pub fn has_messages(&self, node: VID) -> bool {
        !self.current[node.index()].lock().is_empty()
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        // unread messages of the previous superstep are dropped
        self.next
            .par_iter_mut()
            .for_each(|inbox| inbox.get_mut().clear());
    }
}
