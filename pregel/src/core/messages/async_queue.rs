use super::{inbox::Inbox, Messages, Reducer};
use parking_lot::Mutex;
use pregel_api::core::entities::VID;

/// Single-buffered queues for asynchronous runs.
///
/// A message becomes readable as soon as it is sent, so a node computed
/// later in the same superstep may already see it. Whatever is not read
/// stays queued for the following superstep.
#[derive(Debug)]
pub struct AsyncQueueMessenger {
    queues: Vec<Mutex<Inbox>>,
    reducer: Option<Box<dyn Reducer>>,
    track_sender: bool,
}

impl AsyncQueueMessenger {
    pub fn new(node_count: usize, reducer: Option<Box<dyn Reducer>>, track_sender: bool) -> Self {
        Self {
            queues: (0..node_count).map(|_| Mutex::new(Inbox::default())).collect(),
            reducer,
            track_sender,
        }
    }

    #[inline]
    pub fn send(&self, sender: VID, target: VID, value: f64) {
        let sender = self.track_sender.then_some(sender);
        self.queues[target.index()].lock().push(sender, value);
    }

    /// Drain the queue of `node`.
    ///
    /// The queue is snapshotted, so messages sent while the node is being
    /// computed are left for its next read. Messages the node does not read
    /// are put back when the returned [`Messages`] is dropped.
    pub fn messages_for(&self, node: VID) -> Messages<'_> {
        let queue = &self.queues[node.index()];
        let inbox = std::mem::take(&mut *queue.lock());
        let (values, senders) = inbox.into_parts();
        let messages = match &self.reducer {
            None => Messages::queue(values, senders),
            Some(_) if values.is_empty() => Messages::empty(),
            Some(reducer) => {
                let mut reduced = reducer.identity();
                let mut last_sender = None;
                for (i, value) in values.into_iter().enumerate() {
                    let next = reducer.reduce(reduced, value);
                    if i == 0 || next.to_bits() != reduced.to_bits() {
                        last_sender = senders.get(i).copied();
                    }
                    reduced = next;
                }
                Messages::single(reduced, last_sender)
            }
        };
        messages.returning_unread_to(queue)
    }

    pub fn has_messages(&self, node: VID) -> bool {
        !self.queues[node.index()].lock().is_empty()
    }

    pub fn has_unread_messages(&self) -> bool {
        self.queues.iter().any(|queue| !queue.lock().is_empty())
    }
}
