//! Message delivery between supersteps.
//!
//! Every variant offers the same three operations: `send` may be called
//! concurrently from any partition, `messages_for` is only called by the
//! partition owning the receiving node, and `swap` runs between supersteps
//! with exclusive access.
mod async_queue;
mod inbox;
mod queue;
pub mod reducer;
mod reducing;

pub use async_queue::AsyncQueueMessenger;
pub use queue::SyncQueueMessenger;
pub use reducer::{Count, Max, Min, Reducer, Sum};
pub use reducing::ReducingMessenger;

use inbox::Inbox;
use parking_lot::Mutex;
use pregel_api::core::entities::VID;
use std::vec;

/// The messages delivered to one node in the current superstep.
///
/// Reading the messages of a node consumes them. In asynchronous runs the
/// messages still unread when this is dropped go back to the node's queue.
#[derive(Debug, Default)]
pub struct Messages<'a> {
    inner: Inner,
    sender: Option<VID>,
    return_to: Option<&'a Mutex<Inbox>>,
}

#[derive(Debug, Default)]
enum Inner {
    #[default]
    Empty,
    Single(Option<f64>, Option<VID>),
    Queue {
        values: vec::IntoIter<f64>,
        senders: vec::IntoIter<VID>,
    },
}

impl<'a> Messages<'a> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn single(value: f64, sender: Option<VID>) -> Self {
        Self {
            inner: Inner::Single(Some(value), sender),
            sender: None,
            return_to: None,
        }
    }

    pub(crate) fn queue(values: Vec<f64>, senders: Vec<VID>) -> Self {
        if values.is_empty() {
            return Self::empty();
        }
        Self {
            inner: Inner::Queue {
                values: values.into_iter(),
                senders: senders.into_iter(),
            },
            sender: None,
            return_to: None,
        }
    }

    /// Push whatever is left unread back into `queue` on drop
    pub(crate) fn returning_unread_to(mut self, queue: &'a Mutex<Inbox>) -> Self {
        self.return_to = Some(queue);
        self
    }

    /// Sender of the message most recently returned by `next`.
    ///
    /// `None` before the first message, or when senders are not tracked.
    /// For reduced messages this is the sender whose message last changed
    /// the reduced value.
    pub fn sender(&self) -> Option<VID> {
        self.sender
    }
}

impl Iterator for Messages<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match &mut self.inner {
            Inner::Empty => None,
            Inner::Single(value, sender) => {
                let value = value.take()?;
                self.sender = *sender;
                Some(value)
            }
            Inner::Queue { values, senders } => {
                let value = values.next()?;
                self.sender = senders.next();
                Some(value)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match &self.inner {
            Inner::Empty => 0,
            Inner::Single(value, _) => value.is_some() as usize,
            Inner::Queue { values, .. } => values.len(),
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Messages<'_> {}

impl Drop for Messages<'_> {
    fn drop(&mut self) {
        let Some(queue) = self.return_to else {
            return;
        };
        match std::mem::take(&mut self.inner) {
            Inner::Empty => {}
            Inner::Single(value, sender) => {
                if let Some(value) = value {
                    queue.lock().push(sender, value);
                }
            }
            Inner::Queue { values, senders } => {
                if values.len() == 0 {
                    return;
                }
                let senders = senders.as_slice();
                let mut queue = queue.lock();
                for (i, value) in values.enumerate() {
                    queue.push(senders.get(i).copied(), value);
                }
            }
        }
    }
}

/// Message transport for one run
#[derive(Debug)]
pub enum Messenger {
    Sync(SyncQueueMessenger),
    Reducing(ReducingMessenger),
    Async(AsyncQueueMessenger),
}

impl Messenger {
    pub fn new(
        node_count: usize,
        reducer: Option<Box<dyn Reducer>>,
        asynchronous: bool,
        track_sender: bool,
    ) -> Self {
        match (asynchronous, reducer) {
            (true, reducer) => {
                Messenger::Async(AsyncQueueMessenger::new(node_count, reducer, track_sender))
            }
            (false, Some(reducer)) => {
                Messenger::Reducing(ReducingMessenger::new(node_count, reducer, track_sender))
            }
            (false, None) => Messenger::Sync(SyncQueueMessenger::new(node_count, track_sender)),
        }
    }

    #[inline]
    pub fn send(&self, sender: VID, target: VID, value: f64) {
        match self {
            Messenger::Sync(m) => m.send(sender, target, value),
            Messenger::Reducing(m) => m.send(sender, target, value),
            Messenger::Async(m) => m.send(sender, target, value),
        }
    }

    /// Take the messages delivered to `node` for the current superstep
    pub fn messages_for(&self, node: VID) -> Messages<'_> {
        match self {
            Messenger::Sync(m) => m.messages_for(node),
            Messenger::Reducing(m) => m.messages_for(node),
            Messenger::Async(m) => m.messages_for(node),
        }
    }

    /// Whether `node` has messages waiting for the current superstep
    pub fn has_messages(&self, node: VID) -> bool {
        match self {
            Messenger::Sync(m) => m.has_messages(node),
            Messenger::Reducing(m) => m.has_messages(node),
            Messenger::Async(m) => m.has_messages(node),
        }
    }

    /// Whether messages left unread survive into the next superstep.
    ///
    /// Synchronous inboxes are reset by every swap, only asynchronous queues
    /// can still hold messages once a superstep is over.
    pub fn has_unread_messages(&self) -> bool {
        match self {
            Messenger::Sync(_) | Messenger::Reducing(_) => false,
            Messenger::Async(m) => m.has_unread_messages(),
        }
    }

    /// Make the messages sent during the last superstep visible
    pub fn swap(&mut self) {
        match self {
            Messenger::Sync(m) => m.swap(),
            Messenger::Reducing(m) => m.swap(),
            Messenger::Async(_) => {}
        }
    }
}
