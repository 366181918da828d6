use pregel_api::core::entities::VID;

/// Unreduced messages addressed to a single node
#[derive(Debug, Default, Clone)]
pub(crate) struct Inbox {
    values: Vec<f64>,
    // empty unless senders are tracked
    senders: Vec<VID>,
}

impl Inbox {
    #[inline]
    pub(crate) fn push(&mut self, sender: Option<VID>, value: f64) {
        self.values.push(value);
        if let Some(sender) = sender {
            self.senders.push(sender);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.senders.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, Vec<VID>) {
        (self.values, self.senders)
    }
}
