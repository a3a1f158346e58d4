//! Message bridge between the host and its surfaces.
//!
//! Surface-to-host traffic arrives as raw IPC bodies and is validated into
//! a [`SurfaceTopic`] before anything in the host sees it. Validated
//! messages fan out to subscribers in registration order, except replies,
//! which complete the matching [`PendingReply`].

mod envelope;
mod pending;
pub mod topics;

use std::fmt;

use serde_json::Value;
use sightline_common::{CorrelationId, Unavailability};
use tracing::debug;

pub use envelope::{InboundMessage, OutboundEnvelope};
pub use pending::{PendingReplies, PendingReply};
pub use topics::{is_surface_topic_allowed, HostTopic, SurfaceTopic, TopicFilter};

/// Echo contract for the `message` topic.
pub fn echo_reply(text: &str) -> String {
    format!("{text} World!")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Handler = Box<dyn FnMut(InboundMessage<'_>)>;

struct Subscription {
    id: SubscriptionId,
    filter: TopicFilter,
    handler: Handler,
}

#[derive(Default)]
pub struct MessageBridge {
    next_subscription: u64,
    subscriptions: Vec<Subscription>,
    pending: PendingReplies,
    dropped: u64,
}

impl MessageBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a host listener for surface-originated messages.
    pub fn subscribe(
        &mut self,
        filter: TopicFilter,
        handler: impl FnMut(InboundMessage<'_>) + 'static,
    ) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.push(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        });
        debug!(subscription = %id, ?filter, "bridge subscriber added");
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    /// Hand a validated message to every matching subscriber.
    /// Returns how many handlers ran.
    pub fn deliver_inbound(&mut self, surface: &str, topic: &SurfaceTopic) -> usize {
        let message = InboundMessage { surface, topic };
        let mut delivered = 0;
        for sub in self
            .subscriptions
            .iter_mut()
            .filter(|s| s.filter.matches(topic))
        {
            (sub.handler)(message);
            delivered += 1;
        }
        delivered
    }

    /// Start a request conversation with `surface`.
    pub fn open_request(&self, surface: &str) -> PendingReply {
        self.pending.register(surface)
    }

    pub fn resolve_reply(&self, origin: &str, correlation: &CorrelationId, payload: Value) -> bool {
        self.pending.resolve(origin, correlation, payload)
    }

    pub fn reject_pending(&self, surface: &str, reason: Unavailability) -> usize {
        self.pending.reject_surface(surface, reason)
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn record_dropped(&mut self) {
        self.dropped += 1;
    }

    /// Surface envelopes rejected at the trust boundary so far.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }
}
