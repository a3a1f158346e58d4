use serde::Serialize;
use serde_json::Value;
use sightline_common::CorrelationId;

use super::topics::{HostTopic, SurfaceTopic};

/// A host-to-surface envelope, as handed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEnvelope {
    pub topic: String,
    pub payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationId>,
}

impl OutboundEnvelope {
    pub fn new(topic: &HostTopic) -> Self {
        Self {
            topic: topic.name().to_string(),
            payload: topic.payload(),
            correlation: None,
        }
    }

    pub fn with_correlation(mut self, correlation: CorrelationId) -> Self {
        self.correlation = Some(correlation);
        self
    }
}

/// A validated inbound message as seen by host subscribers.
#[derive(Debug, Clone, Copy)]
pub struct InboundMessage<'a> {
    /// Name of the originating surface.
    pub surface: &'a str,
    pub topic: &'a SurfaceTopic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_correlation() {
        let env = OutboundEnvelope::new(&HostTopic::Message("hi World!".into()));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"topic": "message", "payload": "hi World!"})
        );
    }

    #[test]
    fn serializes_with_correlation() {
        let env = OutboundEnvelope::new(&HostTopic::Ping).with_correlation("c-1".into());
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"topic": "ping", "payload": null, "correlation": "c-1"})
        );
    }
}
