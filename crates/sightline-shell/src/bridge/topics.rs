//! The closed set of bridge topics and the surface-side allowlist.

use serde::Deserialize;
use serde_json::Value;
use sightline_common::{CorrelationId, ShellError};

// =============================================================================
// TOPIC NAMES
// =============================================================================

pub const SHOW_KINECT: &str = "show-kinect";
pub const MESSAGE: &str = "message";
pub const REPLY: &str = "reply";
pub const PING: &str = "ping";

/// Topics a surface may send to the host.
///
/// Anything else is rejected at the trust boundary and logged.
const SURFACE_TOPICS: &[&str] = &[SHOW_KINECT, MESSAGE, REPLY];

/// Check whether a surface-originated topic is in the allowlist.
pub fn is_surface_topic_allowed(topic: &str) -> bool {
    SURFACE_TOPICS.contains(&topic)
}

// =============================================================================
// SURFACE -> HOST
// =============================================================================

#[derive(Deserialize)]
struct RawEnvelope {
    topic: String,
    #[serde(default)]
    payload: Value,
    #[serde(default)]
    correlation: Option<CorrelationId>,
}

/// A validated surface-to-host message.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceTopic {
    /// Reveal the auxiliary surface.
    ShowKinect,
    Message(String),
    /// Answer to a host [`request`](crate::ShellContext::request).
    Reply {
        correlation: CorrelationId,
        payload: Value,
    },
}

impl SurfaceTopic {
    /// Parse and validate a raw IPC body.
    pub fn parse(body: &str) -> Result<Self, ShellError> {
        let raw: RawEnvelope = serde_json::from_str(body)
            .map_err(|e| ShellError::MalformedEnvelope(e.to_string()))?;

        if !is_surface_topic_allowed(&raw.topic) {
            return Err(ShellError::UnauthorizedTopic(raw.topic));
        }

        match raw.topic.as_str() {
            SHOW_KINECT => Ok(Self::ShowKinect),
            MESSAGE => match raw.payload {
                Value::String(text) => Ok(Self::Message(text)),
                other => Err(ShellError::MalformedEnvelope(format!(
                    "'{MESSAGE}' expects a string payload, got {}",
                    json_kind(&other)
                ))),
            },
            REPLY => {
                let correlation = raw.correlation.ok_or_else(|| {
                    ShellError::MalformedEnvelope(format!("'{REPLY}' without correlation"))
                })?;
                Ok(Self::Reply {
                    correlation,
                    payload: raw.payload,
                })
            }
            other => Err(ShellError::UnauthorizedTopic(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowKinect => SHOW_KINECT,
            Self::Message(_) => MESSAGE,
            Self::Reply { .. } => REPLY,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// HOST -> SURFACE
// =============================================================================

/// A host-to-surface message.
#[derive(Debug, Clone, PartialEq)]
pub enum HostTopic {
    Message(String),
    /// Liveness probe. Surfaces answer a correlated ping with any payload.
    Ping,
}

impl HostTopic {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => MESSAGE,
            Self::Ping => PING,
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            Self::Message(text) => Value::String(text.clone()),
            Self::Ping => Value::Null,
        }
    }
}

/// Which surface-originated topics a host subscriber receives.
///
/// Replies are consumed by the correlation table and never reach
/// subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicFilter {
    Any,
    ShowKinect,
    Message,
}

impl TopicFilter {
    pub fn matches(&self, topic: &SurfaceTopic) -> bool {
        match (self, topic) {
            (_, SurfaceTopic::Reply { .. }) => false,
            (Self::Any, _) => true,
            (Self::ShowKinect, SurfaceTopic::ShowKinect) => true,
            (Self::Message, SurfaceTopic::Message(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_contents() {
        assert!(is_surface_topic_allowed("show-kinect"));
        assert!(is_surface_topic_allowed("message"));
        assert!(is_surface_topic_allowed("reply"));
        assert!(!is_surface_topic_allowed("ping"));
        assert!(!is_surface_topic_allowed("eval"));
        assert!(!is_surface_topic_allowed(""));
        assert!(!is_surface_topic_allowed("MESSAGE"));
    }

    #[test]
    fn parse_show_kinect() {
        let topic = SurfaceTopic::parse(r#"{"topic":"show-kinect"}"#).unwrap();
        assert_eq!(topic, SurfaceTopic::ShowKinect);
        // A stray payload is ignored.
        let topic = SurfaceTopic::parse(r#"{"topic":"show-kinect","payload":1}"#).unwrap();
        assert_eq!(topic, SurfaceTopic::ShowKinect);
    }

    #[test]
    fn parse_message() {
        let topic = SurfaceTopic::parse(r#"{"topic":"message","payload":"hi"}"#).unwrap();
        assert_eq!(topic, SurfaceTopic::Message("hi".into()));
        assert_eq!(topic.name(), "message");
    }

    #[test]
    fn message_needs_string_payload() {
        let err = SurfaceTopic::parse(r#"{"topic":"message","payload":{"a":1}}"#).unwrap_err();
        assert!(matches!(err, ShellError::MalformedEnvelope(ref m) if m.contains("object")));
        let err = SurfaceTopic::parse(r#"{"topic":"message"}"#).unwrap_err();
        assert!(matches!(err, ShellError::MalformedEnvelope(ref m) if m.contains("null")));
    }

    #[test]
    fn parse_reply() {
        let topic =
            SurfaceTopic::parse(r#"{"topic":"reply","correlation":"abc","payload":[1,2]}"#)
                .unwrap();
        assert_eq!(
            topic,
            SurfaceTopic::Reply {
                correlation: CorrelationId::from("abc"),
                payload: serde_json::json!([1, 2]),
            }
        );
    }

    #[test]
    fn reply_without_correlation_is_malformed() {
        let err = SurfaceTopic::parse(r#"{"topic":"reply","payload":1}"#).unwrap_err();
        assert!(matches!(err, ShellError::MalformedEnvelope(_)));
    }

    #[test]
    fn unknown_topic_is_unauthorized() {
        let err = SurfaceTopic::parse(r#"{"topic":"open-file","payload":"/etc/passwd"}"#)
            .unwrap_err();
        assert_eq!(err, ShellError::UnauthorizedTopic("open-file".into()));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            SurfaceTopic::parse("not json").unwrap_err(),
            ShellError::MalformedEnvelope(_)
        ));
        assert!(matches!(
            SurfaceTopic::parse(r#"{"payload":"hi"}"#).unwrap_err(),
            ShellError::MalformedEnvelope(_)
        ));
    }

    #[test]
    fn host_topic_wire_shape() {
        let msg = HostTopic::Message("hi World!".into());
        assert_eq!(msg.name(), "message");
        assert_eq!(msg.payload(), serde_json::json!("hi World!"));
        assert_eq!(HostTopic::Ping.name(), "ping");
        assert_eq!(HostTopic::Ping.payload(), Value::Null);
    }

    #[test]
    fn filters_never_match_replies() {
        let reply = SurfaceTopic::Reply {
            correlation: CorrelationId::from("x"),
            payload: Value::Null,
        };
        assert!(!TopicFilter::Any.matches(&reply));
        assert!(TopicFilter::Any.matches(&SurfaceTopic::ShowKinect));
        assert!(TopicFilter::Message.matches(&SurfaceTopic::Message("a".into())));
        assert!(!TopicFilter::Message.matches(&SurfaceTopic::ShowKinect));
        assert!(TopicFilter::ShowKinect.matches(&SurfaceTopic::ShowKinect));
    }
}
