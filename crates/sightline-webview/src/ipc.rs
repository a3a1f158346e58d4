//! The script-side half of the message bridge.
//!
//! Messages flow in both directions:
//! - **surface -> host**: page code calls `window.ipc.send(topic, payload)`,
//!   which posts `{"topic", "payload"}` through wry's native
//!   `window.ipc.postMessage`.
//! - **host -> surface**: the host evaluates
//!   `window.ipc._dispatch(topic, payload, correlation)`. When a correlation
//!   id is present the shim posts the handler's return value back as a
//!   `reply` envelope.

use sightline_shell::OutboundEnvelope;

/// Injected into every surface before any page script runs.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    var native = window.ipc;
    if (!native || typeof native.postMessage !== 'function') {
        return;
    }
    var post = native.postMessage.bind(native);
    var handlers = {};

    function emit(topic, payload, correlation) {
        var env = { topic: topic };
        if (payload !== undefined) {
            env.payload = payload;
        }
        if (correlation) {
            env.correlation = correlation;
        }
        post(JSON.stringify(env));
    }

    window.ipc = {
        postMessage: post,
        send: function(topic, payload) {
            emit(topic, payload);
        },
        on: function(topic, callback) {
            (handlers[topic] = handlers[topic] || []).push(callback);
        },
        off: function(topic, callback) {
            var list = handlers[topic] || [];
            handlers[topic] = list.filter(function(cb) { return cb !== callback; });
        },
        _dispatch: function(topic, payload, correlation) {
            var list = handlers[topic] || [];
            var result = null;
            for (var i = 0; i < list.length; i++) {
                try {
                    var value = list[i](payload);
                    if (value !== undefined && result === null) {
                        result = value;
                    }
                } catch (e) {
                    console.error('ipc handler for ' + topic + ' failed', e);
                }
            }
            if (correlation) {
                emit('reply', result, correlation);
            }
        }
    };
})();
"#;

/// Build the script that hands `envelope` to the surface's shim.
pub fn js_dispatch(envelope: &OutboundEnvelope) -> String {
    let topic = serde_json::to_string(&envelope.topic).unwrap_or_else(|_| "\"\"".to_string());
    let payload = serde_json::to_string(&envelope.payload).unwrap_or_else(|_| "null".to_string());
    let correlation = match &envelope.correlation {
        Some(c) => serde_json::to_string(c).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    };
    format!("window.ipc._dispatch({topic}, {payload}, {correlation});")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_shell::HostTopic;

    #[test]
    fn dispatch_without_correlation() {
        let env = OutboundEnvelope::new(&HostTopic::Message("hi World!".into()));
        assert_eq!(
            js_dispatch(&env),
            r#"window.ipc._dispatch("message", "hi World!", null);"#
        );
    }

    #[test]
    fn dispatch_with_correlation() {
        let env = OutboundEnvelope::new(&HostTopic::Ping).with_correlation("abc".into());
        assert_eq!(
            js_dispatch(&env),
            r#"window.ipc._dispatch("ping", null, "abc");"#
        );
    }

    #[test]
    fn dispatch_escapes_payload() {
        let env = OutboundEnvelope::new(&HostTopic::Message(
            "</script><script>alert(1)</script>\"".into(),
        ));
        let js = js_dispatch(&env);
        assert!(js.starts_with("window.ipc._dispatch(\"message\", \""));
        assert!(js.contains(r#"\""#));
        assert!(js.ends_with(", null);"));
    }

    #[test]
    fn init_script_exposes_bridge_api() {
        assert!(IPC_INIT_SCRIPT.contains("send: function(topic, payload)"));
        assert!(IPC_INIT_SCRIPT.contains("on: function(topic, callback)"));
        assert!(IPC_INIT_SCRIPT.contains("_dispatch: function(topic, payload, correlation)"));
        assert!(IPC_INIT_SCRIPT.contains("emit('reply', result, correlation)"));
    }
}
