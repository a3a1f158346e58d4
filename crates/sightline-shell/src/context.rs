//! Process-scoped shell state and the host side of the bridge.

use sightline_common::{ShellError, SurfaceId, Unavailability};
use tracing::{debug, info, warn};

use crate::backend::SurfaceBackend;
use crate::bridge::{
    echo_reply, HostTopic, MessageBridge, OutboundEnvelope, PendingReply, SurfaceTopic,
};
use crate::loader::SurfaceLoader;
use crate::registry::{ClosedSurface, SurfaceRegistry};

/// Everything the shell keeps for the lifetime of the process.
///
/// Built once at startup and owned by the lifecycle controller. Every
/// operation runs on the host thread with the backend passed in.
pub struct ShellContext {
    pub registry: SurfaceRegistry,
    pub loader: SurfaceLoader,
    pub bridge: MessageBridge,
    reveal_surface: String,
}

impl ShellContext {
    pub fn new(
        registry: SurfaceRegistry,
        loader: SurfaceLoader,
        reveal_surface: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            loader,
            bridge: MessageBridge::new(),
            reveal_surface: reveal_surface.into(),
        }
    }

    /// Surface revealed by `show-kinect`.
    pub fn reveal_surface(&self) -> &str {
        &self.reveal_surface
    }

    /// Send a message to a surface. Fails when the surface is not live.
    pub fn publish<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        surface: &str,
        topic: HostTopic,
    ) -> Result<(), ShellError> {
        let id = self.registry.lookup(surface)?.id();
        backend.deliver(id, &OutboundEnvelope::new(&topic))?;
        debug!(surface = %surface, topic = %topic.name(), "published");
        Ok(())
    }

    /// Send a message that expects exactly one reply.
    ///
    /// The returned future settles with the reply payload, or with
    /// `SurfaceUnavailable` if the surface closes first. No timeout is
    /// applied unless the caller asks for one.
    pub fn request<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        surface: &str,
        topic: HostTopic,
    ) -> Result<PendingReply, ShellError> {
        let id = self.registry.lookup(surface)?.id();
        let pending = self.bridge.open_request(surface);
        let envelope =
            OutboundEnvelope::new(&topic).with_correlation(pending.correlation().clone());
        // On failure `pending` drops here and releases its entry.
        backend.deliver(id, &envelope)?;
        debug!(
            surface = %surface,
            topic = %topic.name(),
            correlation = %pending.correlation(),
            "request sent"
        );
        Ok(pending)
    }

    pub fn set_visible<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        surface: &str,
        visible: bool,
    ) -> Result<bool, ShellError> {
        self.registry.set_visible(backend, surface, visible)
    }

    /// Close one surface and fail whatever was waiting on it.
    pub fn close_surface<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        id: SurfaceId,
    ) -> Option<ClosedSurface> {
        let closed = self.registry.close_surface(backend, id)?;
        self.bridge.reject_pending(&closed.name, Unavailability::Closed);
        Some(closed)
    }

    pub fn close_all<B: SurfaceBackend>(&mut self, backend: &mut B) -> Vec<ClosedSurface> {
        let closed = self.registry.close_all(backend);
        for c in &closed {
            self.bridge.reject_pending(&c.name, Unavailability::Closed);
        }
        closed
    }

    /// Validate and act on one raw IPC body from a surface.
    ///
    /// Rejected envelopes are logged and dropped; nothing is ever sent
    /// back to the surface about them.
    pub fn handle_ipc<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        origin: SurfaceId,
        body: &str,
    ) {
        let Some(surface) = self.registry.name_of(origin).map(str::to_owned) else {
            debug!(%origin, "IPC from unregistered surface ignored");
            return;
        };

        let topic = match SurfaceTopic::parse(body) {
            Ok(topic) => topic,
            Err(e) => {
                self.bridge.record_dropped();
                warn!(
                    surface = %surface,
                    body_len = body.len(),
                    error = %e,
                    "IPC message rejected"
                );
                return;
            }
        };
        debug!(surface = %surface, topic = %topic.name(), "IPC message dispatched");

        if let SurfaceTopic::Reply {
            correlation,
            payload,
        } = topic
        {
            self.bridge.resolve_reply(&surface, &correlation, payload);
            return;
        }

        self.bridge.deliver_inbound(&surface, &topic);

        match topic {
            SurfaceTopic::ShowKinect => {
                let target = self.reveal_surface.clone();
                match self.registry.set_visible(backend, &target, true) {
                    Ok(true) => {
                        info!(surface = %target, requested_by = %surface, "surface revealed")
                    }
                    Ok(false) => debug!(surface = %target, "already visible"),
                    Err(e) => warn!(surface = %target, error = %e, "show-kinect failed"),
                }
            }
            SurfaceTopic::Message(text) => {
                let reply = HostTopic::Message(echo_reply(&text));
                if let Err(e) = self.publish(backend, &surface, reply) {
                    warn!(surface = %surface, error = %e, "echo reply failed");
                }
            }
            SurfaceTopic::Reply { .. } => {}
        }
    }
}
