//! Backend-agnostic core of the Sightline shell.
//!
//! - [`registry`]: named surfaces, their visibility and persisted placement
//! - [`loader`]: page name to content location, packaged or live
//! - [`bridge`]: typed host/surface messaging behind a topic allowlist
//! - [`lifecycle`]: readiness, ordered startup, shutdown when the last
//!   interactive surface closes
//!
//! Native windows are reached only through the [`SurfaceBackend`] trait,
//! which the caller passes into every operation from the host thread.

pub mod backend;
pub mod bridge;
pub mod context;
pub mod lifecycle;
pub mod loader;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{OpenRequest, SurfaceBackend, SurfaceEvent};
pub use bridge::{
    echo_reply, HostTopic, InboundMessage, MessageBridge, OutboundEnvelope, PendingReply,
    SubscriptionId, SurfaceTopic, TopicFilter,
};
pub use context::ShellContext;
pub use lifecycle::{
    host_readiness, Flow, HostReadiness, LifecycleController, Phase, ReadyTrigger, StartupReport,
    SurfaceFailure,
};
pub use loader::{ContentLocation, LaunchMode, SurfaceLoader, LAUNCH_MODE_ENV};
pub use registry::{ClosedSurface, LoadState, PlacementStore, SurfaceHandle, SurfaceRegistry};
