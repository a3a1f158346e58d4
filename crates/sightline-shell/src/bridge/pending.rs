//! Correlation table for host-to-surface requests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;

use serde_json::Value;
use sightline_common::{CorrelationId, ShellError, Unavailability};
use tokio::sync::oneshot;
use tracing::{debug, warn};

type ReplyResult = Result<Value, ShellError>;

struct Entry {
    surface: String,
    tx: oneshot::Sender<ReplyResult>,
}

/// Outstanding requests, shared between the bridge and every live
/// [`PendingReply`].
#[derive(Clone, Default)]
pub struct PendingReplies {
    inner: Arc<Mutex<HashMap<CorrelationId, Entry>>>,
}

impl PendingReplies {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CorrelationId, Entry>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a conversation with `surface` under a fresh correlation id.
    pub fn register(&self, surface: &str) -> PendingReply {
        let correlation = CorrelationId::new();
        let (tx, rx) = oneshot::channel();
        self.lock().insert(
            correlation.clone(),
            Entry {
                surface: surface.to_string(),
                tx,
            },
        );
        PendingReply {
            correlation,
            surface: surface.to_string(),
            rx,
            table: self.clone(),
        }
    }

    /// Complete the request `correlation` with `payload`.
    ///
    /// Only the addressed surface may answer. Returns whether a waiting
    /// request consumed the reply.
    pub fn resolve(&self, origin: &str, correlation: &CorrelationId, payload: Value) -> bool {
        let mut table = self.lock();
        let owner = match table.get(correlation) {
            Some(entry) => entry.surface.clone(),
            None => {
                debug!(surface = %origin, %correlation, "reply for unknown correlation dropped");
                return false;
            }
        };
        if owner != origin {
            warn!(
                surface = %origin,
                expected = %owner,
                %correlation,
                "reply from foreign surface dropped"
            );
            return false;
        }
        match table.remove(correlation) {
            Some(entry) => entry.tx.send(Ok(payload)).is_ok(),
            None => false,
        }
    }

    /// Fail every request addressed to `surface`.
    pub fn reject_surface(&self, surface: &str, reason: Unavailability) -> usize {
        let mut table = self.lock();
        let ids: Vec<CorrelationId> = table
            .iter()
            .filter(|(_, e)| e.surface == surface)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &ids {
            if let Some(entry) = table.remove(id) {
                let _ = entry.tx.send(Err(ShellError::unavailable(surface, reason)));
            }
        }
        if !ids.is_empty() {
            debug!(surface = %surface, count = ids.len(), "pending requests rejected");
        }
        ids.len()
    }

    /// Forget a request without completing it.
    pub fn cancel(&self, correlation: &CorrelationId) {
        self.lock().remove(correlation);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The eventual answer to one host request.
///
/// Resolves with the reply payload, or with `SurfaceUnavailable` when the
/// target closes first. Dropping it cancels the request.
pub struct PendingReply {
    correlation: CorrelationId,
    surface: String,
    rx: oneshot::Receiver<ReplyResult>,
    table: PendingReplies,
}

impl PendingReply {
    pub fn correlation(&self) -> &CorrelationId {
        &self.correlation
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Wait at most `limit` for the reply.
    ///
    /// The timer comes from Tokio, so this must be awaited inside a Tokio
    /// runtime with its time driver enabled (`enable_all`). Outside one it
    /// fails with [`ShellError::HostNotReady`] and the request is released.
    pub async fn with_timeout(self, limit: Duration) -> ReplyResult {
        if tokio::runtime::Handle::try_current().is_err() {
            warn!(surface = %self.surface, "bounded request awaited outside a Tokio runtime");
            return Err(ShellError::HostNotReady);
        }
        let surface = self.surface.clone();
        match tokio::time::timeout(limit, self).await {
            Ok(result) => result,
            Err(_) => Err(ShellError::RequestTimeout(surface)),
        }
    }
}

impl Future for PendingReply {
    type Output = ReplyResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Sender gone without an answer: the table was torn down.
            Poll::Ready(Err(_)) => Poll::Ready(Err(ShellError::unavailable(
                this.surface.clone(),
                Unavailability::Closed,
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        self.table.cancel(&self.correlation);
    }
}

impl std::fmt::Debug for PendingReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingReply")
            .field("correlation", &self.correlation)
            .field("surface", &self.surface)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_wait_outside_runtime_is_an_error() {
        let table = PendingReplies::new();
        let reply = table.register("main");

        let result = pollster::block_on(reply.with_timeout(Duration::from_millis(20)));
        assert_eq!(result, Err(ShellError::HostNotReady));
        assert!(table.is_empty());
    }

    #[test]
    fn bounded_wait_on_blocking_runtime_times_out() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let table = PendingReplies::new();
        let reply = table.register("main");

        let result = runtime.block_on(reply.with_timeout(Duration::from_millis(20)));
        assert_eq!(result, Err(ShellError::RequestTimeout("main".into())));
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn resolves_with_matching_reply() {
        let table = PendingReplies::new();
        let reply = table.register("main");
        let cid = reply.correlation().clone();

        assert!(table.resolve("main", &cid, serde_json::json!("pong")));
        assert_eq!(reply.await.unwrap(), serde_json::json!("pong"));
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn foreign_surface_cannot_answer() {
        let table = PendingReplies::new();
        let reply = table.register("main");
        let cid = reply.correlation().clone();

        assert!(!table.resolve("kinect", &cid, serde_json::json!(1)));
        assert_eq!(table.len(), 1);

        assert!(table.resolve("main", &cid, serde_json::json!(2)));
        assert_eq!(reply.await.unwrap(), serde_json::json!(2));
    }

    #[tokio::test]
    async fn second_reply_is_dropped() {
        let table = PendingReplies::new();
        let reply = table.register("main");
        let cid = reply.correlation().clone();

        assert!(table.resolve("main", &cid, serde_json::json!(1)));
        assert!(!table.resolve("main", &cid, serde_json::json!(2)));
        assert_eq!(reply.await.unwrap(), serde_json::json!(1));
    }

    #[tokio::test]
    async fn reject_surface_fails_only_that_surface() {
        let table = PendingReplies::new();
        let to_kinect = table.register("kinect");
        let to_main = table.register("main");

        assert_eq!(table.reject_surface("kinect", Unavailability::Closed), 1);
        assert_eq!(
            to_kinect.await.unwrap_err(),
            ShellError::unavailable("kinect", Unavailability::Closed)
        );
        assert_eq!(table.len(), 1);
        drop(to_main);
    }

    #[tokio::test]
    async fn dropping_reply_releases_entry() {
        let table = PendingReplies::new();
        let reply = table.register("main");
        let cid = reply.correlation().clone();
        assert_eq!(table.len(), 1);

        drop(reply);
        assert!(table.is_empty());
        assert!(!table.resolve("main", &cid, Value::Null));
    }

    #[tokio::test]
    async fn timeout_rejects_and_cleans_up() {
        let table = PendingReplies::new();
        let reply = table.register("kinect");
        let cid = reply.correlation().clone();

        let err = reply
            .with_timeout(Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err, ShellError::RequestTimeout("kinect".into()));
        assert!(table.is_empty());

        // A late reply finds nothing to complete.
        assert!(!table.resolve("kinect", &cid, serde_json::json!("late")));
    }

    #[tokio::test]
    async fn reply_within_timeout_succeeds() {
        let table = PendingReplies::new();
        let reply = table.register("main");
        let cid = reply.correlation().clone();
        table.resolve("main", &cid, serde_json::json!({"ok": true}));

        let value = reply.with_timeout(Duration::from_secs(1)).await.unwrap();
        assert_eq!(value, serde_json::json!({"ok": true}));
    }
}
