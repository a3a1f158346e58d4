use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use sightline_common::ShellError;
use tokio::sync::oneshot;

/// Fires host readiness exactly once.
#[derive(Debug)]
pub struct ReadyTrigger(oneshot::Sender<()>);

impl ReadyTrigger {
    pub fn fire(self) {
        // The waiting side may already be gone; nothing to report then.
        let _ = self.0.send(());
    }
}

/// Single-fire future that completes once the host environment can
/// create windows.
///
/// Resolves with `HostNotReady` if the trigger is dropped unfired.
#[derive(Debug)]
pub struct HostReadiness(oneshot::Receiver<()>);

impl HostReadiness {
    /// Readiness that has already fired.
    pub fn ready() -> Self {
        let (trigger, readiness) = host_readiness();
        trigger.fire();
        readiness
    }
}

impl Future for HostReadiness {
    type Output = Result<(), ShellError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0)
            .poll(cx)
            .map(|r| r.map_err(|_| ShellError::HostNotReady))
    }
}

pub fn host_readiness() -> (ReadyTrigger, HostReadiness) {
    let (tx, rx) = oneshot::channel();
    (ReadyTrigger(tx), HostReadiness(rx))
}
