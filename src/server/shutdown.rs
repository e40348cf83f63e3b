use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Links a server to whoever may stop it. The signal resolves once `shutdown()` is called or the
/// handle is dropped.
pub fn shutdown_signal() -> (RpcServerShutdownHandle, RpcServerShutdownSignal) {
    let (tx, rx) = oneshot::channel();

    (RpcServerShutdownHandle { tx }, RpcServerShutdownSignal { rx })
}

pub struct RpcServerShutdownHandle {
    tx: oneshot::Sender<()>,
}

impl RpcServerShutdownHandle {
    pub fn shutdown(self) {
        // Err only means the server is already gone.
        let _ = self.tx.send(());
    }

    /// Hands the handle to a task that shuts the server down on ctrl-c.
    pub fn shutdown_on_ctrl_c(self, logger: slog::Logger) {
        tokio::task::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => slog::info!(logger, "Received ctrl-c, shutting down"),
                Err(e) => slog::error!(logger, "Can't listen for ctrl-c, shutting down: {}", e),
            }
            self.shutdown();
        });
    }
}

pub struct RpcServerShutdownSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for RpcServerShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A sent value and a dropped sender both mean stop.
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_still_pending, with_sanity_timeout};

    #[tokio::test]
    async fn resolves_on_shutdown() {
        let (handle, mut signal) = shutdown_signal();
        assert_still_pending(&mut signal).await;

        handle.shutdown();
        with_sanity_timeout(signal).await;
    }

    #[tokio::test]
    async fn resolves_when_handle_is_dropped() {
        let (handle, signal) = shutdown_signal();

        drop(handle);
        with_sanity_timeout(signal).await;
    }
}
