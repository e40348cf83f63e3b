use crate::connectivity::ConnectivityMonitor;
use crate::remote::{ElectionApi, RemoteError};
use std::future::Future;
use std::sync::Arc;
use tokio::time::Duration;

pub(super) enum RemoteOutcome<T> {
    Done(T),
    Failed(RemoteError),
    /// The monitor said Offline. No call was attempted.
    Offline,
}

/// RemoteGateway is the one place that decides whether an operation goes to the server.
///
/// Online, the call runs under the call timeout. A failure is reported to the monitor, which
/// drops to Offline on anything but a permanent rejection, and handed back so the caller can
/// fall back to the local cache.
pub(super) struct RemoteGateway {
    logger: slog::Logger,
    api: Arc<dyn ElectionApi>,
    monitor: Arc<ConnectivityMonitor>,
    call_timeout: Duration,
}

impl RemoteGateway {
    pub(super) fn new(
        logger: slog::Logger,
        api: Arc<dyn ElectionApi>,
        monitor: Arc<ConnectivityMonitor>,
        call_timeout: Duration,
    ) -> Self {
        RemoteGateway {
            logger,
            api,
            monitor,
            call_timeout,
        }
    }

    pub(super) fn monitor(&self) -> &Arc<ConnectivityMonitor> {
        &self.monitor
    }

    pub(super) async fn call<T, F, Fut>(&self, action: &'static str, call: F) -> RemoteOutcome<T>
    where
        F: FnOnce(Arc<dyn ElectionApi>) -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        if !self.monitor.is_online() {
            slog::debug!(self.logger, "Offline, serving {} locally", action);
            return RemoteOutcome::Offline;
        }

        let result = match tokio::time::timeout(self.call_timeout, call(self.api.clone())).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.call_timeout)),
        };

        match result {
            Ok(value) => RemoteOutcome::Done(value),
            Err(e) => {
                if e.is_permanent() {
                    slog::info!(self.logger, "Remote {} rejected: {}", action, e);
                } else {
                    slog::warn!(self.logger, "Remote {} failed: {}", action, e);
                }
                self.monitor.report_failure(&e);
                RemoteOutcome::Failed(e)
            }
        }
    }
}
