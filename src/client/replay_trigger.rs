use crate::client::sync_client::SyncClient;
use crate::connectivity::{Connectivity, ConnectivityListener};
use std::sync::{Arc, Weak};

/// ReplayTrigger replays the outbox every time the client comes back Online.
///
/// The task ends once the monitor is gone or the client has been dropped.
pub(super) struct ReplayTrigger {
    logger: slog::Logger,
    listener: ConnectivityListener,
    client: Weak<SyncClient>,
}

impl ReplayTrigger {
    /// `listener` must be subscribed before the first probe, or the first Online transition is
    /// missed.
    pub(super) fn spawn(logger: slog::Logger, listener: ConnectivityListener, client: &Arc<SyncClient>) {
        let trigger = ReplayTrigger {
            logger,
            listener,
            client: Arc::downgrade(client),
        };
        tokio::task::spawn(trigger.run());
    }

    async fn run(mut self) {
        while let Some(state) = self.listener.next().await {
            if state != Connectivity::Online {
                continue;
            }

            let client = match self.client.upgrade() {
                Some(client) => client,
                None => break,
            };
            match client.replay_outbox().await {
                Ok(report) => slog::debug!(self.logger, "Replay after reconnect: {:?}", report),
                Err(e) => slog::error!(self.logger, "Replay after reconnect failed: {}", e),
            }
        }

        slog::debug!(self.logger, "ReplayTrigger exiting");
    }
}
