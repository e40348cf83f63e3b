use crate::connectivity::ConnectivityListener;
use crate::remote::{ElectionApi, RemoteError};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Online => f.write_str("online"),
            Connectivity::Offline => f.write_str("offline"),
        }
    }
}

/// NetworkSignal is an external hint from the platform about the network interface.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NetworkSignal {
    Online,
    Offline,
}

/// ConnectivityMonitor is the two-state Online/Offline machine in front of the remote API.
///
/// It starts Offline. Only a probe moves it Online: fetching the election status within the probe
/// timeout and decoding a well formed answer. It drops to Offline on a failed probe, on any
/// failure a caller reports other than a permanent rejection, and on an Offline network signal.
/// Coming back Online is a transition, so listeners get to retry whatever the failure held back.
pub struct ConnectivityMonitor {
    logger: slog::Logger,
    api: Arc<dyn ElectionApi>,
    probe_timeout: Duration,
    state: watch::Sender<Connectivity>,
    // Keeps the channel open so sends never fail.
    _state_keepalive: watch::Receiver<Connectivity>,
    probe_lock: Mutex<()>,
}

impl ConnectivityMonitor {
    pub fn new(logger: slog::Logger, api: Arc<dyn ElectionApi>, probe_timeout: Duration) -> Self {
        let (state, state_keepalive) = watch::channel(Connectivity::Offline);

        ConnectivityMonitor {
            logger,
            api,
            probe_timeout,
            state,
            _state_keepalive: state_keepalive,
            probe_lock: Mutex::new(()),
        }
    }

    pub fn state(&self) -> Connectivity {
        *self.state.borrow()
    }

    pub fn is_online(&self) -> bool {
        self.state() == Connectivity::Online
    }

    pub fn subscribe(&self) -> ConnectivityListener {
        ConnectivityListener::new(self.state.subscribe())
    }

    /// Runs one bounded probe and moves to the state it implies. Concurrent callers wait for the
    /// probe in flight and then run their own.
    pub async fn probe(&self) -> Connectivity {
        let _guard = self.probe_lock.lock().await;

        let outcome = match tokio::time::timeout(self.probe_timeout, self.api.get_election_status()).await {
            Ok(Ok(status)) => {
                slog::debug!(self.logger, "Probe succeeded, election is {}", status.phase.as_str());
                Connectivity::Online
            }
            Ok(Err(e)) => {
                slog::info!(self.logger, "Probe failed: {}", e);
                Connectivity::Offline
            }
            Err(_) => {
                slog::info!(self.logger, "Probe timed out after {:?}", self.probe_timeout);
                Connectivity::Offline
            }
        };

        self.transition(outcome);
        outcome
    }

    /// Callers report failed remote calls here. Anything but a permanent rejection drops to
    /// Offline until the next successful probe. A permanent rejection proves the server answered.
    pub fn report_failure(&self, error: &RemoteError) {
        if error.is_permanent() {
            return;
        }

        slog::info!(self.logger, "Remote call failed: {}", error);
        self.transition(Connectivity::Offline);
    }

    pub async fn handle_network_signal(&self, signal: NetworkSignal) -> Connectivity {
        slog::info!(self.logger, "Network signal: {:?}", signal);
        match signal {
            NetworkSignal::Offline => {
                self.transition(Connectivity::Offline);
                Connectivity::Offline
            }
            NetworkSignal::Online => self.probe().await,
        }
    }

    fn transition(&self, next: Connectivity) {
        if self.state() == next {
            return;
        }

        slog::info!(self.logger, "Connectivity is now {}", next);
        let _ = self.state.send(next);
    }
}
