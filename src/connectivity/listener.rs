use crate::connectivity::Connectivity;
use tokio::sync::watch;

/// ConnectivityListener observes Online/Offline transitions of one monitor.
#[derive(Clone)]
pub struct ConnectivityListener {
    rcv: watch::Receiver<Connectivity>,
}

impl ConnectivityListener {
    pub(super) fn new(rcv: watch::Receiver<Connectivity>) -> Self {
        ConnectivityListener { rcv }
    }

    /// Waits for the next transition. Transitions that happen faster than they are consumed
    /// collapse into the latest state. None once the monitor is gone.
    pub async fn next(&mut self) -> Option<Connectivity> {
        match self.rcv.changed().await {
            Ok(_) => Some(*self.rcv.borrow()),
            Err(_) => None,
        }
    }

    pub fn current(&self) -> Connectivity {
        *self.rcv.borrow()
    }
}
