mod listener;
mod monitor;
mod probe_timer;
mod time;

pub use listener::ConnectivityListener;
pub use monitor::Connectivity;
pub use monitor::ConnectivityMonitor;
pub use monitor::NetworkSignal;
pub use probe_timer::ProbeTimerHandle;
