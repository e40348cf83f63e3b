use std::convert::TryFrom;
use tokio::time::Duration;

#[derive(Clone, Default)]
pub struct SyncOptions {
    /// Bound on one connectivity probe.
    pub probe_timeout: Option<Duration>,
    /// Bound on every other remote call.
    pub call_timeout: Option<Duration>,
    pub probe_min_interval: Option<Duration>,
    pub probe_max_interval: Option<Duration>,
    pub outbox_capacity: Option<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct SyncOptionsValidated {
    pub probe_timeout: Duration,
    pub call_timeout: Duration,
    pub probe_min_interval: Duration,
    pub probe_max_interval: Duration,
    pub outbox_capacity: usize,
}

impl SyncOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.probe_timeout == Duration::from_secs(0) || self.call_timeout == Duration::from_secs(0) {
            return Err("Timeouts must be non-zero");
        }
        if self.probe_timeout > self.call_timeout {
            return Err("Probe timeout must not exceed the remote call timeout");
        }
        if self.probe_min_interval == Duration::from_secs(0) {
            return Err("Probe interval must be non-zero");
        }
        if self.probe_min_interval > self.probe_max_interval {
            return Err("Probe minimum interval must not exceed the maximum interval");
        }
        if self.outbox_capacity == 0 {
            return Err("Outbox capacity must be positive");
        }

        Ok(())
    }
}

impl Default for SyncOptionsValidated {
    fn default() -> Self {
        SyncOptionsValidated {
            probe_timeout: Duration::from_secs(5),
            call_timeout: Duration::from_secs(10),
            probe_min_interval: Duration::from_secs(20),
            probe_max_interval: Duration::from_secs(40),
            outbox_capacity: 1000,
        }
    }
}

impl TryFrom<SyncOptions> for SyncOptionsValidated {
    type Error = &'static str;

    fn try_from(options: SyncOptions) -> Result<Self, Self::Error> {
        let defaults = SyncOptionsValidated::default();
        let values = SyncOptionsValidated {
            probe_timeout: options.probe_timeout.unwrap_or(defaults.probe_timeout),
            call_timeout: options.call_timeout.unwrap_or(defaults.call_timeout),
            probe_min_interval: options.probe_min_interval.unwrap_or(defaults.probe_min_interval),
            probe_max_interval: options.probe_max_interval.unwrap_or(defaults.probe_max_interval),
            outbox_capacity: options.outbox_capacity.unwrap_or(defaults.outbox_capacity),
        };

        values.validate()?;
        Ok(values)
    }
}
