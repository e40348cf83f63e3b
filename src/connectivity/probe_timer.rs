use crate::connectivity::time::{Clock, RealClock};
use crate::connectivity::ConnectivityMonitor;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::{Arc, Weak};
use tokio::sync::oneshot;
use tokio::time::Duration;

/// ProbeTimerHandle keeps the periodic probe task alive. Dropping it wakes the task out of its
/// sleep and ends it. A probe already in flight finishes first.
pub struct ProbeTimerHandle {
    // Never sent on. Dropping it closes the task's receiver.
    _stop: oneshot::Sender<()>,
}

struct ProbeTimerTask<C: Clock> {
    monitor: Weak<ConnectivityMonitor>,
    interval_range: RangeInclusive<Duration>,
    clock: C,
    stopped: oneshot::Receiver<()>,
}

impl ProbeTimerHandle {
    /// Spawns a task that probes `monitor` every `min_interval..=max_interval`, picked at random
    /// for each round so a fleet of clients doesn't probe in lockstep.
    pub fn spawn_timer_task(
        min_interval: Duration,
        max_interval: Duration,
        monitor: &Arc<ConnectivityMonitor>,
    ) -> Self {
        let (task, handle) = ProbeTimerTask::new(min_interval, max_interval, Arc::downgrade(monitor), RealClock);
        tokio::task::spawn(task.run());

        handle
    }
}

impl<C: Clock> ProbeTimerTask<C> {
    fn new(
        min_interval: Duration,
        max_interval: Duration,
        monitor: Weak<ConnectivityMonitor>,
        clock: C,
    ) -> (Self, ProbeTimerHandle) {
        let (stop, stopped) = oneshot::channel();

        let task = ProbeTimerTask {
            monitor,
            interval_range: RangeInclusive::new(min_interval, max_interval),
            clock,
            stopped,
        };
        let handle = ProbeTimerHandle { _stop: stop };

        (task, handle)
    }

    fn next_interval(&self) -> Duration {
        rand::thread_rng().gen_range(self.interval_range.clone())
    }

    async fn run(mut self) {
        loop {
            let interval = self.next_interval();
            tokio::select! {
                _ = self.clock.sleep(interval) => {}
                _ = &mut self.stopped => return,
            }

            match self.monitor.upgrade() {
                Some(monitor) => {
                    monitor.probe().await;
                }
                // Client was torn down.
                None => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::time;
    use crate::connectivity::Connectivity;
    use crate::test_utils::{self, ToggleableApi};

    fn monitor(api: Arc<ToggleableApi>) -> Arc<ConnectivityMonitor> {
        Arc::new(ConnectivityMonitor::new(
            test_utils::discard_logger(),
            api,
            Duration::from_secs(5),
        ))
    }

    #[tokio::test]
    async fn probes_on_every_interval() {
        // -- setup --
        let interval = Duration::from_millis(100);
        let api = ToggleableApi::new(vec![]);
        let monitor = monitor(api.clone());
        let mut listener = monitor.subscribe();
        let (mock_clock, mut controller) = time::mocked_clock();

        // We are not testing jitter, so min and max are the same.
        let (task, _handle) = ProbeTimerTask::new(interval, interval, Arc::downgrade(&monitor), mock_clock);
        tokio::task::spawn(task.run());

        // -- execute & verify --
        // 1. Nothing happens before the first interval elapses. The task must be parked on its
        // first deadline before time moves.
        test_utils::assert_still_pending(listener.next()).await;
        controller.advance(interval / 2);
        test_utils::assert_still_pending(listener.next()).await;

        // 2. First probe brings the monitor online.
        controller.advance(interval / 2);
        assert_eq!(
            test_utils::with_sanity_timeout(listener.next()).await,
            Some(Connectivity::Online)
        );

        // 3. Server goes away, next probe notices. The short real sleep lets the task park on its
        // next deadline before time moves.
        api.set_reachable(false);
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.advance(interval);
        assert_eq!(
            test_utils::with_sanity_timeout(listener.next()).await,
            Some(Connectivity::Offline)
        );
    }

    #[tokio::test]
    async fn dropping_handle_stops_a_sleeping_task() {
        // -- setup --
        let interval = Duration::from_millis(100);
        let api = ToggleableApi::new(vec![]);
        let monitor = monitor(api);
        let mut listener = monitor.subscribe();
        let (mock_clock, mut controller) = time::mocked_clock();

        let (task, handle) = ProbeTimerTask::new(interval, interval, Arc::downgrade(&monitor), mock_clock);
        let join_handle = tokio::task::spawn(task.run());

        // -- execute --
        test_utils::assert_still_pending(listener.next()).await;
        drop(handle);

        // -- verify --
        // The task ends mid-sleep, without time moving.
        test_utils::with_sanity_timeout(join_handle).await.unwrap();
        controller.advance(interval * 2);
        test_utils::assert_still_pending(listener.next()).await;
        assert_eq!(monitor.state(), Connectivity::Offline);
    }
}
