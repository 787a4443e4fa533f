use crate::event::Event;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Format seconds as a zero-padded `mm:ss` readout.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Owns one spawned timer task. Dropping the handle aborts the task, so
/// the task cannot outlive whoever registered it.
#[derive(Debug)]
pub struct TaskHandle(JoinHandle<()>);

impl TaskHandle {
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Schedules timer events onto the host's event channel.
#[derive(Debug, Clone)]
pub struct Scheduler {
    tx: mpsc::Sender<Event>,
    /// Length of one simulated second.
    second: Duration,
}

impl Scheduler {
    pub fn new(tx: mpsc::Sender<Event>, second: Duration) -> Self {
        Self { tx, second }
    }

    pub fn second(&self) -> Duration {
        self.second
    }

    /// Repeating tick source: sends `Event::Tick(generation)` once per
    /// simulated second, first one a full period from now.
    pub fn every_second(&self, generation: u64) -> TaskHandle {
        let tx = self.tx.clone();
        let period = self.second;
        TaskHandle(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            // Never burst to catch up after a stall: each tick is one second.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick(generation)).await.is_err() {
                    break;
                }
            }
        }))
    }

    /// One-shot: deliver `event` after `delay`.
    pub fn after(&self, delay: Duration, event: Event) -> TaskHandle {
        let tx = self.tx.clone();
        TaskHandle(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event).await;
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(1620), "27:00");
        assert_eq!(format_clock(1619), "26:59");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[tokio::test(start_paused = true)]
    async fn every_second_ticks_once_per_period() {
        let (tx, mut rx) = mpsc::channel(32);
        let scheduler = Scheduler::new(tx, Duration::from_secs(1));
        let handle = scheduler.every_second(7);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        drop(handle);

        let mut ticks = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            ticks.push(ev);
        }
        assert_eq!(ticks, vec![Event::Tick(7), Event::Tick(7), Event::Tick(7)]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_stops_ticking() {
        let (tx, mut rx) = mpsc::channel(32);
        let scheduler = Scheduler::new(tx, Duration::from_secs(1));
        let handle = scheduler.every_second(1);
        drop(handle);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn after_delivers_once() {
        let (tx, mut rx) = mpsc::channel(4);
        let scheduler = Scheduler::new(tx, Duration::from_secs(1));
        let _handle = scheduler.after(Duration::from_millis(500), Event::Announce(1));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(rx.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().ok(), Some(Event::Announce(1)));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }
}
