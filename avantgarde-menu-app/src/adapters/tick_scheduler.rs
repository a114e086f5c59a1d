//! Main-tick executor backed by a tokio task
//!
//! Every scheduled task is posted over a channel to one serial worker, which
//! stands in for the host's main thread. The worker advances a tick counter
//! on a fixed interval and runs each task once its due tick is reached.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Duration;

use avantgarde_menu_core::traits::{HostEnvironment, ScheduledTask, Scheduler, Ticks};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

struct Posted {
    task: ScheduledTask,
    delay: Ticks,
}

struct Pending {
    due: Ticks,
    /// Posting order, breaks ties between tasks due on the same tick
    seq: u64,
    task: ScheduledTask,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// [`Scheduler`] that runs tasks on a dedicated tokio task.
///
/// Dropping every clone of the scheduler closes the channel; the worker then
/// runs whatever is still queued and exits.
#[derive(Clone)]
pub struct TickScheduler {
    tx: mpsc::UnboundedSender<Posted>,
}

impl TickScheduler {
    /// Start the worker. `tick` is the wall-clock length of one host tick.
    pub fn spawn(host: Arc<dyn HostEnvironment>, tick: Duration) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(host, tick, rx));
        (Self { tx }, handle)
    }
}

impl Scheduler for TickScheduler {
    fn schedule(&self, task: ScheduledTask, delay: Ticks) {
        if self.tx.send(Posted { task, delay }).is_err() {
            log::warn!("Tick scheduler is stopped, dropping task");
        }
    }
}

async fn run_worker(
    host: Arc<dyn HostEnvironment>,
    tick: Duration,
    mut rx: mpsc::UnboundedReceiver<Posted>,
) {
    let mut interval = tokio::time::interval(tick.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut queue: BinaryHeap<Reverse<Pending>> = BinaryHeap::new();
    let mut now: Ticks = 0;
    let mut seq: u64 = 0;

    log::debug!("Tick scheduler started ({tick:?} per tick)");

    loop {
        tokio::select! {
            posted = rx.recv() => match posted {
                Some(Posted { task, delay }) => {
                    // A delay of zero still means the next tick
                    queue.push(Reverse(Pending {
                        due: now + delay.max(1),
                        seq,
                        task,
                    }));
                    seq += 1;
                }
                None => break,
            },
            _ = interval.tick() => {
                now += 1;
                while queue.peek().is_some_and(|Reverse(p)| p.due <= now) {
                    if let Some(Reverse(pending)) = queue.pop() {
                        pending.task.run(host.as_ref()).await;
                    }
                }
            }
        }
    }

    log::debug!("Tick scheduler stopping, draining {} tasks", queue.len());
    while let Some(Reverse(pending)) = queue.pop() {
        pending.task.run(host.as_ref()).await;
    }
}
