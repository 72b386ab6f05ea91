//! Background task that drains the outbox.
//!
//! On every tick the poller takes the oldest pending event, hands it to an
//! [`EventSender`] and then marks it done. At most one event is processed per
//! tick. Nothing a tick does is propagated upward: failures are logged and the
//! event stays pending for a later tick. Because delivery and acknowledgement
//! are separate steps, an event whose acknowledgement fails is delivered again.

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout};
use tracing::{debug, error, info, warn};

use crate::domain::event_sender::EventSender;
use crate::domain::repositories::EventRepository;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No pending events.
    Idle,
    /// Event delivered and marked done.
    Delivered { event_id: i64 },
    /// Sender rejected the event; it stays pending.
    DeliveryFailed { event_id: i64 },
    /// Event delivered but could not be marked done; it will be redelivered.
    MarkDoneFailed { event_id: i64 },
    /// Fetching the next event failed or timed out.
    FetchFailed,
}

/// Periodic outbox poller.
pub struct EventPoller<R: ?Sized, S: ?Sized> {
    repository: Arc<R>,
    sender: Arc<S>,
    interval: Duration,
}

impl<R, S> EventPoller<R, S>
where
    R: EventRepository + ?Sized,
    S: EventSender + ?Sized,
{
    /// Creates a poller ticking every `interval`.
    ///
    /// The interval also bounds each database call and the delivery made
    /// within a tick.
    pub fn new(repository: Arc<R>, sender: Arc<S>, interval: Duration) -> Self {
        Self {
            repository,
            sender,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Processes at most one pending event.
    pub async fn tick(&self) -> TickOutcome {
        let event = match timeout(self.interval, self.repository.fetch_next_pending()).await {
            Ok(Ok(Some(event))) => event,
            Ok(Ok(None)) => {
                debug!("no new events");
                return TickOutcome::Idle;
            }
            Ok(Err(e)) => {
                error!(error = %e, "failed to get event");
                return TickOutcome::FetchFailed;
            }
            Err(_) => {
                error!(
                    timeout_ms = self.interval.as_millis() as u64,
                    "timed out fetching event"
                );
                return TickOutcome::FetchFailed;
            }
        };

        let event_id = event.id;

        match timeout(self.interval, self.sender.send(&event)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(event_id, error = %e, "event delivery failed, will retry");
                counter!("outbox_events_failed_total").increment(1);
                return TickOutcome::DeliveryFailed { event_id };
            }
            Err(_) => {
                warn!(event_id, "timed out delivering event, will retry");
                counter!("outbox_events_failed_total").increment(1);
                return TickOutcome::DeliveryFailed { event_id };
            }
        }

        match timeout(self.interval, self.repository.mark_done(event_id)).await {
            Ok(Ok(updated)) => {
                if !updated {
                    warn!(event_id, "event was already marked done");
                }
                counter!("outbox_events_delivered_total").increment(1);
                TickOutcome::Delivered { event_id }
            }
            Ok(Err(e)) => {
                error!(event_id, error = %e, "failed to set event done");
                TickOutcome::MarkDoneFailed { event_id }
            }
            Err(_) => {
                error!(event_id, "timed out setting event done");
                TickOutcome::MarkDoneFailed { event_id }
            }
        }
    }

    /// Ticks until `shutdown` turns `true` or its sender is dropped.
    ///
    /// The first tick fires one interval after start. A tick in progress is
    /// abandoned when shutdown is signalled; its event stays pending and is
    /// picked up on the next start, as are all other pending events.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = self.interval.as_millis() as u64,
            "event processing started"
        );

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = self.tick() => {}
            }
        }

        info!("stop event processing");
    }
}

/// Spawns the poller as a background task.
///
/// The returned handle completes once the poller has observed `shutdown`.
pub fn start_event_polling<R, S>(
    repository: Arc<R>,
    sender: Arc<S>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    R: EventRepository + ?Sized + 'static,
    S: EventSender + ?Sized + 'static,
{
    let poller = EventPoller::new(repository, sender, interval);
    tokio::spawn(poller.run(shutdown))
}
