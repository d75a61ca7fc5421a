//! Recurring trigger for the notification pipeline.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Schedule;
use crate::pipeline::NotificationPipeline;

/// Drives the pipeline on a [`Schedule`] until shutdown.
pub struct Scheduler {
    pipeline: Arc<NotificationPipeline>,
    schedule: Schedule,
    shutdown: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(
        pipeline: Arc<NotificationPipeline>,
        schedule: Schedule,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            pipeline,
            schedule,
            shutdown,
        }
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Run until the shutdown signal flips to `true` or its sender is dropped.
    ///
    /// Returns the number of ticks that ran. A tick is awaited to completion
    /// before the next fire time is computed.
    pub async fn run(&mut self) -> u64 {
        info!(schedule = %self.schedule, "Notification scheduler started");
        let mut ticks = 0;

        loop {
            let delay = self.schedule.delay_until_next(Utc::now());
            debug!(delay_secs = delay.as_secs(), "Waiting for next tick");

            tokio::select! {
                _ = sleep(delay) => {
                    self.tick().await;
                    ticks += 1;
                }
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        debug!("Scheduler received shutdown signal");
                        break;
                    }
                }
            }
        }

        info!(ticks, "Notification scheduler stopped");
        ticks
    }

    async fn tick(&self) {
        if let Err(e) = self.pipeline.run_tick().await {
            error!(error = %e, "Weather tick aborted");
        }
    }
}
