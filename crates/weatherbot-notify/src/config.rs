//! Pipeline and schedule configuration.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ScheduleError;

/// Configuration for the notification pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many subscribers are processed at once. 1 is strictly sequential.
    pub max_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

impl PipelineConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concurrency bound. Zero is treated as one.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }
}

/// When the scheduler fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Once per day at the given UTC time.
    Daily { at: NaiveTime },
    /// At a fixed interval, starting one interval after launch.
    Every(Duration),
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Daily {
            at: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl Schedule {
    /// Parses an `HH:MM` (or `HH:MM:SS`) UTC time into a daily schedule.
    pub fn daily_at(time: &str) -> Result<Self, ScheduleError> {
        let time = time.trim();
        NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .map(|at| Schedule::Daily { at })
            .map_err(|_| ScheduleError::InvalidTime(time.to_string()))
    }

    /// Creates an interval schedule.
    pub fn every(interval: Duration) -> Result<Self, ScheduleError> {
        if interval.is_zero() {
            return Err(ScheduleError::ZeroInterval);
        }
        Ok(Schedule::Every(interval))
    }

    /// Time to wait from `now` until the next tick.
    pub fn delay_until_next(&self, now: DateTime<Utc>) -> Duration {
        match self {
            Schedule::Every(interval) => *interval,
            Schedule::Daily { at } => {
                let today = now.date_naive().and_time(*at).and_utc();
                let next = if today > now {
                    today
                } else {
                    today + chrono::Duration::days(1)
                };
                (next - now).to_std().unwrap_or(Duration::ZERO)
            }
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Daily { at } => write!(f, "daily at {} UTC", at.format("%H:%M")),
            Schedule::Every(interval) => write!(f, "every {}s", interval.as_secs_f64()),
        }
    }
}
