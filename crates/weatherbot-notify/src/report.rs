//! Per-tick results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use weatherbot_models::ChatId;

use crate::error::NotifyError;

/// What happened to one eligible subscriber during a tick.
#[derive(Debug)]
pub struct SubscriberOutcome {
    pub chat_id: ChatId,
    pub location: String,
    pub result: Result<(), NotifyError>,
}

impl SubscriberOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of one pipeline pass.
#[derive(Debug)]
pub struct TickReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Active subscribers returned by the store.
    pub listed: usize,
    /// Active subscribers skipped because their location is blank.
    pub skipped_no_location: usize,
    /// One entry per subscriber a lookup was attempted for.
    pub outcomes: Vec<SubscriberOutcome>,
}

impl TickReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    pub fn provider_failures(&self) -> usize {
        self.count_errors(NotifyError::is_provider)
    }

    pub fn delivery_failures(&self) -> usize {
        self.count_errors(NotifyError::is_delivery)
    }

    fn count_errors(&self, pred: impl Fn(&NotifyError) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.result.as_ref().err().is_some_and(&pred))
            .count()
    }

    /// Outcome for a chat, if it was attempted.
    pub fn outcome_for(&self, chat_id: ChatId) -> Option<&SubscriberOutcome> {
        self.outcomes.iter().find(|o| o.chat_id == chat_id)
    }

    pub fn summary(&self) -> TickSummary {
        TickSummary {
            started_at: self.started_at,
            finished_at: self.finished_at,
            listed: self.listed,
            skipped_no_location: self.skipped_no_location,
            attempted: self.attempted(),
            delivered: self.delivered(),
            provider_failures: self.provider_failures(),
            delivery_failures: self.delivery_failures(),
            failures: self
                .outcomes
                .iter()
                .filter_map(|o| {
                    o.result.as_ref().err().map(|e| FailureSummary {
                        chat_id: o.chat_id.to_string(),
                        location: o.location.clone(),
                        error: e.to_string(),
                    })
                })
                .collect(),
        }
    }
}

/// Serializable view of a [`TickReport`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub listed: usize,
    pub skipped_no_location: usize,
    pub attempted: usize,
    pub delivered: usize,
    pub provider_failures: usize,
    pub delivery_failures: usize,
    pub failures: Vec<FailureSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureSummary {
    pub chat_id: String,
    pub location: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use weatherbot_weather::ProviderError;

    fn outcome(chat_id: i64, result: Result<(), NotifyError>) -> SubscriberOutcome {
        SubscriberOutcome {
            chat_id: ChatId(chat_id),
            location: "Oslo".to_string(),
            result,
        }
    }

    #[test]
    fn test_counts() {
        let now = Utc::now();
        let report = TickReport {
            started_at: now,
            finished_at: now,
            listed: 5,
            skipped_no_location: 1,
            outcomes: vec![
                outcome(1, Ok(())),
                outcome(2, Err(ProviderError::MissingApiKey.into())),
                outcome(3, Err(DeliveryError::new(ChatId(3), "blocked by user").into())),
                outcome(4, Ok(())),
            ],
        };

        assert_eq!(report.attempted(), 4);
        assert_eq!(report.delivered(), 2);
        assert_eq!(report.provider_failures(), 1);
        assert_eq!(report.delivery_failures(), 1);
        assert!(report.outcome_for(ChatId(2)).is_some());
        assert!(report.outcome_for(ChatId(9)).is_none());

        let summary = report.summary();
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.failures[0].chat_id, "2");
        assert!(summary.failures[1].error.contains("blocked by user"));
    }
}
