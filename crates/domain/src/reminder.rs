use crate::{
    date::start_of_day_millis,
    shared::entity::{Entity, ID},
};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Failed,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(anyhow::Error::msg(format!("Unknown reminder status: {}", s))),
        }
    }
}

/// A `Reminder` is a one-shot email to a `Customer` scheduled at
/// an offset in days from the `Customer`s expiration date.
///
/// It starts out as `Pending` and is moved exactly once to either `Sent`
/// or `Failed` when a delivery run picks it up.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub customer_id: ID,
    /// The timestamp in millis at which the reminder becomes due
    pub scheduled_ts: i64,
    pub status: ReminderStatus,
    /// Time of the delivery attempt, set for both `Sent` and `Failed`
    pub sent_ts: Option<i64>,
    /// Message id returned by the mail provider, only set when `Sent`
    pub provider_message_id: Option<String>,
}

impl Reminder {
    pub fn is_due(&self, now_ts: i64) -> bool {
        self.status == ReminderStatus::Pending && self.scheduled_ts <= now_ts
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A `Reminder` that is about to be scheduled and has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub customer_id: ID,
    pub scheduled_ts: i64,
}

/// Builds one `NewReminder` per offset, each at midnight UTC of `expires_on + offset` days.
/// Offsets landing outside the supported date range are dropped.
pub fn schedule_reminders(customer_id: ID, expires_on: &NaiveDate, offsets: &[i64]) -> Vec<NewReminder> {
    offsets
        .iter()
        .filter_map(|offset| {
            TimeDelta::try_days(*offset).and_then(|delta| expires_on.checked_add_signed(delta))
        })
        .map(|date| NewReminder {
            customer_id,
            scheduled_ts: start_of_day_millis(&date),
        })
        .collect()
}

/// Result of handing a `Reminder` to the mail transport
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Sent { provider_message_id: String },
    Failed,
}

impl DeliveryOutcome {
    pub fn status(&self) -> ReminderStatus {
        match self {
            Self::Sent { .. } => ReminderStatus::Sent,
            Self::Failed => ReminderStatus::Failed,
        }
    }

    pub fn provider_message_id(&self) -> Option<&str> {
        match self {
            Self::Sent {
                provider_message_id,
            } => Some(provider_message_id),
            Self::Failed => None,
        }
    }
}
