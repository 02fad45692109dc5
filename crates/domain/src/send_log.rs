use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SendLogStatus {
    Sent,
    Failed,
    DryRun,
    Renewed,
}

impl SendLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::DryRun => "dry-run",
            Self::Renewed => "renewed",
        }
    }
}

impl FromStr for SendLogStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "dry-run" => Ok(Self::DryRun),
            "renewed" => Ok(Self::Renewed),
            _ => Err(anyhow::Error::msg(format!("Unknown send log status: {}", s))),
        }
    }
}

/// Append-only audit record of a delivery attempt or a renewal.
///
/// `SendLog`s only reference `Reminder`s and `Customer`s by id and outlive them.
#[derive(Debug, Clone, PartialEq)]
pub struct SendLog {
    pub id: ID,
    pub reminder_id: Option<ID>,
    pub customer_id: ID,
    pub status: SendLogStatus,
    pub error: Option<String>,
    pub created: i64,
}

impl Entity for SendLog {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSendLog {
    pub reminder_id: Option<ID>,
    pub customer_id: ID,
    pub status: SendLogStatus,
    pub error: Option<String>,
    pub created: i64,
}

impl NewSendLog {
    pub fn renewed(customer_id: ID, created: i64) -> Self {
        Self {
            reminder_id: None,
            customer_id,
            status: SendLogStatus::Renewed,
            error: None,
            created,
        }
    }

    pub fn delivery(customer_id: ID, reminder_id: ID, status: SendLogStatus, created: i64) -> Self {
        Self {
            reminder_id: Some(reminder_id),
            customer_id,
            status,
            error: None,
            created,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
