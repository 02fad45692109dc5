use chrono::NaiveDate;
use renewal_tracker_domain::{Customer, Reminder, ReminderStatus, SendLog, SendLogStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDTO {
    pub id: ID,
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub primary_email: String,
    pub cc_emails: Vec<String>,
    pub plan_name: Option<String>,
    pub renew_link: Option<String>,
    pub expires_on: NaiveDate,
    pub paused: bool,
    pub last_reminder_status: Option<ReminderStatus>,
    pub last_reminder_sent_ts: Option<i64>,
}

impl CustomerDTO {
    pub fn new(customer: Customer) -> Self {
        Self {
            id: customer.id,
            company_name: customer.company_name,
            contact_name: customer.contact_name,
            primary_email: customer.primary_email,
            cc_emails: customer.cc_emails,
            plan_name: customer.plan_name,
            renew_link: customer.renew_link,
            expires_on: customer.expires_on,
            paused: customer.paused,
            last_reminder_status: customer.last_reminder_status,
            last_reminder_sent_ts: customer.last_reminder_sent_ts,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub customer_id: ID,
    pub scheduled_ts: i64,
    pub status: ReminderStatus,
    pub sent_ts: Option<i64>,
    pub provider_message_id: Option<String>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            customer_id: reminder.customer_id,
            scheduled_ts: reminder.scheduled_ts,
            status: reminder.status,
            sent_ts: reminder.sent_ts,
            provider_message_id: reminder.provider_message_id,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SendLogDTO {
    pub id: ID,
    pub reminder_id: Option<ID>,
    pub customer_id: ID,
    pub status: SendLogStatus,
    pub error: Option<String>,
    pub created: i64,
}

impl SendLogDTO {
    pub fn new(log: SendLog) -> Self {
        Self {
            id: log.id,
            reminder_id: log.reminder_id,
            customer_id: log.customer_id,
            status: log.status,
            error: log.error,
            created: log.created,
        }
    }
}
