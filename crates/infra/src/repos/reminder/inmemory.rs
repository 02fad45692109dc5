use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use renewal_tracker_domain::{DeliveryOutcome, NewReminder, Reminder, ReminderStatus, ID};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
    next_id: AtomicI64,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

fn sorted(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders.sort_by_key(|r| (r.scheduled_ts, r.id));
    reminders
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn replace_pending(
        &self,
        customer_id: &ID,
        reminders: &[NewReminder],
    ) -> anyhow::Result<Vec<Reminder>> {
        // Purge and insert under the same lock
        let mut collection = self.reminders.lock().unwrap();
        find_and_delete_by(&mut collection, |r| {
            r.customer_id == *customer_id && r.status == ReminderStatus::Pending
        });

        let inserted = reminders
            .iter()
            .map(|r| Reminder {
                id: ID::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
                customer_id: r.customer_id,
                scheduled_ts: r.scheduled_ts,
                status: ReminderStatus::Pending,
                sent_ts: None,
                provider_message_id: None,
            })
            .collect::<Vec<_>>();
        collection.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(sorted(find_by(&self.reminders, |r| {
            r.customer_id == *customer_id
        })))
    }

    async fn find_pending_before(&self, ts: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(sorted(find_by(&self.reminders, |r| r.is_due(ts))))
    }

    async fn finalize(
        &self,
        reminder_id: &ID,
        outcome: &DeliveryOutcome,
        attempted_ts: i64,
    ) -> anyhow::Result<bool> {
        let updated = update_many(
            &self.reminders,
            |r| r.id == *reminder_id && r.status == ReminderStatus::Pending,
            |r| {
                r.status = outcome.status();
                r.sent_ts = Some(attempted_ts);
                r.provider_message_id = outcome.provider_message_id().map(String::from);
            },
        );
        Ok(updated > 0)
    }

    async fn delete_by_customer(&self, customer_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |r| r.customer_id == *customer_id))
    }
}
