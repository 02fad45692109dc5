mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use crate::repos::shared::repo::DeleteResult;
use renewal_tracker_domain::{DeliveryOutcome, NewReminder, Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Atomically deletes every pending `Reminder` of the `Customer` and inserts
    /// the given ones. Concurrent calls for the same `Customer` are serialized.
    async fn replace_pending(
        &self,
        customer_id: &ID,
        reminders: &[NewReminder],
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Ordered by scheduled time
    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Pending `Reminder`s scheduled at or before the given timestamp, ordered by scheduled time
    async fn find_pending_before(&self, ts: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Moves a pending `Reminder` into the terminal state of the outcome.
    /// Returns false if the `Reminder` was no longer pending.
    async fn finalize(
        &self,
        reminder_id: &ID,
        outcome: &DeliveryOutcome,
        attempted_ts: i64,
    ) -> anyhow::Result<bool>;
    async fn delete_by_customer(&self, customer_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::TrackerContext;
    use renewal_tracker_domain::{
        CustomerProfile, DeliveryOutcome, NewReminder, ReminderStatus, ID,
    };

    async fn create_customer(ctx: &TrackerContext, email: &str) -> ID {
        let profile = CustomerProfile {
            company_name: None,
            contact_name: None,
            primary_email: email.into(),
            cc_emails: Vec::new(),
            plan_name: None,
            renew_link: None,
            expires_on: "2025-01-15".parse().unwrap(),
            paused: false,
        };
        ctx.repos.customers.upsert(&profile).await.unwrap().customer.id
    }

    fn new_reminders(customer_id: ID, timestamps: &[i64]) -> Vec<NewReminder> {
        timestamps
            .iter()
            .map(|ts| NewReminder {
                customer_id,
                scheduled_ts: *ts,
            })
            .collect()
    }

    #[tokio::test]
    async fn replace_pending_keeps_history() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.reminders;
        let customer_id = create_customer(&ctx, "a@x.com").await;

        let first = repo
            .replace_pending(&customer_id, &new_reminders(customer_id, &[10, 20, 30]))
            .await
            .unwrap();
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|r| r.status == ReminderStatus::Pending));

        // One of them is delivered before the next regeneration
        assert!(repo
            .finalize(
                &first[0].id,
                &DeliveryOutcome::Sent {
                    provider_message_id: "m1".into()
                },
                15
            )
            .await
            .unwrap());

        let second = repo
            .replace_pending(&customer_id, &new_reminders(customer_id, &[40, 50]))
            .await
            .unwrap();
        assert_eq!(second.len(), 2);

        let all = repo.find_by_customer(&customer_id).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].status, ReminderStatus::Sent);
        assert_eq!(all[0].provider_message_id, Some("m1".into()));
        assert_eq!(all[0].sent_ts, Some(15));
        let pending = all
            .iter()
            .filter(|r| r.status == ReminderStatus::Pending)
            .map(|r| r.scheduled_ts)
            .collect::<Vec<_>>();
        assert_eq!(pending, vec![40, 50]);
    }

    #[tokio::test]
    async fn finalizes_only_pending_reminders() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.reminders;
        let customer_id = create_customer(&ctx, "a@x.com").await;

        let reminders = repo
            .replace_pending(&customer_id, &new_reminders(customer_id, &[10]))
            .await
            .unwrap();
        let reminder_id = reminders[0].id;

        assert!(repo
            .finalize(&reminder_id, &DeliveryOutcome::Failed, 11)
            .await
            .unwrap());
        assert!(!repo
            .finalize(
                &reminder_id,
                &DeliveryOutcome::Sent {
                    provider_message_id: "m1".into()
                },
                12
            )
            .await
            .unwrap());

        let reminder = repo.find_by_customer(&customer_id).await.unwrap().remove(0);
        assert_eq!(reminder.status, ReminderStatus::Failed);
        assert_eq!(reminder.sent_ts, Some(11));
        assert_eq!(reminder.provider_message_id, None);
    }

    #[tokio::test]
    async fn finds_pending_before_timestamp() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.reminders;
        let a = create_customer(&ctx, "a@x.com").await;
        let b = create_customer(&ctx, "b@x.com").await;

        let a_reminders = repo
            .replace_pending(&a, &new_reminders(a, &[30, 10]))
            .await
            .unwrap();
        repo.replace_pending(&b, &new_reminders(b, &[20, 100]))
            .await
            .unwrap();
        repo.finalize(&a_reminders[1].id, &DeliveryOutcome::Failed, 11)
            .await
            .unwrap();

        let due = repo.find_pending_before(30).await.unwrap();
        let due = due.iter().map(|r| r.scheduled_ts).collect::<Vec<_>>();
        assert_eq!(due, vec![20, 30]);
    }

    #[tokio::test]
    async fn deletes_by_customer() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.reminders;
        let a = create_customer(&ctx, "a@x.com").await;
        let b = create_customer(&ctx, "b@x.com").await;

        repo.replace_pending(&a, &new_reminders(a, &[1, 2]))
            .await
            .unwrap();
        repo.replace_pending(&b, &new_reminders(b, &[3]))
            .await
            .unwrap();

        let res = repo.delete_by_customer(&a).await.unwrap();
        assert_eq!(res.deleted_count, 2);
        assert!(repo.find_by_customer(&a).await.unwrap().is_empty());
        assert_eq!(repo.find_by_customer(&b).await.unwrap().len(), 1);
    }
}
