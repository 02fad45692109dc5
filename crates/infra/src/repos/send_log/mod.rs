mod inmemory;
mod postgres;

pub use inmemory::InMemorySendLogRepo;
pub use postgres::PostgresSendLogRepo;

use renewal_tracker_domain::{NewSendLog, SendLog, ID};

/// Append only, `SendLog`s are never updated or deleted
#[async_trait::async_trait]
pub trait ISendLogRepo: Send + Sync {
    async fn insert(&self, log: &NewSendLog) -> anyhow::Result<SendLog>;
    /// Newest first
    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<SendLog>>;
}

#[cfg(test)]
mod tests {
    use crate::TrackerContext;
    use renewal_tracker_domain::{NewSendLog, SendLogStatus, ID};

    #[tokio::test]
    async fn inserts_and_lists_newest_first() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.send_logs;
        let customer_id = ID::new(1);

        let renewed = repo
            .insert(&NewSendLog::renewed(customer_id, 10))
            .await
            .unwrap();
        assert_eq!(renewed.status, SendLogStatus::Renewed);
        assert_eq!(renewed.reminder_id, None);

        let failed = repo
            .insert(
                &NewSendLog::delivery(customer_id, ID::new(7), SendLogStatus::Failed, 20)
                    .with_error("smtp down"),
            )
            .await
            .unwrap();
        repo.insert(&NewSendLog::renewed(ID::new(2), 30))
            .await
            .unwrap();

        let logs = repo.find_by_customer(&customer_id).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0], failed);
        assert_eq!(logs[0].error, Some("smtp down".into()));
        assert_eq!(logs[0].reminder_id, Some(ID::new(7)));
        assert_eq!(logs[1], renewed);
    }
}
