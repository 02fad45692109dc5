use super::ISendLogRepo;
use crate::repos::shared::inmemory_repo::*;
use renewal_tracker_domain::{NewSendLog, SendLog, ID};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemorySendLogRepo {
    logs: std::sync::Mutex<Vec<SendLog>>,
    next_id: AtomicI64,
}

impl InMemorySendLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait::async_trait]
impl ISendLogRepo for InMemorySendLogRepo {
    async fn insert(&self, log: &NewSendLog) -> anyhow::Result<SendLog> {
        let log = SendLog {
            id: ID::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            reminder_id: log.reminder_id,
            customer_id: log.customer_id,
            status: log.status,
            error: log.error.clone(),
            created: log.created,
        };
        insert(&log, &self.logs);
        Ok(log)
    }

    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<SendLog>> {
        let mut logs = find_by(&self.logs, |log| log.customer_id == *customer_id);
        logs.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
        Ok(logs)
    }
}
