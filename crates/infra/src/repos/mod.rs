mod customer;
mod reminder;
mod send_log;
mod shared;

use customer::{InMemoryCustomerRepo, PostgresCustomerRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use send_log::{InMemorySendLogRepo, PostgresSendLogRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use customer::{ICustomerRepo, UpsertResult};
pub use reminder::IReminderRepo;
pub use send_log::ISendLogRepo;
pub use shared::query_structs::*;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub customers: Arc<dyn ICustomerRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub send_logs: Arc<dyn ISendLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            customers: Arc::new(PostgresCustomerRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            send_logs: Arc::new(PostgresSendLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            customers: Arc::new(InMemoryCustomerRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            send_logs: Arc::new(InMemorySendLogRepo::new()),
        }
    }
}
