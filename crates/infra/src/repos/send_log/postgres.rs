use super::ISendLogRepo;
use renewal_tracker_domain::{NewSendLog, SendLog, SendLogStatus, ID};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresSendLogRepo {
    pool: PgPool,
}

impl PostgresSendLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SendLogRaw {
    send_log_id: i64,
    reminder_id: Option<i64>,
    customer_id: i64,
    status: String,
    error: Option<String>,
    created: i64,
}

impl From<SendLogRaw> for SendLog {
    fn from(e: SendLogRaw) -> Self {
        Self {
            id: e.send_log_id.into(),
            reminder_id: e.reminder_id.map(ID::from),
            customer_id: e.customer_id.into(),
            // The column has a check constraint so unknown values do not occur
            status: e.status.parse().unwrap_or(SendLogStatus::Failed),
            error: e.error,
            created: e.created,
        }
    }
}

#[async_trait::async_trait]
impl ISendLogRepo for PostgresSendLogRepo {
    async fn insert(&self, log: &NewSendLog) -> anyhow::Result<SendLog> {
        let res: SendLogRaw = sqlx::query_as(
            r#"
            INSERT INTO send_logs (reminder_id, customer_id, status, error, created)
            VALUES($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(log.reminder_id.map(|id| id.inner()))
        .bind(log.customer_id.inner())
        .bind(log.status.as_str())
        .bind(&log.error)
        .bind(log.created)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert send log: {:?}. DB returned error: {:?}",
                log, e
            );
            e
        })?;
        Ok(res.into())
    }

    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<SendLog>> {
        let logs: Vec<SendLogRaw> = sqlx::query_as(
            r#"
            SELECT * FROM send_logs
            WHERE customer_id = $1
            ORDER BY created DESC, send_log_id DESC
            "#,
        )
        .bind(customer_id.inner())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find send logs of customer: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;
        Ok(logs.into_iter().map(|log| log.into()).collect())
    }
}
