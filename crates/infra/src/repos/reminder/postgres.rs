use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use renewal_tracker_domain::{DeliveryOutcome, NewReminder, Reminder, ReminderStatus, ID};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_id: i64,
    customer_id: i64,
    scheduled_ts: i64,
    status: String,
    sent_ts: Option<i64>,
    provider_message_id: Option<String>,
}

impl From<ReminderRaw> for Reminder {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.reminder_id.into(),
            customer_id: e.customer_id.into(),
            scheduled_ts: e.scheduled_ts,
            // The column has a check constraint so unknown values do not occur
            status: e.status.parse().unwrap_or(ReminderStatus::Failed),
            sent_ts: e.sent_ts,
            provider_message_id: e.provider_message_id,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn replace_pending(
        &self,
        customer_id: &ID,
        reminders: &[NewReminder],
    ) -> anyhow::Result<Vec<Reminder>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(
                "Unable to start reminder regeneration for customer: {:?}. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;

        // Locking the customer row serializes regenerations of the same customer
        sqlx::query(
            r#"
            SELECT customer_id FROM customers
            WHERE customer_id = $1
            FOR UPDATE
            "#,
        )
        .bind(customer_id.inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to lock customer: {:?}. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;

        sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE customer_id = $1 AND status = 'pending'
            "#,
        )
        .bind(customer_id.inner())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to purge pending reminders of customer: {:?}. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;

        let customer_ids = reminders
            .iter()
            .map(|r| r.customer_id.inner())
            .collect::<Vec<_>>();
        let scheduled = reminders
            .iter()
            .map(|r| r.scheduled_ts)
            .collect::<Vec<_>>();
        let inserted: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            INSERT INTO reminders (customer_id, scheduled_ts, status)
            SELECT customer_id, scheduled_ts, 'pending'
            FROM UNNEST($1::BIGINT[], $2::BIGINT[]) AS r(customer_id, scheduled_ts)
            RETURNING *
            "#,
        )
        .bind(&customer_ids)
        .bind(&scheduled)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminders: {:?}. DB returned error: {:?}",
                reminders, e
            );
            e
        })?;

        tx.commit().await.map_err(|e| {
            error!(
                "Unable to commit reminder regeneration for customer: {:?}. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;

        let mut inserted = inserted
            .into_iter()
            .map(|r| r.into())
            .collect::<Vec<Reminder>>();
        inserted.sort_by_key(|r| (r.scheduled_ts, r.id));
        Ok(inserted)
    }

    async fn find_by_customer(&self, customer_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE customer_id = $1
            ORDER BY scheduled_ts ASC, reminder_id ASC
            "#,
        )
        .bind(customer_id.inner())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminders of customer: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_pending_before(&self, ts: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE status = 'pending' AND scheduled_ts <= $1
            ORDER BY scheduled_ts ASC, reminder_id ASC
            "#,
        )
        .bind(ts)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find pending reminders before: {} failed. DB returned error: {:?}",
                ts, e
            );
            e
        })?;
        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn finalize(
        &self,
        reminder_id: &ID,
        outcome: &DeliveryOutcome,
        attempted_ts: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET status = $2,
            sent_ts = $3,
            provider_message_id = $4
            WHERE reminder_id = $1 AND status = 'pending'
            "#,
        )
        .bind(reminder_id.inner())
        .bind(outcome.status().as_str())
        .bind(attempted_ts)
        .bind(outcome.provider_message_id())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Finalize reminder: {:?} with outcome: {:?} failed. DB returned error: {:?}",
                reminder_id, outcome, e
            );
            e
        })?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_by_customer(&self, customer_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id.inner())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete reminders of customer: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
