use super::{ICustomerRepo, UpsertResult};
use crate::repos::shared::query_structs::{CustomerSearchQuery, SearchResult};
use chrono::NaiveDate;
use renewal_tracker_domain::{Customer, CustomerProfile, ReminderStatus, ID};
use sqlx::{FromRow, PgPool};
use tracing::error;

pub struct PostgresCustomerRepo {
    pool: PgPool,
}

impl PostgresCustomerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRaw {
    customer_id: i64,
    company_name: Option<String>,
    contact_name: Option<String>,
    primary_email: String,
    cc_emails: Vec<String>,
    plan_name: Option<String>,
    renew_link: Option<String>,
    expires_on: NaiveDate,
    paused: bool,
    last_reminder_status: Option<String>,
    last_reminder_sent_ts: Option<i64>,
}

#[derive(Debug, FromRow)]
struct UpsertedCustomerRaw {
    #[sqlx(flatten)]
    customer: CustomerRaw,
    inserted: bool,
}

impl From<CustomerRaw> for Customer {
    fn from(e: CustomerRaw) -> Self {
        Self {
            id: e.customer_id.into(),
            company_name: e.company_name,
            contact_name: e.contact_name,
            primary_email: e.primary_email,
            cc_emails: e.cc_emails,
            plan_name: e.plan_name,
            renew_link: e.renew_link,
            expires_on: e.expires_on,
            paused: e.paused,
            // The column has a check constraint so unknown values do not occur
            last_reminder_status: e
                .last_reminder_status
                .and_then(|status| status.parse::<ReminderStatus>().ok()),
            last_reminder_sent_ts: e.last_reminder_sent_ts,
        }
    }
}

#[async_trait::async_trait]
impl ICustomerRepo for PostgresCustomerRepo {
    async fn upsert(&self, profile: &CustomerProfile) -> anyhow::Result<UpsertResult> {
        let res: UpsertedCustomerRaw = sqlx::query_as(
            r#"
            INSERT INTO customers
                (company_name, contact_name, primary_email, cc_emails, plan_name, renew_link, expires_on, paused)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (primary_email) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                contact_name = EXCLUDED.contact_name,
                cc_emails = EXCLUDED.cc_emails,
                plan_name = EXCLUDED.plan_name,
                renew_link = EXCLUDED.renew_link,
                expires_on = EXCLUDED.expires_on,
                paused = EXCLUDED.paused
            RETURNING *, (xmax = 0) AS inserted
            "#,
        )
        .bind(&profile.company_name)
        .bind(&profile.contact_name)
        .bind(&profile.primary_email)
        .bind(&profile.cc_emails)
        .bind(&profile.plan_name)
        .bind(&profile.renew_link)
        .bind(profile.expires_on)
        .bind(profile.paused)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to upsert customer: {:?}. DB returned error: {:?}",
                profile, e
            );
            e
        })?;

        Ok(UpsertResult {
            created: res.inserted,
            customer: res.customer.into(),
        })
    }

    async fn save_profile(
        &self,
        customer_id: &ID,
        profile: &CustomerProfile,
    ) -> anyhow::Result<Option<Customer>> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            r#"
            UPDATE customers
            SET company_name = $2,
            contact_name = $3,
            primary_email = $4,
            cc_emails = $5,
            plan_name = $6,
            renew_link = $7,
            expires_on = $8,
            paused = $9
            WHERE customer_id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id.inner())
        .bind(&profile.company_name)
        .bind(&profile.contact_name)
        .bind(&profile.primary_email)
        .bind(&profile.cc_emails)
        .bind(&profile.plan_name)
        .bind(&profile.renew_link)
        .bind(profile.expires_on)
        .bind(profile.paused)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save profile: {:?} for customer with id: {:?}. DB returned error: {:?}",
                profile, customer_id, e
            );
            e
        })?;
        Ok(res.map(|customer| customer.into()))
    }

    async fn find(&self, customer_id: &ID) -> anyhow::Result<Option<Customer>> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM customers
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id.inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customer with id: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;
        Ok(res.map(|customer| customer.into()))
    }

    async fn find_by_email(&self, primary_email: &str) -> anyhow::Result<Option<Customer>> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            r#"
            SELECT * FROM customers
            WHERE primary_email = $1
            "#,
        )
        .bind(primary_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customer with email: {:?} failed. DB returned error: {:?}",
                primary_email, e
            );
            e
        })?;
        Ok(res.map(|customer| customer.into()))
    }

    async fn find_many(&self, customer_ids: &[ID]) -> anyhow::Result<Vec<Customer>> {
        let ids = customer_ids.iter().map(|id| id.inner()).collect::<Vec<_>>();
        let customers_raw: Vec<CustomerRaw> = sqlx::query_as(
            "
            SELECT * FROM customers
            WHERE customer_id = ANY($1)
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find customers with ids: {:?} failed. DB returned error: {:?}",
                customer_ids, e
            );
            e
        })?;

        Ok(customers_raw.into_iter().map(|c| c.into()).collect())
    }

    async fn search(&self, query: &CustomerSearchQuery) -> anyhow::Result<SearchResult<Customer>> {
        let pattern = query.like_pattern();
        let filter = "
            $1::TEXT IS NULL
            OR company_name ILIKE $1
            OR contact_name ILIKE $1
            OR primary_email ILIKE $1
            OR plan_name ILIKE $1
        ";

        let select_query = format!(
            "
            SELECT * FROM customers
            WHERE {}
            ORDER BY expires_on ASC, customer_id ASC
            LIMIT $2 OFFSET $3
            ",
            filter
        );
        let count_query = format!(
            "
            SELECT COUNT(*) FROM customers
            WHERE {}
            ",
            filter
        );

        let customers_raw: Vec<CustomerRaw> = sqlx::query_as(&select_query)
        .bind(&pattern)
        .bind(query.limit as i64)
        .bind(query.skip as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Search customers with query: {:?} failed. DB returned error: {:?}",
                query, e
            );
            e
        })?;

        let total: i64 = sqlx::query_scalar(&count_query)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Count customers with query: {:?} failed. DB returned error: {:?}",
                query, e
            );
            e
        })?;

        Ok(SearchResult {
            items: customers_raw.into_iter().map(|c| c.into()).collect(),
            total,
        })
    }

    async fn set_paused(&self, customer_id: &ID, paused: bool) -> anyhow::Result<Option<Customer>> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            r#"
            UPDATE customers
            SET paused = $2
            WHERE customer_id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id.inner())
        .bind(paused)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Set paused: {} for customer with id: {:?} failed. DB returned error: {:?}",
                paused, customer_id, e
            );
            e
        })?;
        Ok(res.map(|customer| customer.into()))
    }

    async fn set_expires_on(
        &self,
        customer_id: &ID,
        expires_on: &NaiveDate,
    ) -> anyhow::Result<Option<Customer>> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            r#"
            UPDATE customers
            SET expires_on = $2
            WHERE customer_id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id.inner())
        .bind(*expires_on)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Set expires_on: {} for customer with id: {:?} failed. DB returned error: {:?}",
                expires_on, customer_id, e
            );
            e
        })?;
        Ok(res.map(|customer| customer.into()))
    }

    async fn record_reminder_sent(
        &self,
        customer_id: &ID,
        status: ReminderStatus,
        sent_ts: i64,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET last_reminder_status = $2,
            last_reminder_sent_ts = $3
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id.inner())
        .bind(status.as_str())
        .bind(sent_ts)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Record reminder status for customer with id: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;
        Ok(())
    }

    async fn delete(&self, customer_id: &ID) -> anyhow::Result<Option<Customer>> {
        let res: Option<CustomerRaw> = sqlx::query_as(
            "
            DELETE FROM customers
            WHERE customer_id = $1
            RETURNING *
            ",
        )
        .bind(customer_id.inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete customer with id: {:?} failed. DB returned error: {:?}",
                customer_id, e
            );
            e
        })?;
        Ok(res.map(|customer| customer.into()))
    }
}
