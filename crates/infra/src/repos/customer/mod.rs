mod inmemory;
mod postgres;

pub use inmemory::InMemoryCustomerRepo;
pub use postgres::PostgresCustomerRepo;

use crate::repos::shared::query_structs::{CustomerSearchQuery, SearchResult};
use chrono::NaiveDate;
use renewal_tracker_domain::{Customer, CustomerProfile, ReminderStatus, ID};

#[derive(Debug, Clone)]
pub struct UpsertResult {
    pub customer: Customer,
    /// False when a `Customer` with the same primary email already existed and was updated
    pub created: bool,
}

#[async_trait::async_trait]
pub trait ICustomerRepo: Send + Sync {
    /// Inserts the profile or updates the `Customer` with the same primary email
    async fn upsert(&self, profile: &CustomerProfile) -> anyhow::Result<UpsertResult>;
    /// Writes the admin editable fields only, the last reminder mirror is left untouched
    async fn save_profile(
        &self,
        customer_id: &ID,
        profile: &CustomerProfile,
    ) -> anyhow::Result<Option<Customer>>;
    async fn find(&self, customer_id: &ID) -> anyhow::Result<Option<Customer>>;
    async fn find_by_email(&self, primary_email: &str) -> anyhow::Result<Option<Customer>>;
    async fn find_many(&self, customer_ids: &[ID]) -> anyhow::Result<Vec<Customer>>;
    /// Ordered by expiration date, then id
    async fn search(&self, query: &CustomerSearchQuery) -> anyhow::Result<SearchResult<Customer>>;
    async fn set_paused(&self, customer_id: &ID, paused: bool) -> anyhow::Result<Option<Customer>>;
    async fn set_expires_on(
        &self,
        customer_id: &ID,
        expires_on: &NaiveDate,
    ) -> anyhow::Result<Option<Customer>>;
    /// Updates the last reminder mirror fields of the `Customer`
    async fn record_reminder_sent(
        &self,
        customer_id: &ID,
        status: ReminderStatus,
        sent_ts: i64,
    ) -> anyhow::Result<()>;
    async fn delete(&self, customer_id: &ID) -> anyhow::Result<Option<Customer>>;
}

#[cfg(test)]
mod tests {
    use crate::TrackerContext;
    use chrono::NaiveDate;
    use renewal_tracker_domain::{CustomerProfile, ReminderStatus, ID};

    use crate::repos::shared::query_structs::CustomerSearchQuery;

    fn profile(email: &str, expires_on: &str) -> CustomerProfile {
        CustomerProfile {
            company_name: Some("Acme".into()),
            contact_name: Some("Jane".into()),
            primary_email: email.into(),
            cc_emails: vec!["ops@acme.com".into()],
            plan_name: Some("Pro".into()),
            renew_link: None,
            expires_on: expires_on.parse().unwrap(),
            paused: false,
        }
    }

    #[tokio::test]
    async fn upsert_deduplicates_on_primary_email() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.customers;

        let first = repo.upsert(&profile("jane@acme.com", "2025-01-15")).await.unwrap();
        assert!(first.created);

        let mut changed = profile("jane@acme.com", "2025-03-01");
        changed.plan_name = Some("Enterprise".into());
        let second = repo.upsert(&changed).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.customer.id, first.customer.id);
        assert_eq!(second.customer.plan_name, Some("Enterprise".into()));

        let found = repo.find_by_email("jane@acme.com").await.unwrap().unwrap();
        assert_eq!(found, second.customer);
        let res = repo.search(&CustomerSearchQuery { limit: 10, ..Default::default() }).await.unwrap();
        assert_eq!(res.total, 1);
    }

    #[tokio::test]
    async fn upsert_keeps_last_reminder_mirror() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.customers;

        let customer = repo.upsert(&profile("jane@acme.com", "2025-01-15")).await.unwrap().customer;
        repo.record_reminder_sent(&customer.id, ReminderStatus::Sent, 42)
            .await
            .unwrap();
        let customer = repo.upsert(&profile("jane@acme.com", "2025-02-15")).await.unwrap().customer;
        assert_eq!(customer.last_reminder_status, Some(ReminderStatus::Sent));
        assert_eq!(customer.last_reminder_sent_ts, Some(42));
    }

    #[tokio::test]
    async fn save_profile_leaves_last_reminder_mirror_alone() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.customers;

        let customer = repo.upsert(&profile("jane@acme.com", "2025-01-15")).await.unwrap().customer;
        // Read before a delivery run records its outcome
        let mut stale = customer.profile();
        repo.record_reminder_sent(&customer.id, ReminderStatus::Sent, 42)
            .await
            .unwrap();

        stale.plan_name = Some("Enterprise".into());
        let saved = repo.save_profile(&customer.id, &stale).await.unwrap().unwrap();
        assert_eq!(saved.plan_name, Some("Enterprise".into()));
        assert_eq!(saved.last_reminder_status, Some(ReminderStatus::Sent));
        assert_eq!(saved.last_reminder_sent_ts, Some(42));

        let stored = repo.find(&customer.id).await.unwrap().unwrap();
        assert_eq!(stored, saved);
    }

    #[tokio::test]
    async fn save_profile_rejects_taken_email_and_unknown_customer() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.customers;

        let jane = repo.upsert(&profile("jane@acme.com", "2025-01-15")).await.unwrap().customer;
        repo.upsert(&profile("john@acme.com", "2025-01-15")).await.unwrap();

        assert!(repo
            .save_profile(&jane.id, &profile("john@acme.com", "2025-01-15"))
            .await
            .is_err());
        assert!(repo
            .save_profile(&ID::new(999), &profile("new@acme.com", "2025-01-15"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn search_filters_orders_and_paginates() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.customers;

        repo.upsert(&profile("c@globex.com", "2025-03-01")).await.unwrap();
        repo.upsert(&profile("a@acme.com", "2025-01-01")).await.unwrap();
        let mut other = profile("b@initech.com", "2025-02-01");
        other.company_name = Some("Initech".into());
        repo.upsert(&other).await.unwrap();

        let all = repo
            .search(&CustomerSearchQuery {
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.total, 3);
        let emails = all
            .items
            .iter()
            .map(|c| c.primary_email.as_str())
            .collect::<Vec<_>>();
        assert_eq!(emails, vec!["a@acme.com", "b@initech.com", "c@globex.com"]);

        let page = repo
            .search(&CustomerSearchQuery {
                search: None,
                skip: 1,
                limit: 1,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].primary_email, "b@initech.com");

        let filtered = repo
            .search(&CustomerSearchQuery {
                search: Some("initech".into()),
                skip: 0,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(filtered.total, 1);
        assert_eq!(filtered.items[0].primary_email, "b@initech.com");
    }

    #[tokio::test]
    async fn updates_and_deletes() {
        let ctx = TrackerContext::create_inmemory();
        let repo = &ctx.repos.customers;

        let customer = repo.upsert(&profile("jane@acme.com", "2025-01-15")).await.unwrap().customer;

        let paused = repo.set_paused(&customer.id, true).await.unwrap().unwrap();
        assert!(paused.paused);

        let new_date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let renewed = repo
            .set_expires_on(&customer.id, &new_date)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renewed.expires_on, new_date);
        assert!(renewed.paused);

        let many = repo.find_many(&[customer.id, ID::new(999)]).await.unwrap();
        assert_eq!(many.len(), 1);

        assert!(repo.set_paused(&ID::new(999), true).await.unwrap().is_none());
        assert!(repo.delete(&customer.id).await.unwrap().is_some());
        assert!(repo.find(&customer.id).await.unwrap().is_none());
        assert!(repo.delete(&customer.id).await.unwrap().is_none());
    }
}
