use super::{ICustomerRepo, UpsertResult};
use crate::repos::shared::{
    inmemory_repo::*,
    query_structs::{CustomerSearchQuery, SearchResult},
};
use chrono::NaiveDate;
use renewal_tracker_domain::{Customer, CustomerProfile, ReminderStatus, ID};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryCustomerRepo {
    customers: std::sync::Mutex<Vec<Customer>>,
    next_id: AtomicI64,
}

impl InMemoryCustomerRepo {
    pub fn new() -> Self {
        Self {
            customers: std::sync::Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn update<F: Fn(&mut Customer)>(&self, customer_id: &ID, f: F) -> Option<Customer> {
        update_many(&self.customers, |c| c.id == *customer_id, f);
        find(customer_id, &self.customers)
    }
}

#[async_trait::async_trait]
impl ICustomerRepo for InMemoryCustomerRepo {
    async fn upsert(&self, profile: &CustomerProfile) -> anyhow::Result<UpsertResult> {
        let mut customers = self.customers.lock().unwrap();
        if let Some(existing) = customers
            .iter_mut()
            .find(|c| c.primary_email == profile.primary_email)
        {
            existing.apply_profile(profile.clone());
            return Ok(UpsertResult {
                customer: existing.clone(),
                created: false,
            });
        }

        let customer = Customer {
            id: ID::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            company_name: profile.company_name.clone(),
            contact_name: profile.contact_name.clone(),
            primary_email: profile.primary_email.clone(),
            cc_emails: profile.cc_emails.clone(),
            plan_name: profile.plan_name.clone(),
            renew_link: profile.renew_link.clone(),
            expires_on: profile.expires_on,
            paused: profile.paused,
            last_reminder_status: None,
            last_reminder_sent_ts: None,
        };
        customers.push(customer.clone());
        Ok(UpsertResult {
            customer,
            created: true,
        })
    }

    async fn save_profile(
        &self,
        customer_id: &ID,
        profile: &CustomerProfile,
    ) -> anyhow::Result<Option<Customer>> {
        let taken = find_by(&self.customers, |c| {
            c.id != *customer_id && c.primary_email == profile.primary_email
        });
        if !taken.is_empty() {
            return Err(anyhow::Error::msg(format!(
                "Primary email: {} is already used by another customer",
                profile.primary_email
            )));
        }
        Ok(self.update(customer_id, |c| c.apply_profile(profile.clone())))
    }

    async fn find(&self, customer_id: &ID) -> anyhow::Result<Option<Customer>> {
        Ok(find(customer_id, &self.customers))
    }

    async fn find_by_email(&self, primary_email: &str) -> anyhow::Result<Option<Customer>> {
        let customers = find_by(&self.customers, |c| c.primary_email == primary_email);
        Ok(customers.into_iter().next())
    }

    async fn find_many(&self, customer_ids: &[ID]) -> anyhow::Result<Vec<Customer>> {
        Ok(find_by(&self.customers, |c| customer_ids.contains(&c.id)))
    }

    async fn search(&self, query: &CustomerSearchQuery) -> anyhow::Result<SearchResult<Customer>> {
        let mut customers = find_by(&self.customers, |c| {
            query.matches(&[
                c.company_name.as_deref(),
                c.contact_name.as_deref(),
                Some(c.primary_email.as_str()),
                c.plan_name.as_deref(),
            ])
        });
        customers.sort_by_key(|c| (c.expires_on, c.id));
        let total = customers.len() as i64;
        let items = customers
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .collect();
        Ok(SearchResult { items, total })
    }

    async fn set_paused(&self, customer_id: &ID, paused: bool) -> anyhow::Result<Option<Customer>> {
        Ok(self.update(customer_id, |c| c.paused = paused))
    }

    async fn set_expires_on(
        &self,
        customer_id: &ID,
        expires_on: &NaiveDate,
    ) -> anyhow::Result<Option<Customer>> {
        Ok(self.update(customer_id, |c| c.expires_on = *expires_on))
    }

    async fn record_reminder_sent(
        &self,
        customer_id: &ID,
        status: ReminderStatus,
        sent_ts: i64,
    ) -> anyhow::Result<()> {
        self.update(customer_id, |c| {
            c.last_reminder_status = Some(status);
            c.last_reminder_sent_ts = Some(sent_ts);
        });
        Ok(())
    }

    async fn delete(&self, customer_id: &ID) -> anyhow::Result<Option<Customer>> {
        Ok(delete(customer_id, &self.customers))
    }
}
