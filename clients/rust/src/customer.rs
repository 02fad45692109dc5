use crate::{APIResponse, BaseClient};
use renewal_tracker_api_structs::*;
use renewal_tracker_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCustomerInput {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub primary_email: String,
    pub cc_emails: Vec<String>,
    pub plan_name: Option<String>,
    pub renew_link: Option<String>,
    /// Formatted as YYYY-MM-DD
    pub expires_on: String,
    pub paused: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct GetCustomersInput {
    pub search: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl GetCustomersInput {
    fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(format!("search={}", urlencoding_component(search)));
        }
        if let Some(skip) = self.skip {
            params.push(format!("skip={}", skip));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }
        params.join("&")
    }
}

/// Percent encodes everything except unreserved characters
fn urlencoding_component(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}

pub struct UpdateCustomerInput {
    pub customer_id: ID,
    pub changes: update_customer::RequestBody,
}

pub struct RenewCustomerInput {
    pub customer_id: ID,
    /// One of `+6m`, `+12m`, `+1y` and `+24m`
    pub term: Option<String>,
    /// Formatted as YYYY-MM-DD
    pub date: Option<String>,
}

impl CustomerClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Creates the customer, or updates the one with the same primary email
    pub async fn create(
        &self,
        input: CreateCustomerInput,
    ) -> APIResponse<create_customer::APIResponse> {
        let body = create_customer::RequestBody {
            company_name: input.company_name,
            contact_name: input.contact_name,
            primary_email: input.primary_email,
            cc_emails: input.cc_emails,
            plan_name: input.plan_name,
            renew_link: input.renew_link,
            expires_on: input.expires_on,
            paused: input.paused,
        };
        self.base
            .post_expecting(
                body,
                "customers".into(),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await
    }

    pub async fn get(&self, customer_id: ID) -> APIResponse<get_customer::APIResponse> {
        self.base
            .get(format!("customers/{}", customer_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self, input: GetCustomersInput) -> APIResponse<get_customers::APIResponse> {
        self.base
            .get(
                format!("customers?{}", input.to_query_string()),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update(
        &self,
        input: UpdateCustomerInput,
    ) -> APIResponse<update_customer::APIResponse> {
        self.base
            .put(
                input.changes,
                format!("customers/{}", input.customer_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, customer_id: ID) -> APIResponse<delete_customer::APIResponse> {
        self.base
            .delete(format!("customers/{}", customer_id), StatusCode::OK)
            .await
    }

    pub async fn set_paused(
        &self,
        customer_id: ID,
        paused: bool,
    ) -> APIResponse<set_customer_paused::APIResponse> {
        let body = set_customer_paused::RequestBody { paused };
        self.base
            .post(
                body,
                format!("customers/{}/pause", customer_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn renew(&self, input: RenewCustomerInput) -> APIResponse<renew_customer::APIResponse> {
        let body = renew_customer::RequestBody {
            term: input.term,
            date: input.date,
        };
        self.base
            .post(
                body,
                format!("customers/{}/renew", input.customer_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_logs(&self, customer_id: ID) -> APIResponse<get_customer_logs::APIResponse> {
        self.base
            .get(format!("customers/{}/logs", customer_id), StatusCode::OK)
            .await
    }

    pub async fn import(
        &self,
        rows: Vec<import_customers::ImportRow>,
    ) -> APIResponse<import_customers::APIResponse> {
        let body = import_customers::RequestBody { rows };
        self.base
            .post(body, "customers/import".into(), StatusCode::OK)
            .await
    }

    pub async fn import_csv(&self, csv: String) -> APIResponse<import_customers_csv::APIResponse> {
        self.base
            .post_text(
                csv,
                "text/csv",
                "customers/import/csv".into(),
                StatusCode::OK,
            )
            .await
    }
}
