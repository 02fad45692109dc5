use crate::dtos::{CustomerDTO, ReminderDTO, SendLogDTO};
use chrono::NaiveDate;
use renewal_tracker_domain::{Customer, Reminder, SendLog, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub customer: CustomerDTO,
}

impl CustomerResponse {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer: CustomerDTO::new(customer),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CustomerPathParams {
    pub customer_id: ID,
}

pub mod create_customer {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub company_name: Option<String>,
        #[serde(default)]
        pub contact_name: Option<String>,
        pub primary_email: String,
        #[serde(default)]
        pub cc_emails: Vec<String>,
        #[serde(default)]
        pub plan_name: Option<String>,
        #[serde(default)]
        pub renew_link: Option<String>,
        /// Formatted as YYYY-MM-DD
        pub expires_on: String,
        #[serde(default)]
        pub paused: Option<bool>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub customer: CustomerDTO,
        /// False when an existing `Customer` with the same primary email was updated
        pub created: bool,
        /// Number of pending `Reminder`s scheduled
        pub reminders: usize,
    }

    impl APIResponse {
        pub fn new(customer: Customer, created: bool, reminders: usize) -> Self {
            Self {
                customer: CustomerDTO::new(customer),
                created,
                reminders,
            }
        }
    }
}

pub mod get_customer {
    use super::*;

    pub type PathParams = CustomerPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub customer: CustomerDTO,
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(customer: Customer, reminders: Vec<Reminder>) -> Self {
            Self {
                customer: CustomerDTO::new(customer),
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod get_customers {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub search: Option<String>,
        #[serde(default)]
        pub skip: Option<usize>,
        #[serde(default)]
        pub limit: Option<usize>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub customers: Vec<CustomerDTO>,
        /// Number of matching `Customer`s ignoring pagination
        pub total: i64,
    }

    impl APIResponse {
        pub fn new(customers: Vec<Customer>, total: i64) -> Self {
            Self {
                customers: customers.into_iter().map(CustomerDTO::new).collect(),
                total,
            }
        }
    }
}

pub mod update_customer {
    use super::*;

    pub type PathParams = CustomerPathParams;

    /// Only the given fields are updated. Empty strings clear the optional text fields.
    #[derive(Debug, Default, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub company_name: Option<String>,
        #[serde(default)]
        pub contact_name: Option<String>,
        #[serde(default)]
        pub primary_email: Option<String>,
        #[serde(default)]
        pub cc_emails: Option<Vec<String>>,
        #[serde(default)]
        pub plan_name: Option<String>,
        #[serde(default)]
        pub renew_link: Option<String>,
        #[serde(default)]
        pub expires_on: Option<String>,
        #[serde(default)]
        pub paused: Option<bool>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub customer: CustomerDTO,
        /// Number of pending `Reminder`s scheduled, zero when the expiration date did not change
        pub reminders: usize,
    }

    impl APIResponse {
        pub fn new(customer: Customer, reminders: usize) -> Self {
            Self {
                customer: CustomerDTO::new(customer),
                reminders,
            }
        }
    }
}

pub mod delete_customer {
    use super::*;

    pub type PathParams = CustomerPathParams;

    pub type APIResponse = CustomerResponse;
}

pub mod set_customer_paused {
    use super::*;

    pub type PathParams = CustomerPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub paused: bool,
    }

    pub type APIResponse = CustomerResponse;
}

pub mod renew_customer {
    use super::*;

    pub type PathParams = CustomerPathParams;

    /// Exactly one of `term` and `date` must be given
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// One of `+6m`, `+12m`, `+1y` and `+24m`
        #[serde(default)]
        pub term: Option<String>,
        /// Formatted as YYYY-MM-DD
        #[serde(default)]
        pub date: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub customer: CustomerDTO,
        pub new_expires_on: NaiveDate,
        /// Number of pending `Reminder`s scheduled
        pub created: usize,
    }

    impl APIResponse {
        pub fn new(customer: Customer, created: usize) -> Self {
            Self {
                new_expires_on: customer.expires_on,
                customer: CustomerDTO::new(customer),
                created,
            }
        }
    }
}

pub mod get_customer_logs {
    use super::*;

    pub type PathParams = CustomerPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub logs: Vec<SendLogDTO>,
    }

    impl APIResponse {
        pub fn new(logs: Vec<SendLog>) -> Self {
            Self {
                logs: logs.into_iter().map(SendLogDTO::new).collect(),
            }
        }
    }
}

pub mod import_customers {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
    #[serde(untagged)]
    pub enum CcEmails {
        List(Vec<String>),
        /// Comma separated
        Text(String),
    }

    /// Spreadsheet exports tend to use snake case so both casings are accepted
    #[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct ImportRow {
        #[serde(default, alias = "company_name")]
        pub company_name: Option<String>,
        #[serde(default, alias = "contact_name")]
        pub contact_name: Option<String>,
        #[serde(alias = "primary_email")]
        pub primary_email: String,
        #[serde(default, alias = "cc_emails")]
        pub cc_emails: Option<CcEmails>,
        #[serde(default, alias = "plan_name")]
        pub plan_name: Option<String>,
        #[serde(default, alias = "renew_link")]
        pub renew_link: Option<String>,
        #[serde(alias = "expires_on")]
        pub expires_on: String,
        #[serde(default)]
        pub paused: Option<bool>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub rows: Vec<ImportRow>,
    }

    #[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub inserted: usize,
        pub updated: usize,
        /// Number of pending `Reminder`s scheduled across all rows
        pub reminders: usize,
        /// Rows that could not be stored
        pub failed: usize,
    }
}

pub mod import_customers_csv {
    use super::*;

    pub type APIResponse = import_customers::APIResponse;
}
