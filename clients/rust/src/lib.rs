mod admin;
mod base;
mod customer;
mod reminder;
mod status;

use admin::AdminClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use customer::CustomerClient;
pub use customer::{CreateCustomerInput, GetCustomersInput, RenewCustomerInput, UpdateCustomerInput};
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;

pub use renewal_tracker_api_structs::dtos::*;
pub use renewal_tracker_api_structs::import_customers::{CcEmails, ImportRow};
pub use renewal_tracker_api_structs::update_customer::RequestBody as CustomerChanges;
pub use renewal_tracker_domain::{ReminderStatus, SendLogStatus, ID};

// Domain
pub use renewal_tracker_api_structs::dtos::CustomerDTO as Customer;
pub use renewal_tracker_api_structs::dtos::ReminderDTO as Reminder;
pub use renewal_tracker_api_structs::dtos::SendLogDTO as SendLog;

/// Renewal Tracker Server SDK
///
/// The SDK contains methods for interacting with the Renewal Tracker server
/// API.
#[derive(Clone)]
pub struct RenewalTrackerSDK {
    pub admin: AdminClient,
    pub customer: CustomerClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl RenewalTrackerSDK {
    /// Client authenticated as admin with the admin password as api key
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::from_base(base)
    }

    /// Client for the external scheduler that triggers reminder delivery
    pub fn new_scheduler<T: Into<String>>(address: String, cron_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_cron_secret(cron_secret.into());
        Self::from_base(base)
    }

    /// Client without any credentials
    pub fn new_anonymous(address: String) -> Self {
        Self::from_base(BaseClient::new(address))
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let admin = AdminClient::new(base.clone());
        let customer = CustomerClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            admin,
            customer,
            reminder,
            status,
        }
    }
}
