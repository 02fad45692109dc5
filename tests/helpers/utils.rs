use renewal_tracker_sdk::{CreateCustomerInput, Customer, RenewalTrackerSDK};

pub fn customer_input(email: &str, expires_on: &str) -> CreateCustomerInput {
    CreateCustomerInput {
        company_name: Some("Acme".into()),
        contact_name: Some("Jane".into()),
        primary_email: email.into(),
        plan_name: Some("Pro".into()),
        renew_link: Some("https://acme.example/renew".into()),
        expires_on: expires_on.into(),
        ..Default::default()
    }
}

pub async fn create_customer(sdk: &RenewalTrackerSDK, email: &str, expires_on: &str) -> Customer {
    sdk.customer
        .create(customer_input(email, expires_on))
        .await
        .expect("Expected to create customer")
        .customer
}
