use crate::{
    date::parse_date,
    email::{is_valid_email, normalize_email},
    reminder::ReminderStatus,
    shared::entity::{Entity, ID},
};
use chrono::NaiveDate;
use thiserror::Error;

/// A `Customer` is a tracked subscription whose `expires_on` date drives
/// the `Reminder`s that are scheduled for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: ID,
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    /// Trimmed and lowercased, unique among all `Customer`s
    pub primary_email: String,
    pub cc_emails: Vec<String>,
    pub plan_name: Option<String>,
    pub renew_link: Option<String>,
    pub expires_on: NaiveDate,
    /// A paused `Customer` receives no reminders, but keeps its scheduled ones
    pub paused: bool,
    /// Mirror of the most recent successful delivery
    pub last_reminder_status: Option<ReminderStatus>,
    pub last_reminder_sent_ts: Option<i64>,
}

impl Customer {
    pub fn apply_profile(&mut self, profile: CustomerProfile) {
        self.company_name = profile.company_name;
        self.contact_name = profile.contact_name;
        self.primary_email = profile.primary_email;
        self.cc_emails = profile.cc_emails;
        self.plan_name = profile.plan_name;
        self.renew_link = profile.renew_link;
        self.expires_on = profile.expires_on;
        self.paused = profile.paused;
    }

    pub fn profile(&self) -> CustomerProfile {
        CustomerProfile {
            company_name: self.company_name.clone(),
            contact_name: self.contact_name.clone(),
            primary_email: self.primary_email.clone(),
            cc_emails: self.cc_emails.clone(),
            plan_name: self.plan_name.clone(),
            renew_link: self.renew_link.clone(),
            expires_on: self.expires_on,
            paused: self.paused,
        }
    }
}

impl Entity for Customer {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The admin editable fields of a `Customer`, already validated and normalized
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub primary_email: String,
    pub cc_emails: Vec<String>,
    pub plan_name: Option<String>,
    pub renew_link: Option<String>,
    pub expires_on: NaiveDate,
    pub paused: bool,
}

/// Unvalidated customer fields as they arrive from a form, a json body or a csv row
#[derive(Debug, Clone, Default)]
pub struct CustomerInput {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub primary_email: String,
    pub cc_emails: Vec<String>,
    pub plan_name: Option<String>,
    pub renew_link: Option<String>,
    pub expires_on: String,
    pub paused: Option<bool>,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCustomerField {
    #[error("Invalid primary email: `{0}`")]
    PrimaryEmail(String),
    #[error("Invalid cc email: `{0}`")]
    CcEmail(String),
    #[error("Invalid renewal link: `{0}`. Must be an absolute http(s) url")]
    RenewLink(String),
    #[error("Invalid expires_on date: `{0}`. Use YYYY-MM-DD")]
    ExpiresOn(String),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_renew_link(link: &str) -> Result<(), InvalidCustomerField> {
    match url::Url::parse(link) {
        Ok(url) if url.scheme() == "https" || url.scheme() == "http" => Ok(()),
        _ => Err(InvalidCustomerField::RenewLink(link.to_string())),
    }
}

pub fn validate_cc_emails(cc_emails: Vec<String>) -> Result<Vec<String>, InvalidCustomerField> {
    let mut normalized = Vec::with_capacity(cc_emails.len());
    for cc in cc_emails {
        let cc = normalize_email(&cc);
        if cc.is_empty() {
            continue;
        }
        if !is_valid_email(&cc) {
            return Err(InvalidCustomerField::CcEmail(cc));
        }
        normalized.push(cc);
    }
    Ok(normalized)
}

impl CustomerProfile {
    pub fn parse(input: CustomerInput) -> Result<Self, InvalidCustomerField> {
        let primary_email = normalize_email(&input.primary_email);
        if !is_valid_email(&primary_email) {
            return Err(InvalidCustomerField::PrimaryEmail(input.primary_email));
        }

        let cc_emails = validate_cc_emails(input.cc_emails)?;

        let renew_link = non_blank(input.renew_link);
        if let Some(link) = &renew_link {
            validate_renew_link(link)?;
        }

        let expires_on = parse_date(input.expires_on.trim())
            .map_err(|_| InvalidCustomerField::ExpiresOn(input.expires_on.clone()))?;

        Ok(Self {
            company_name: non_blank(input.company_name),
            contact_name: non_blank(input.contact_name),
            primary_email,
            cc_emails,
            plan_name: non_blank(input.plan_name),
            renew_link,
            expires_on,
            paused: input.paused.unwrap_or(false),
        })
    }
}
