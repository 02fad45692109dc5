mod customer;
pub mod date;
mod email;
mod message;
mod offsets;
mod reminder;
mod renewal;
mod send_log;
mod shared;

pub use customer::{
    validate_cc_emails, validate_renew_link, Customer, CustomerInput, CustomerProfile,
    InvalidCustomerField,
};
pub use email::{is_valid_email, normalize_email, split_email_list};
pub use message::ReminderMessage;
pub use offsets::{parse_offsets, DEFAULT_REMINDER_OFFSETS};
pub use reminder::{schedule_reminders, DeliveryOutcome, NewReminder, Reminder, ReminderStatus};
pub use renewal::{InvalidRenewal, Renewal, RenewalTerm};
pub use send_log::{NewSendLog, SendLog, SendLogStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
