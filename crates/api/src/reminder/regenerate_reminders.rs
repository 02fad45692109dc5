use crate::{error::TrackerError, shared::usecase::UseCase};
use chrono::NaiveDate;
use renewal_tracker_domain::{schedule_reminders, Reminder, ID};
use renewal_tracker_infra::TrackerContext;

/// Replaces the pending `Reminder`s of a `Customer` with one `Reminder` per
/// configured offset relative to the new expiration date. Sent and failed
/// `Reminder`s are kept as history.
#[derive(Debug)]
pub struct RegenerateRemindersUseCase {
    pub customer_id: ID,
    pub expires_on: NaiveDate,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TrackerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegenerateRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "RegenerateReminders";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let reminders = schedule_reminders(
            self.customer_id,
            &self.expires_on,
            &ctx.config.reminder_offsets,
        );

        ctx.repos
            .reminders
            .replace_pending(&self.customer_id, &reminders)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
