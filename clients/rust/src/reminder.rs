use crate::{APIResponse, BaseClient};
use renewal_tracker_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers delivery of all due reminders. Requires the cron secret.
    pub async fn send_due(&self, dry_run: bool) -> APIResponse<send_due_reminders::APIResponse> {
        self.base
            .post(
                (),
                format!("cron/send-reminders?dryRun={}", dry_run),
                StatusCode::OK,
            )
            .await
    }
}
