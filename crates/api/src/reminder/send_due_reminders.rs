use super::find_due_reminders::find_due_reminders;
use crate::{
    error::TrackerError,
    shared::{
        auth::protect_cron_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::send_due_reminders::{APIResponse, QueryParams};
use renewal_tracker_domain::{
    date::date_from_millis, Customer, DeliveryOutcome, NewSendLog, Reminder, ReminderMessage,
    ReminderStatus, SendLogStatus,
};
use renewal_tracker_infra::{OutgoingEmail, TrackerContext};
use tracing::{error, info, warn};

pub async fn send_due_reminders_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_cron_route(&http_req, &ctx)?;

    let usecase = SendDueRemindersUseCase {
        dry_run: query.dry_run.unwrap_or(false),
    };
    execute(usecase, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                due: summary.due,
                sent: summary.sent,
                failed: summary.failed,
                dry_run: summary.dry_run,
            })
        })
        .map_err(TrackerError::from)
}

/// Delivers every due `Reminder` once. With `dry_run` nothing is sent and only
/// `SendLog`s are written.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {
    pub dry_run: bool,
}

#[derive(Debug, Default, PartialEq)]
pub struct DeliverySummary {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
    pub dry_run: bool,
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

/// Result of a single delivery attempt as far as the run counts are concerned
#[derive(Debug, PartialEq)]
enum Attempt {
    Sent,
    Failed,
    /// Another run finalized the `Reminder` first
    Skipped,
}

async fn write_send_log(log: NewSendLog, ctx: &TrackerContext) {
    if let Err(e) = ctx.repos.send_logs.insert(&log).await {
        error!("Unable to write send log: {:?}. Error: {:?}", log, e);
    }
}

async fn deliver(
    reminder: &Reminder,
    customer: &Customer,
    message: ReminderMessage,
    ctx: &TrackerContext,
) -> Attempt {
    let email = OutgoingEmail {
        to: customer.primary_email.clone(),
        cc: customer.cc_emails.clone(),
        subject: message.subject,
        html: message.html,
    };
    let send_result = ctx.mailer.send(&email).await;
    let attempted_ts = ctx.sys.get_timestamp_millis();

    let (outcome, mut log) = match send_result {
        Ok(sent) => (
            DeliveryOutcome::Sent {
                provider_message_id: sent.provider_message_id,
            },
            NewSendLog::delivery(customer.id, reminder.id, SendLogStatus::Sent, attempted_ts),
        ),
        Err(e) => {
            warn!(
                "Failed to send reminder: {} to: {}. Error: {:?}",
                reminder.id, customer.primary_email, e
            );
            (
                DeliveryOutcome::Failed,
                NewSendLog::delivery(customer.id, reminder.id, SendLogStatus::Failed, attempted_ts)
                    .with_error(e.to_string()),
            )
        }
    };

    let attempt = match ctx
        .repos
        .reminders
        .finalize(&reminder.id, &outcome, attempted_ts)
        .await
    {
        Ok(true) => match outcome {
            DeliveryOutcome::Sent { .. } => {
                if let Err(e) = ctx
                    .repos
                    .customers
                    .record_reminder_sent(&customer.id, ReminderStatus::Sent, attempted_ts)
                    .await
                {
                    error!(
                        "Unable to update the last reminder of customer: {}. Error: {:?}",
                        customer.id, e
                    );
                }
                Attempt::Sent
            }
            DeliveryOutcome::Failed => Attempt::Failed,
        },
        Ok(false) => {
            warn!(
                "Reminder: {} was already finalized by another run, the attempt is not counted",
                reminder.id
            );
            Attempt::Skipped
        }
        Err(e) => {
            error!(
                "Unable to finalize reminder: {} with outcome: {:?}. Error: {:?}",
                reminder.id, outcome, e
            );
            let reason = format!("Unable to record the delivery outcome: {}", e);
            log.error = Some(match log.error.take() {
                Some(send_error) => format!("{}. {}", send_error, reason),
                None => reason,
            });
            Attempt::Failed
        }
    };

    write_send_log(log, ctx).await;
    attempt
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DeliverySummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = find_due_reminders(now, ctx).await.map_err(|e| {
            error!("Unable to select due reminders. Error: {:?}", e);
            UseCaseError::StorageError
        })?;
        let today = date_from_millis(now);

        let mut summary = DeliverySummary {
            due: due.len(),
            dry_run: self.dry_run,
            ..Default::default()
        };

        for (reminder, customer) in &due {
            let message = ReminderMessage::render(customer, &today);
            if self.dry_run {
                info!(
                    "Dry run of reminder: {} to: {} with subject: {}",
                    reminder.id, customer.primary_email, message.subject
                );
                write_send_log(
                    NewSendLog::delivery(customer.id, reminder.id, SendLogStatus::DryRun, now),
                    ctx,
                )
                .await;
                continue;
            }

            match deliver(reminder, customer, message, ctx).await {
                Attempt::Sent => summary.sent += 1,
                Attempt::Failed => summary.failed += 1,
                Attempt::Skipped => (),
            }
        }

        info!(
            "Reminder run finished. Due: {}, sent: {}, failed: {}, dry run: {}",
            summary.due, summary.sent, summary.failed, summary.dry_run
        );
        Ok(summary)
    }
}
