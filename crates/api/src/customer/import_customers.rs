use crate::{
    error::TrackerError,
    reminder::regenerate_reminders::RegenerateRemindersUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::import_customers::{APIResponse, CcEmails, ImportRow, RequestBody};
use renewal_tracker_domain::{
    split_email_list, CustomerInput, CustomerProfile, InvalidCustomerField,
};
use renewal_tracker_infra::TrackerContext;
use tracing::{error, info};

pub async fn import_customers_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = ImportCustomersUseCase {
        rows: body.0.rows,
    };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(res))
        .map_err(TrackerError::from)
}

/// Upserts many `Customer`s by primary email and schedules their `Reminder`s.
///
/// Every row is validated before anything is stored. Rows are then processed
/// in order and a row that fails to be stored does not abort the rest.
#[derive(Debug)]
pub struct ImportCustomersUseCase {
    pub rows: Vec<ImportRow>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidRow {
        /// 1-based position of the row in the request
        row: usize,
        error: InvalidCustomerField,
    },
}

impl From<UseCaseError> for TrackerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRow { row, error } => {
                Self::BadClientData(format!("Row {}: {}", row, error))
            }
        }
    }
}

fn customer_input(row: ImportRow) -> CustomerInput {
    let cc_emails = match row.cc_emails {
        Some(CcEmails::List(emails)) => emails,
        Some(CcEmails::Text(emails)) => split_email_list(&emails),
        None => Vec::new(),
    };
    CustomerInput {
        company_name: row.company_name,
        contact_name: row.contact_name,
        primary_email: row.primary_email,
        cc_emails,
        plan_name: row.plan_name,
        renew_link: row.renew_link,
        expires_on: row.expires_on,
        paused: row.paused,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ImportCustomersUseCase {
    type Response = APIResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "ImportCustomers";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let profiles = std::mem::take(&mut self.rows)
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                CustomerProfile::parse(customer_input(row))
                    .map_err(|error| UseCaseError::InvalidRow { row: i + 1, error })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut res = APIResponse::default();
        for profile in profiles {
            let upserted = match ctx.repos.customers.upsert(&profile).await {
                Ok(upserted) => upserted,
                Err(e) => {
                    error!(
                        "Failed to import customer: {}. Error: {:?}",
                        profile.primary_email, e
                    );
                    res.failed += 1;
                    continue;
                }
            };
            if upserted.created {
                res.inserted += 1;
            } else {
                res.updated += 1;
            }

            let regenerate = RegenerateRemindersUseCase {
                customer_id: upserted.customer.id,
                expires_on: upserted.customer.expires_on,
            };
            match execute(regenerate, ctx).await {
                Ok(reminders) => res.reminders += reminders.len(),
                Err(_) => res.failed += 1,
            }
        }

        info!(
            "Imported customers. Inserted: {}, updated: {}, failed: {}",
            res.inserted, res.updated, res.failed
        );
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> TrackerContext {
        let mut ctx = TrackerContext::create_inmemory();
        ctx.config.reminder_offsets = vec![-7, -1];
        ctx
    }

    fn row(email: &str, plan: &str) -> ImportRow {
        ImportRow {
            primary_email: email.into(),
            plan_name: Some(plan.into()),
            expires_on: "2025-01-15".into(),
            ..Default::default()
        }
    }

    #[actix_web::main]
    #[test]
    async fn deduplicates_rows_on_normalized_email() {
        let ctx = setup();

        let usecase = ImportCustomersUseCase {
            rows: vec![row("A@x.com", "Basic"), row("a@x.com", "Pro")],
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(
            res,
            APIResponse {
                inserted: 1,
                updated: 1,
                reminders: 4,
                failed: 0,
            }
        );

        let customer = ctx
            .repos
            .customers
            .find_by_email("a@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(customer.plan_name, Some("Pro".into()));
        assert_eq!(customer.primary_email, "a@x.com");

        let reminders = ctx
            .repos
            .reminders
            .find_by_customer(&customer.id)
            .await
            .unwrap();
        assert_eq!(reminders.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn accepts_cc_emails_as_list_or_text() {
        let ctx = setup();

        let mut first = row("first@x.com", "Pro");
        first.cc_emails = Some(CcEmails::Text("Ops@x.com, billing@x.com".into()));
        let mut second = row("second@x.com", "Pro");
        second.cc_emails = Some(CcEmails::List(vec!["cto@x.com".into()]));

        let usecase = ImportCustomersUseCase {
            rows: vec![first, second],
        };
        execute(usecase, &ctx).await.unwrap();

        let first = ctx
            .repos
            .customers
            .find_by_email("first@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.cc_emails, vec!["ops@x.com", "billing@x.com"]);
        let second = ctx
            .repos
            .customers
            .find_by_email("second@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.cc_emails, vec!["cto@x.com"]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_the_whole_import_on_an_invalid_row() {
        let ctx = setup();

        let mut invalid = row("second@x.com", "Pro");
        invalid.expires_on = "15/01/2025".into();
        let usecase = ImportCustomersUseCase {
            rows: vec![row("first@x.com", "Pro"), invalid],
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidRow {
                row: 2,
                error: InvalidCustomerField::ExpiresOn("15/01/2025".into())
            }
        );

        assert!(ctx
            .repos
            .customers
            .find_by_email("first@x.com")
            .await
            .unwrap()
            .is_none());
    }
}
