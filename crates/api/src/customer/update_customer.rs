use crate::{
    error::TrackerError,
    reminder::regenerate_reminders::RegenerateRemindersUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::update_customer::{APIResponse, PathParams, RequestBody};
use renewal_tracker_domain::{
    date::format_date, Customer, CustomerInput, CustomerProfile, InvalidCustomerField, ID,
};
use renewal_tracker_infra::TrackerContext;

pub async fn update_customer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = UpdateCustomerUseCase {
        customer_id: path.customer_id,
        changes: body.0,
    };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.customer, res.reminders)))
        .map_err(TrackerError::from)
}

/// Partially updates a `Customer`. The `Reminder`s are only regenerated when
/// the expiration date changes.
#[derive(Debug)]
pub struct UpdateCustomerUseCase {
    pub customer_id: ID,
    pub changes: RequestBody,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub customer: Customer,
    /// Number of pending `Reminder`s scheduled
    pub reminders: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidField(InvalidCustomerField),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for TrackerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The customer with id: {}, was not found.", id))
            }
            UseCaseError::InvalidField(e) => Self::BadClientData(e.to_string()),
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "The primary email: {} is already used by another customer",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl UpdateCustomerUseCase {
    /// The current values with the requested changes applied
    fn merged_input(&mut self, customer: &Customer) -> CustomerInput {
        let changes = std::mem::take(&mut self.changes);
        CustomerInput {
            company_name: changes.company_name.or_else(|| customer.company_name.clone()),
            contact_name: changes.contact_name.or_else(|| customer.contact_name.clone()),
            primary_email: changes
                .primary_email
                .unwrap_or_else(|| customer.primary_email.clone()),
            cc_emails: changes
                .cc_emails
                .unwrap_or_else(|| customer.cc_emails.clone()),
            plan_name: changes.plan_name.or_else(|| customer.plan_name.clone()),
            renew_link: changes.renew_link.or_else(|| customer.renew_link.clone()),
            expires_on: changes
                .expires_on
                .unwrap_or_else(|| format_date(&customer.expires_on)),
            paused: Some(changes.paused.unwrap_or(customer.paused)),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCustomerUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateCustomer";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        let input = self.merged_input(&customer);
        let profile = CustomerProfile::parse(input).map_err(UseCaseError::InvalidField)?;

        if profile.primary_email != customer.primary_email {
            let owner = ctx
                .repos
                .customers
                .find_by_email(&profile.primary_email)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            if let Some(owner) = owner {
                if owner.id != customer.id {
                    return Err(UseCaseError::EmailTaken(profile.primary_email));
                }
            }
        }

        let expires_on_changed = profile.expires_on != customer.expires_on;
        let customer = ctx
            .repos
            .customers
            .save_profile(&customer.id, &profile)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        let reminders = if expires_on_changed {
            let regenerate = RegenerateRemindersUseCase {
                customer_id: customer.id,
                expires_on: customer.expires_on,
            };
            execute(regenerate, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?
                .len()
        } else {
            0
        };

        Ok(UseCaseResponse {
            customer,
            reminders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::create_customer::CreateCustomerUseCase;
    use chrono::NaiveDate;
    use renewal_tracker_domain::ReminderStatus;

    async fn create(ctx: &TrackerContext, email: &str) -> Customer {
        let usecase = CreateCustomerUseCase {
            input: CustomerInput {
                company_name: Some("Acme".into()),
                contact_name: Some("Jane".into()),
                primary_email: email.into(),
                cc_emails: Vec::new(),
                plan_name: Some("Pro".into()),
                renew_link: None,
                expires_on: "2025-01-15".into(),
                paused: None,
            },
        };
        execute(usecase, ctx).await.unwrap().customer
    }

    fn setup() -> TrackerContext {
        let mut ctx = TrackerContext::create_inmemory();
        ctx.config.reminder_offsets = vec![-7, -1];
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn updates_only_given_fields() {
        let ctx = setup();
        let customer = create(&ctx, "jane@acme.com").await;

        let usecase = UpdateCustomerUseCase {
            customer_id: customer.id,
            changes: RequestBody {
                plan_name: Some("Enterprise".into()),
                contact_name: Some("".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.reminders, 0);
        assert_eq!(res.customer.plan_name, Some("Enterprise".into()));
        assert_eq!(res.customer.contact_name, None);
        assert_eq!(res.customer.company_name, Some("Acme".into()));
        assert_eq!(res.customer.primary_email, "jane@acme.com");

        let stored = ctx.repos.customers.find(&customer.id).await.unwrap().unwrap();
        assert_eq!(stored, res.customer);
    }

    #[actix_web::main]
    #[test]
    async fn regenerates_reminders_when_the_date_changes() {
        let ctx = setup();
        let customer = create(&ctx, "jane@acme.com").await;

        let usecase = UpdateCustomerUseCase {
            customer_id: customer.id,
            changes: RequestBody {
                expires_on: Some("2025-03-01".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.reminders, 2);
        assert_eq!(
            res.customer.expires_on,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );

        let reminders = ctx
            .repos
            .reminders
            .find_by_customer(&customer.id)
            .await
            .unwrap();
        assert_eq!(reminders.len(), 2);
        assert!(reminders.iter().all(|r| r.status == ReminderStatus::Pending));
    }

    #[actix_web::main]
    #[test]
    async fn keeps_the_last_reminder_mirror() {
        let ctx = setup();
        let customer = create(&ctx, "jane@acme.com").await;
        ctx.repos
            .customers
            .record_reminder_sent(&customer.id, ReminderStatus::Sent, 1717200000000)
            .await
            .unwrap();

        let usecase = UpdateCustomerUseCase {
            customer_id: customer.id,
            changes: RequestBody {
                plan_name: Some("Enterprise".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.customer.last_reminder_status, Some(ReminderStatus::Sent));
        assert_eq!(res.customer.last_reminder_sent_ts, Some(1717200000000));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_taking_another_customers_email() {
        let ctx = setup();
        let jane = create(&ctx, "jane@acme.com").await;
        create(&ctx, "john@acme.com").await;

        let usecase = UpdateCustomerUseCase {
            customer_id: jane.id,
            changes: RequestBody {
                primary_email: Some("John@Acme.com".into()),
                ..Default::default()
            },
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::EmailTaken("john@acme.com".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_customer_and_invalid_fields() {
        let ctx = setup();
        let customer = create(&ctx, "jane@acme.com").await;

        let usecase = UpdateCustomerUseCase {
            customer_id: ID::new(999),
            changes: Default::default(),
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(ID::new(999))
        );

        let usecase = UpdateCustomerUseCase {
            customer_id: customer.id,
            changes: RequestBody {
                renew_link: Some("javascript:alert(1)".into()),
                ..Default::default()
            },
        };
        assert!(matches!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidField(InvalidCustomerField::RenewLink(_))
        ));
    }
}
