use super::subscribers::WriteRenewalLogOnCustomerRenewed;
use crate::{
    error::TrackerError,
    reminder::regenerate_reminders::RegenerateRemindersUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::renew_customer::{APIResponse, PathParams, RequestBody};
use renewal_tracker_domain::{
    date::date_from_millis, Customer, InvalidRenewal, Renewal, Reminder, ID,
};
use renewal_tracker_infra::TrackerContext;

pub async fn renew_customer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = RenewCustomerUseCase {
        customer_id: path.customer_id,
        term: body.term,
        date: body.date,
    };
    execute(usecase, &ctx)
        .await
        .map(|res| {
            let created = res.reminders.len();
            HttpResponse::Ok().json(APIResponse::new(res.customer, created))
        })
        .map_err(TrackerError::from)
}

/// Moves the expiration date of a `Customer` either by a fixed term or to an
/// exact date, and replaces its pending `Reminder`s accordingly
#[derive(Debug)]
pub struct RenewCustomerUseCase {
    pub customer_id: ID,
    pub term: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub customer: Customer,
    pub reminders: Vec<Reminder>,
    /// When the renewal happened
    pub renewed_ts: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidRenewal(InvalidRenewal),
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TrackerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRenewal(e) => Self::BadClientData(e.to_string()),
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The customer with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RenewCustomerUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "RenewCustomer";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let renewal = Renewal::parse(self.term.as_deref(), self.date.as_deref())
            .map_err(UseCaseError::InvalidRenewal)?;

        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        let now = ctx.sys.get_timestamp_millis();
        let expires_on = renewal
            .new_expiration(Some(customer.expires_on), date_from_millis(now))
            .map_err(UseCaseError::InvalidRenewal)?;

        let customer = ctx
            .repos
            .customers
            .set_expires_on(&customer.id, &expires_on)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        let regenerate = RegenerateRemindersUseCase {
            customer_id: customer.id,
            expires_on,
        };
        let reminders = execute(regenerate, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            customer,
            reminders,
            renewed_ts: now,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(WriteRenewalLogOnCustomerRenewed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::create_customer::CreateCustomerUseCase;
    use chrono::NaiveDate;
    use renewal_tracker_domain::{CustomerInput, ReminderStatus, SendLogStatus};
    use renewal_tracker_infra::StaticTimeSys;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (TrackerContext, Customer) {
        let mut ctx = TrackerContext::create_inmemory();
        ctx.config.reminder_offsets = vec![-30, -7, -3, -1, 1];
        // 2024-06-01T00:00:00Z
        ctx.sys = Arc::new(StaticTimeSys(1717200000000));
        let customer = execute(
            CreateCustomerUseCase {
                input: CustomerInput {
                    primary_email: "jane@acme.com".into(),
                    expires_on: "2025-01-15".into(),
                    ..Default::default()
                },
            },
            &ctx,
        )
        .await
        .unwrap()
        .customer;
        (ctx, customer)
    }

    #[actix_web::main]
    #[test]
    async fn extends_by_term_and_writes_renewal_log() {
        let (ctx, customer) = setup().await;

        let usecase = RenewCustomerUseCase {
            customer_id: customer.id,
            term: Some("+12m".into()),
            date: None,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.customer.expires_on, date(2026, 1, 15));
        assert_eq!(res.reminders.len(), 5);
        assert!(res
            .reminders
            .iter()
            .all(|r| r.status == ReminderStatus::Pending));

        let stored = ctx
            .repos
            .reminders
            .find_by_customer(&customer.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 5);

        let logs = ctx
            .repos
            .send_logs
            .find_by_customer(&customer.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SendLogStatus::Renewed);
        assert_eq!(logs[0].reminder_id, None);
        assert_eq!(logs[0].created, 1717200000000);
    }

    #[actix_web::main]
    #[test]
    async fn uses_explicit_date_literally() {
        let (ctx, customer) = setup().await;

        let usecase = RenewCustomerUseCase {
            customer_id: customer.id,
            term: None,
            date: Some("2025-12-01".into()),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.customer.expires_on, date(2025, 12, 1));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_requests_without_side_effects() {
        let (ctx, customer) = setup().await;

        let usecase = RenewCustomerUseCase {
            customer_id: customer.id,
            term: Some("+6m".into()),
            date: Some("2025-12-01".into()),
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidRenewal(InvalidRenewal::BothTermAndDate)
        );

        let usecase = RenewCustomerUseCase {
            customer_id: customer.id,
            term: None,
            date: None,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::InvalidRenewal(InvalidRenewal::MissingTermOrDate)
        );

        let usecase = RenewCustomerUseCase {
            customer_id: ID::new(999),
            term: Some("+6m".into()),
            date: None,
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(ID::new(999))
        );

        let stored = ctx.repos.customers.find(&customer.id).await.unwrap().unwrap();
        assert_eq!(stored.expires_on, date(2025, 1, 15));
        assert!(ctx
            .repos
            .send_logs
            .find_by_customer(&customer.id)
            .await
            .unwrap()
            .is_empty());
    }
}
