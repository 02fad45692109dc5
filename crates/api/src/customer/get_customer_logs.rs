use crate::{
    error::TrackerError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::get_customer_logs::{APIResponse, PathParams};
use renewal_tracker_domain::{SendLog, ID};
use renewal_tracker_infra::TrackerContext;

pub async fn get_customer_logs_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetCustomerLogsUseCase {
        customer_id: path.customer_id,
    };
    execute(usecase, &ctx)
        .await
        .map(|logs| HttpResponse::Ok().json(APIResponse::new(logs)))
        .map_err(TrackerError::from)
}

/// The `SendLog`s of a `Customer`, newest first
#[derive(Debug)]
pub struct GetCustomerLogsUseCase {
    pub customer_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for TrackerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The customer with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCustomerLogsUseCase {
    type Response = Vec<SendLog>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCustomerLogs";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        ctx.repos
            .send_logs
            .find_by_customer(&customer.id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renewal_tracker_domain::{CustomerProfile, NewSendLog, SendLogStatus};

    #[actix_web::main]
    #[test]
    async fn returns_newest_logs_first() {
        let ctx = TrackerContext::create_inmemory();
        let profile = CustomerProfile {
            company_name: None,
            contact_name: None,
            primary_email: "jane@acme.com".into(),
            cc_emails: Vec::new(),
            plan_name: None,
            renew_link: None,
            expires_on: "2025-01-15".parse().unwrap(),
            paused: false,
        };
        let customer = ctx.repos.customers.upsert(&profile).await.unwrap().customer;
        ctx.repos
            .send_logs
            .insert(&NewSendLog::renewed(customer.id, 10))
            .await
            .unwrap();
        ctx.repos
            .send_logs
            .insert(
                &NewSendLog::delivery(customer.id, ID::new(1), SendLogStatus::Failed, 20)
                    .with_error("Mailbox unavailable"),
            )
            .await
            .unwrap();

        let usecase = GetCustomerLogsUseCase {
            customer_id: customer.id,
        };
        let logs = execute(usecase, &ctx).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, SendLogStatus::Failed);
        assert_eq!(logs[0].error, Some("Mailbox unavailable".into()));
        assert_eq!(logs[1].status, SendLogStatus::Renewed);

        let usecase = GetCustomerLogsUseCase {
            customer_id: ID::new(999),
        };
        assert_eq!(
            execute(usecase, &ctx).await.unwrap_err(),
            UseCaseError::NotFound(ID::new(999))
        );
    }
}
