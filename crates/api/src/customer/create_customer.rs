use crate::{
    error::TrackerError,
    reminder::regenerate_reminders::RegenerateRemindersUseCase,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::create_customer::{APIResponse, RequestBody};
use renewal_tracker_domain::{Customer, CustomerInput, CustomerProfile, InvalidCustomerField, Reminder};
use renewal_tracker_infra::TrackerContext;

pub async fn create_customer_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateCustomerUseCase {
        input: CustomerInput {
            company_name: body.company_name,
            contact_name: body.contact_name,
            primary_email: body.primary_email,
            cc_emails: body.cc_emails,
            plan_name: body.plan_name,
            renew_link: body.renew_link,
            expires_on: body.expires_on,
            paused: body.paused,
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            let reminders = res.reminders.len();
            let response = APIResponse::new(res.customer, res.created, reminders);
            if res.created {
                HttpResponse::Created().json(response)
            } else {
                HttpResponse::Ok().json(response)
            }
        })
        .map_err(TrackerError::from)
}

/// Creates a `Customer`, or updates the one with the same primary email, and
/// schedules its `Reminder`s
#[derive(Debug)]
pub struct CreateCustomerUseCase {
    pub input: CustomerInput,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub customer: Customer,
    pub created: bool,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidField(InvalidCustomerField),
    StorageError,
}

impl From<UseCaseError> for TrackerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidField(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCustomerUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCustomer";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let profile = CustomerProfile::parse(std::mem::take(&mut self.input))
            .map_err(UseCaseError::InvalidField)?;

        let res = ctx
            .repos
            .customers
            .upsert(&profile)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let regenerate = RegenerateRemindersUseCase {
            customer_id: res.customer.id,
            expires_on: res.customer.expires_on,
        };
        let reminders = execute(regenerate, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            customer: res.customer,
            created: res.created,
            reminders,
        })
    }
}
