use crate::{
    error::TrackerError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::get_customer::{APIResponse, PathParams};
use renewal_tracker_domain::{Customer, Reminder, ID};
use renewal_tracker_infra::TrackerContext;

pub async fn get_customer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = GetCustomerUseCase {
        customer_id: path.customer_id,
    };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.customer, res.reminders)))
        .map_err(TrackerError::from)
}

#[derive(Debug)]
pub struct GetCustomerUseCase {
    pub customer_id: ID,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub customer: Customer,
    /// Pending `Reminder`s and the delivery history
    pub reminders: Vec<Reminder>,
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
impl UseCase for GetCustomerUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCustomer";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .find(&self.customer_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        let reminders = ctx
            .repos
            .reminders
            .find_by_customer(&customer.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            customer,
            reminders,
        })
    }
}
