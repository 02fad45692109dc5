use crate::{
    error::TrackerError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::set_customer_paused::{APIResponse, PathParams, RequestBody};
use renewal_tracker_domain::{Customer, ID};
use renewal_tracker_infra::TrackerContext;

pub async fn set_customer_paused_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = SetCustomerPausedUseCase {
        customer_id: path.customer_id,
        paused: body.paused,
    };
    execute(usecase, &ctx)
        .await
        .map(|customer| HttpResponse::Ok().json(APIResponse::new(customer)))
        .map_err(TrackerError::from)
}

/// Paused `Customer`s keep their pending `Reminder`s but nothing is sent to
/// them until they are resumed
#[derive(Debug)]
pub struct SetCustomerPausedUseCase {
    pub customer_id: ID,
    pub paused: bool,
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
impl UseCase for SetCustomerPausedUseCase {
    type Response = Customer;

    type Error = UseCaseError;

    const NAME: &'static str = "SetCustomerPaused";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .customers
            .set_paused(&self.customer_id, self.paused)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))
    }
}
