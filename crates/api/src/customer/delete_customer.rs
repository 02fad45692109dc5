use crate::{
    error::TrackerError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::delete_customer::{APIResponse, PathParams};
use renewal_tracker_domain::{Customer, ID};
use renewal_tracker_infra::TrackerContext;
use tracing::info;

pub async fn delete_customer_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = DeleteCustomerUseCase {
        customer_id: path.customer_id,
    };
    execute(usecase, &ctx)
        .await
        .map(|customer| HttpResponse::Ok().json(APIResponse::new(customer)))
        .map_err(TrackerError::from)
}

/// Deletes a `Customer` together with all of its `Reminder`s. The `SendLog`s
/// of the `Customer` are kept.
#[derive(Debug)]
pub struct DeleteCustomerUseCase {
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
impl UseCase for DeleteCustomerUseCase {
    type Response = Customer;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteCustomer";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let customer = ctx
            .repos
            .customers
            .delete(&self.customer_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound(self.customer_id))?;

        let res = ctx
            .repos
            .reminders
            .delete_by_customer(&customer.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "Deleted customer: {} and {} of its reminders",
            customer.id, res.deleted_count
        );

        Ok(customer)
    }
}
