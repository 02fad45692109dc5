use crate::{
    error::TrackerError,
    shared::{
        auth::protect_admin_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use renewal_tracker_api_structs::get_customers::{APIResponse, QueryParams};
use renewal_tracker_domain::Customer;
use renewal_tracker_infra::{CustomerSearchQuery, TrackerContext};

pub async fn get_customers_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<TrackerContext>,
) -> Result<HttpResponse, TrackerError> {
    protect_admin_route(&http_req, &ctx)?;

    let query = query.0;
    let usecase = GetCustomersUseCase {
        search: query.search,
        skip: query.skip,
        limit: query.limit,
    };
    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.customers, res.total)))
        .map_err(TrackerError::from)
}

/// Lists `Customer`s ordered by expiration date, optionally filtered by a
/// search term. The page size is capped by the configured page limit.
#[derive(Debug)]
pub struct GetCustomersUseCase {
    pub search: Option<String>,
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug)]
pub struct UseCaseResponse {
    pub customers: Vec<Customer>,
    pub total: i64,
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

#[async_trait::async_trait(?Send)]
impl UseCase for GetCustomersUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCustomers";

    async fn execute(&mut self, ctx: &TrackerContext) -> Result<Self::Response, Self::Error> {
        let page_limit = ctx.config.customers_page_limit;
        let limit = self
            .limit
            .filter(|limit| *limit > 0)
            .map(|limit| std::cmp::min(limit, page_limit))
            .unwrap_or(page_limit);
        let query = CustomerSearchQuery {
            search: self.search.take(),
            skip: self.skip.unwrap_or(0),
            limit,
        };

        let res = ctx
            .repos
            .customers
            .search(&query)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse {
            customers: res.items,
            total: res.total,
        })
    }
}
