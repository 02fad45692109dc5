use crate::{APIResponse, BaseClient};
use renewal_tracker_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminClient {
    base: Arc<BaseClient>,
}

impl AdminClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Only checks the password. The session cookie is not kept by the sdk,
    /// which authenticates with the api key instead.
    pub async fn login(&self, password: String) -> APIResponse<admin_login::APIResponse> {
        let body = admin_login::RequestBody { password };
        self.base
            .post(body, "admin/auth".into(), StatusCode::OK)
            .await
    }

    pub async fn logout(&self) -> APIResponse<admin_logout::APIResponse> {
        self.base
            .post((), "admin/logout".into(), StatusCode::OK)
            .await
    }
}
