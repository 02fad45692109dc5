use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    client: Client,
    address: String,
    api_key: Option<String>,
    cron_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    NotFound,
    Conflict,
    InternalError,
    UnexpectedStatusCode(StatusCode),
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub message: String,
}

impl APIError {
    fn new(variant: APIErrorVariant, message: impl Into<String>) -> Self {
        Self {
            variant,
            message: message.into(),
        }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

/// Error body rendered by the server
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            client: Client::new(),
            address,
            api_key: None,
            cron_secret: None,
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_cron_secret(&mut self, cron_secret: String) {
        self.cron_secret = Some(cron_secret);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        let builder = self.client.request(method, &url);

        let builder = match &self.api_key {
            Some(api_key) => builder.header("x-api-key", api_key.clone()),
            None => builder,
        };
        match &self.cron_secret {
            Some(secret) => builder.header("x-cron-secret", secret.clone()),
            None => builder,
        }
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_codes: &[StatusCode],
    ) -> Result<Response, APIError> {
        let status = res.status();
        if expected_status_codes.contains(&status) {
            return Ok(res);
        }

        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => String::new(),
        };
        let variant = match status {
            StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
            StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
            StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
            StatusCode::CONFLICT => APIErrorVariant::Conflict,
            StatusCode::INTERNAL_SERVER_ERROR => APIErrorVariant::InternalError,
            _ => APIErrorVariant::UnexpectedStatusCode(status),
        };
        Err(APIError::new(variant, message))
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Result<Response, reqwest::Error>,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<T> {
        let res = res.map_err(|e| APIError::new(APIErrorVariant::Network, e.to_string()))?;
        let res = self.check_status_code(res, expected_status_codes).await?;
        res.json::<T>()
            .await
            .map_err(|e| APIError::new(APIErrorVariant::MalformedResponse, e.to_string()))
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::GET, path).send().await;
        self.handle_api_response(res, &[expected_status_code]).await
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::DELETE, path).send().await;
        self.handle_api_response(res, &[expected_status_code]).await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.get_client(Method::PUT, path).json(&body).send().await;
        self.handle_api_response(res, &[expected_status_code]).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.post_expecting(body, path, &[expected_status_code])
            .await
    }

    /// For endpoints that answer with different success codes, e.g. upserts
    pub async fn post_expecting<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<T> {
        let res = self.get_client(Method::POST, path).json(&body).send().await;
        self.handle_api_response(res, expected_status_codes).await
    }

    pub async fn post_text<T: for<'de> Deserialize<'de>>(
        &self,
        body: String,
        content_type: &str,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .get_client(Method::POST, path)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await;
        self.handle_api_response(res, &[expected_status_code]).await
    }
}
