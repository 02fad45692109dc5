use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

impl TrackerError {
    fn kind(&self) -> &'static str {
        match self {
            Self::InternalError => "InternalError",
            Self::BadClientData(_) => "BadClientData",
            Self::Conflict(_) => "Conflict",
            Self::Unauthorized(_) => "Unauthorized",
            Self::NotFound(_) => "NotFound",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl actix_web::error::ResponseError for TrackerError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    #[actix_web::main]
    #[test]
    async fn renders_json_error_body() {
        let err = TrackerError::NotFound("The customer with id: 3, was not found.".into());
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(res.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["kind"], "NotFound");
        assert_eq!(
            body["error"],
            "404 Not found. Error message: `The customer with id: 3, was not found.`"
        );
    }

    #[test]
    fn maps_status_codes() {
        assert_eq!(
            TrackerError::BadClientData("".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TrackerError::Conflict("".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TrackerError::Unauthorized("".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            TrackerError::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
