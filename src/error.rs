use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Every failure a handler can report. The `Display` text is the public
/// `message` of the error envelope, so it never carries internal detail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request")]
    BadRequest,
    #[error("Resource not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request cannot be processed")]
    Unprocessable,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Maps a failed write. Reads go through `From<StoreError>` instead.
    pub fn unprocessable(err: StoreError) -> Self {
        log::error!("Write rejected by store: {}", err);
        ApiError::Unprocessable
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        log::error!("Store error: {}", err);
        ApiError::Internal
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        })
    }
}

pub fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body for {}: {}", req.path(), err);
    ApiError::BadRequest.into()
}

pub fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected query string for {}: {}", req.path(), err);
    ApiError::BadRequest.into()
}

// Path segments are typed as integers, so a non-integer id names no resource.
pub fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected path {}: {}", req.path(), err);
    ApiError::NotFound.into()
}
