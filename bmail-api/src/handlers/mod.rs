pub mod emails;
pub mod folders;
pub mod threads;
pub mod user;

use std::fmt;
use std::sync::Arc;

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use bmail_core::{InMemoryBackend, MailError};
use shared_types::{ApiUser, ErrorResponse};

/// Shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<InMemoryBackend>,
    pub user: ApiUser,
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub MailError);

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        match &self.0 {
            MailError::NotFound(_) => HttpResponse::NotFound().json(body),
            MailError::Timestamp(_) => HttpResponse::BadRequest().json(body),
            MailError::Http(_) | MailError::Remote { .. } => {
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}

/// Extractor failures (bad JSON body, bad query) answer 400 with an `ErrorResponse`
pub fn bad_request<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let body = ErrorResponse {
        error: err.to_string(),
    };
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
