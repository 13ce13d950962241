use actix_web::{web, HttpResponse};
use bmail_core::transform::email_to_wire;
use bmail_core::EmailBackend;
use shared_types::{
    ListEmailsRequest, ListEmailsResponse, MarkAsReadRequest, MoveEmailRequest, ToggleStarRequest,
};
use tracing::info;

use super::{ApiError, AppState};

pub async fn list_emails(
    state: web::Data<AppState>,
    query: web::Query<ListEmailsRequest>,
) -> Result<HttpResponse, ApiError> {
    let emails = match query.into_inner().folder {
        Some(folder) => state.backend.fetch_emails_by_folder(folder).await?,
        None => state.backend.fetch_emails().await?,
    };

    let emails: Vec<_> = emails.iter().map(email_to_wire).collect();
    Ok(HttpResponse::Ok().json(ListEmailsResponse {
        total_count: emails.len(),
        emails,
    }))
}

pub async fn get_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let email = state.backend.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(email_to_wire(&email)))
}

pub async fn move_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<MoveEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let email_id = path.into_inner();
    let email = state.backend.move_email(&email_id, &request).await?;
    info!("Moved email {} to {}", email_id, email.folder);
    Ok(HttpResponse::Ok().json(email_to_wire(&email)))
}

pub async fn toggle_star(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<ToggleStarRequest>,
) -> Result<HttpResponse, ApiError> {
    let email_id = path.into_inner();
    let email = state
        .backend
        .set_starred(&email_id, request.is_starred)
        .await?;
    info!("Set star on email {} to {}", email_id, email.is_starred);
    Ok(HttpResponse::Ok().json(email_to_wire(&email)))
}

pub async fn mark_read(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<MarkAsReadRequest>,
) -> Result<HttpResponse, ApiError> {
    let email_id = path.into_inner();
    let email = state.backend.set_read(&email_id, request.is_read).await?;
    info!("Set read state on email {} to {}", email_id, email.is_read);
    Ok(HttpResponse::Ok().json(email_to_wire(&email)))
}
