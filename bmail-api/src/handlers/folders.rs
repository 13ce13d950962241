use actix_web::{web, HttpResponse};
use bmail_core::filter::folder_infos;
use shared_types::ListFoldersResponse;

use super::{ApiError, AppState};

pub async fn list_folders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let emails = state.backend.snapshot().await;
    Ok(HttpResponse::Ok().json(ListFoldersResponse {
        folders: folder_infos(&emails),
    }))
}
