use actix_web::{web, HttpResponse};
use bmail_core::filter::filter_threads;
use bmail_core::group_threads;
use bmail_core::transform::thread_to_wire;
use shared_types::{ListThreadsRequest, ListThreadsResponse};

use super::{ApiError, AppState};

/// Threads visible in a folder, newest first, optionally narrowed by a search term
pub async fn list_threads(
    state: web::Data<AppState>,
    query: web::Query<ListThreadsRequest>,
) -> Result<HttpResponse, ApiError> {
    let ListThreadsRequest { folder, search } = query.into_inner();

    let emails = state.backend.snapshot().await;
    let threads = filter_threads(
        &group_threads(&emails),
        folder.unwrap_or_default(),
        search.as_deref(),
        state.backend.settings(),
    );

    let threads: Vec<_> = threads.iter().map(thread_to_wire).collect();
    Ok(HttpResponse::Ok().json(ListThreadsResponse {
        total_count: threads.len(),
        threads,
    }))
}
