use actix_web::{web, HttpResponse, Responder};

use super::AppState;

pub async fn get_user(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.user)
}
