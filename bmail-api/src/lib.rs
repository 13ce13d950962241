pub mod config;
pub mod handlers;

use actix_web::{get, web, HttpResponse, Responder};

pub use handlers::AppState;

#[get("/health")]
async fn health(state: web::Data<AppState>) -> impl Responder {
    let emails = state.backend.snapshot().await;
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "emails": emails.len()
    }))
}

/// Mount every endpoint on an app or scope
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::bad_request))
        .app_data(web::QueryConfig::default().error_handler(handlers::bad_request))
        .service(health)
        .route("/api/emails", web::get().to(handlers::emails::list_emails))
        .route("/api/emails/{id}", web::get().to(handlers::emails::get_email))
        .route("/api/emails/{id}/move", web::put().to(handlers::emails::move_email))
        .route("/api/emails/{id}/star", web::put().to(handlers::emails::toggle_star))
        .route("/api/emails/{id}/read", web::put().to(handlers::emails::mark_read))
        .route("/api/threads", web::get().to(handlers::threads::list_threads))
        .route("/api/folders", web::get().to(handlers::folders::list_folders))
        .route("/api/user", web::get().to(handlers::user::get_user));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpServer};
    use bmail_core::backend::http::decode;
    use bmail_core::time::{frozen_time, FixedClock};
    use bmail_core::{
        EmailBackend, HttpBackend, InMemoryBackend, MailError, MutationEngine, ViewContext,
    };
    use shared_types::{
        ApiEmail, ApiUser, ErrorResponse, Folder, FolderSelector, ListEmailsResponse,
        ListFoldersResponse, ListThreadsResponse, MailSettings,
    };
    use std::sync::Arc;

    fn state() -> AppState {
        let settings = MailSettings::default();
        let backend = InMemoryBackend::seeded(&FixedClock(frozen_time()), settings.clone());
        AppState {
            backend: Arc::new(backend),
            user: ApiUser {
                id: "1".to_string(),
                email: "you@example.com".to_string(),
                name: "You".to_string(),
                settings,
            },
        }
    }

    macro_rules! app {
        () => {
            test::init_service(App::new().app_data(web::Data::new(state())).configure(routes)).await
        };
    }

    #[actix_web::test]
    async fn test_list_emails_by_folder() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/emails").to_request();
        let body: ListEmailsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total_count, 11);

        let req = test::TestRequest::get()
            .uri("/api/emails?folder=starred")
            .to_request();
        let body: ListEmailsResponse = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = body.emails.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "6"]);
        assert_eq!(body.emails[0].timestamp, "2030-03-14T09:15:00.000Z");
    }

    #[actix_web::test]
    async fn test_unknown_email_is_404() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/emails/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Email not found: missing");
    }

    #[actix_web::test]
    async fn test_move_to_trash_clears_star() {
        let app = app!();

        let req = test::TestRequest::put()
            .uri("/api/emails/1/move")
            .set_json(serde_json::json!({ "folder": "trash" }))
            .to_request();
        let email: ApiEmail = test::call_and_read_body_json(&app, req).await;
        assert_eq!(email.folder, Folder::Trash);
        assert!(!email.is_starred);

        // Explicitly keep the star
        let req = test::TestRequest::put()
            .uri("/api/emails/6/move")
            .set_json(serde_json::json!({ "folder": "trash", "removeStarOnTrash": false }))
            .to_request();
        let email: ApiEmail = test::call_and_read_body_json(&app, req).await;
        assert!(email.is_starred);
    }

    #[actix_web::test]
    async fn test_move_rejects_view_folder() {
        let app = app!();

        let req = test::TestRequest::put()
            .uri("/api/emails/1/move")
            .set_json(serde_json::json!({ "folder": "starred" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.error.contains("unknown variant `starred`"));
    }

    #[actix_web::test]
    async fn test_unknown_selector_is_400() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/threads?folder=outbox")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    /// Serve the seeded mailbox on an ephemeral port
    fn serve() -> String {
        let state = state();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(routes)
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[actix_web::test]
    async fn test_http_backend_drives_engine() {
        let backend = Arc::new(HttpBackend::new(&serve()).unwrap());

        let user = backend.fetch_user().await.unwrap();
        assert_eq!(user.email, "you@example.com");

        let mut engine = MutationEngine::new(backend.clone(), user.settings);
        assert_eq!(engine.refresh().await.unwrap(), 11);

        let view = ViewContext {
            folder: FolderSelector::Inbox,
            open_thread_id: None,
        };
        let outcome = engine.toggle_star("4", true, &view).await.unwrap().unwrap();
        assert!(outcome.email.is_starred);
        assert!(engine.store().get("4").unwrap().is_starred);

        let moved = engine
            .move_to_folder("1", Folder::Trash, true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.folder, Folder::Trash);
        assert!(!moved.is_starred);

        let trash = backend
            .fetch_emails_by_folder(FolderSelector::Trash)
            .await
            .unwrap();
        let ids: Vec<&str> = trash.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "11"]);
        assert_eq!(trash[0].from.initials, "BT");
    }

    #[actix_web::test]
    async fn test_http_backend_errors() {
        let url = serve();
        let backend = HttpBackend::new(&url).unwrap();

        match backend.set_starred("missing", true).await {
            Err(MailError::NotFound(id)) => assert_eq!(id, "missing"),
            other => panic!("Expected not found, got {:?}", other),
        }

        let response = reqwest::Client::new()
            .put(format!("{}/api/emails/1/move", url))
            .json(&serde_json::json!({ "folder": "starred" }))
            .send()
            .await
            .unwrap();
        match decode::<ApiEmail>(response, "1").await {
            Err(MailError::Remote { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("unknown variant `starred`"));
            }
            other => panic!("Expected remote error, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_star_and_read() {
        let app = app!();

        let req = test::TestRequest::put()
            .uri("/api/emails/4/star")
            .set_json(serde_json::json!({ "isStarred": true }))
            .to_request();
        let email: ApiEmail = test::call_and_read_body_json(&app, req).await;
        assert!(email.is_starred);

        let req = test::TestRequest::put()
            .uri("/api/emails/2/read")
            .set_json(serde_json::json!({ "isRead": true }))
            .to_request();
        let email: ApiEmail = test::call_and_read_body_json(&app, req).await;
        assert!(email.is_read);

        let req = test::TestRequest::get().uri("/api/emails/4").to_request();
        let email: ApiEmail = test::call_and_read_body_json(&app, req).await;
        assert!(email.is_starred);
    }

    #[actix_web::test]
    async fn test_threads_and_folders() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/threads").to_request();
        let body: ListThreadsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total_count, 7);
        assert_eq!(body.threads[1].id, "t2");
        assert_eq!(body.threads[1].email_ids, vec!["2", "3"]);
        assert_eq!(body.threads[1].participants, vec!["David Kim", "Lisa Wang"]);

        let req = test::TestRequest::get()
            .uri("/api/threads?folder=all&search=iphone")
            .to_request();
        let body: ListThreadsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.total_count, 1);
        assert_eq!(body.threads[0].id, "t8");

        let req = test::TestRequest::get().uri("/api/folders").to_request();
        let body: ListFoldersResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.folders.len(), 5);
        assert_eq!(body.folders[0].count, Some(7));
        assert_eq!(body.folders[2].name, "All Mail");
    }

    #[actix_web::test]
    async fn test_user_and_health() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/user").to_request();
        let user: ApiUser = test::call_and_read_body_json(&app, req).await;
        assert_eq!(user.email, "you@example.com");

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["emails"], 11);
    }
}
