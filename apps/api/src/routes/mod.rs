pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::handlers;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let avatar_limit = DefaultBodyLimit::max(state.config.avatar_max_bytes);

    Router::new()
        .route("/", get(handlers::handle_editor_page))
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/cv", get(handlers::handle_get_cv))
        .route("/api/v1/cv/personal", put(handlers::handle_set_personal))
        .route("/api/v1/cv/objective", put(handlers::handle_set_objective))
        .route(
            "/api/v1/cv/sections/:section",
            post(handlers::handle_add_item),
        )
        .route(
            "/api/v1/cv/sections/:section/:index",
            delete(handlers::handle_remove_item).patch(handlers::handle_update_item),
        )
        .route(
            "/api/v1/avatar",
            post(handlers::handle_upload_avatar)
                .delete(handlers::handle_remove_avatar)
                .layer(avatar_limit),
        )
        // Presentation
        .route("/api/v1/template", put(handlers::handle_select_template))
        .route("/api/v1/color", put(handlers::handle_set_color))
        .route("/api/v1/color/reset", post(handlers::handle_reset_color))
        .route("/api/v1/preview", get(handlers::handle_preview))
        // Export & reset
        .route("/api/v1/export", post(export::handle_export))
        .route("/api/v1/export/status", get(export::handle_export_status))
        .route("/api/v1/export/:job_id", get(export::handle_export_artifact))
        .route("/api/v1/clear", post(handlers::handle_clear))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::export::{PrintHost, PrintJob};
    use crate::storage::MemoryStore;

    struct NullHost;

    #[async_trait]
    impl PrintHost for NullHost {
        async fn print(&self, job: &PrintJob) -> anyhow::Result<PathBuf> {
            Ok(PathBuf::from(format!("{}.html", job.title)))
        }
    }

    fn app() -> (Router, AppState) {
        let state = AppState::new(
            Config::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(NullHost),
        );
        (build_router(state.clone()), state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart(file_name: &str, content_type: &str, data: &str) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n--{boundary}--\r\n"
        );
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/avatar")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "cv-builder");
    }

    #[tokio::test]
    async fn test_editor_page_served() {
        let (app, _) = app();
        let response = send(&app, Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8_lossy(&bytes);
        assert!(page.contains("/api/v1/preview"));
        assert!(page.contains("`/api/v1/export/${receipt.job_id}`"));
        assert!(page.contains("field === 'endDate') input.disabled = !!item.current"));
        assert!(page.contains("function applyMobileScale()"));
        assert!(page.contains("(window.innerWidth - 32) / 794"));
    }

    #[tokio::test]
    async fn test_get_cv_returns_default_workspace() {
        let (app, _) = app();
        let body = json_body(send(&app, Method::GET, "/api/v1/cv", None).await).await;
        assert_eq!(body["template"], 1);
        assert_eq!(body["accent"], "#2c3e50");
        assert_eq!(body["colors"]["4"], "#6c63ff");
        assert_eq!(body["document"]["skills"][0]["level"], "Tốt");
        assert_eq!(body["document"]["research"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_personal_edit_is_visible_in_workspace() {
        let (app, _) = app();
        let response = send(
            &app,
            Method::PUT,
            "/api/v1/cv/personal",
            Some(json!({"field": "name", "value": "Lê Minh"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let body = json_body(send(&app, Method::GET, "/api/v1/cv", None).await).await;
        assert_eq!(body["document"]["personal"]["name"], "Lê Minh");
    }

    #[tokio::test]
    async fn test_sections_add_update_remove() {
        let (app, state) = app();
        let added = send(&app, Method::POST, "/api/v1/cv/sections/experience", None).await;
        assert_eq!(added.status(), StatusCode::CREATED);
        assert_eq!(json_body(added).await["index"], 1);

        let updated = send(
            &app,
            Method::PATCH,
            "/api/v1/cv/sections/experience/1",
            Some(json!({"field": "current", "value": true})),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::NO_CONTENT);
        assert!(state.editor.lock().await.workspace().document.experience[1].current);

        let removed = send(&app, Method::DELETE, "/api/v1/cv/sections/experience/0", None).await;
        let body = json_body(removed).await;
        assert_eq!(body["outcome"], "removed");
        assert_eq!(body["len"], 1);

        let floor = send(&app, Method::DELETE, "/api/v1/cv/sections/experience/0", None).await;
        assert_eq!(json_body(floor).await["outcome"], "at_floor");
    }

    #[tokio::test]
    async fn test_item_errors() {
        let (app, _) = app();
        let missing = send(
            &app,
            Method::PATCH,
            "/api/v1/cv/sections/skills/9",
            Some(json!({"field": "name", "value": "Rust"})),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(missing).await["error"]["code"], "NOT_FOUND");

        let unknown = send(
            &app,
            Method::PATCH,
            "/api/v1/cv/sections/skills/0",
            Some(json!({"field": "color", "value": "red"})),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let bad_section = send(&app, Method::POST, "/api/v1/cv/sections/hobbies", None).await;
        assert_eq!(bad_section.status(), StatusCode::BAD_REQUEST);

        let out_of_range = send(&app, Method::DELETE, "/api/v1/cv/sections/skills/5", None).await;
        assert_eq!(out_of_range.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_template_and_color_flow() {
        let (app, state) = app();
        let body = json_body(
            send(&app, Method::PUT, "/api/v1/template", Some(json!({"template_id": 3}))).await,
        )
        .await;
        assert_eq!(body["template"], 3);
        assert_eq!(body["accent"], "#34495e");
        assert_eq!(state.preview.borrow().template.id(), 3);

        let body = json_body(
            send(
                &app,
                Method::PUT,
                "/api/v1/color",
                Some(json!({"color": "#FF8800", "immediate": true})),
            )
            .await,
        )
        .await;
        assert_eq!(body["accent"], "#ff8800");
        assert_eq!(body["colors"]["3"], "#ff8800");
        assert!(state.preview.borrow().html.contains("--cv-color:#ff8800"));

        let bad = send(&app, Method::PUT, "/api/v1/color", Some(json!({"color": "orange"}))).await;
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let body = json_body(send(&app, Method::POST, "/api/v1/color/reset", None).await).await;
        assert_eq!(body["accent"], "#34495e");

        let body = json_body(
            send(&app, Method::PUT, "/api/v1/template", Some(json!({"template_id": 42}))).await,
        )
        .await;
        assert_eq!(body["template"], 1);
    }

    #[tokio::test]
    async fn test_preview_is_html() {
        let (app, _) = app();
        let response = send(&app, Method::GET, "/api/v1/preview", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Họ và Tên"));
    }

    #[tokio::test]
    async fn test_avatar_upload_and_removal() {
        let (app, state) = app();
        let response = app
            .clone()
            .oneshot(multipart("me.png", "image/png", "abc"))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["outcome"], "applied");
        assert_eq!(
            state.editor.lock().await.workspace().document.personal.avatar,
            "data:image/png;base64,YWJj"
        );

        let response = app
            .clone()
            .oneshot(multipart("notes.txt", "text/plain", "hi"))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["outcome"], "ignored");

        let removed = send(&app, Method::DELETE, "/api/v1/avatar", None).await;
        assert_eq!(removed.status(), StatusCode::NO_CONTENT);
        assert!(state
            .editor
            .lock()
            .await
            .workspace()
            .document
            .personal
            .avatar
            .is_empty());
    }

    #[tokio::test]
    async fn test_export_uses_name_in_title() {
        let (app, _) = app();
        send(
            &app,
            Method::PUT,
            "/api/v1/cv/personal",
            Some(json!({"field": "name", "value": "Phạm Thu Hà"})),
        )
        .await;
        let response = send(&app, Method::POST, "/api/v1/export", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], "CV-Phạm-Thu-Hà");
        assert_eq!(body["path"], "CV-Phạm-Thu-Hà.html");

        let status = json_body(send(&app, Method::GET, "/api/v1/export/status", None).await).await;
        assert_eq!(status["disabled"], false);
        assert_eq!(status["title"], "CV Builder");
    }

    #[tokio::test]
    async fn test_export_artifact_is_the_printable_page() {
        let (app, _) = app();
        send(
            &app,
            Method::PUT,
            "/api/v1/cv/personal",
            Some(json!({"field": "name", "value": "Lan"})),
        )
        .await;
        let receipt = json_body(send(&app, Method::POST, "/api/v1/export", None).await).await;
        let uri = format!("/api/v1/export/{}", receipt["job_id"].as_str().unwrap());

        let response = send(&app, Method::GET, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8_lossy(&bytes);
        assert!(page.contains("<title>CV-Lan</title>"));
        assert!(page.contains("window.print()"));
        assert!(page.contains("@page"));

        let unknown = send(
            &app,
            Method::GET,
            "/api/v1/export/00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_needs_confirmation() {
        let (app, state) = app();
        send(
            &app,
            Method::PUT,
            "/api/v1/cv/objective",
            Some(json!({"value": "Lead teams"})),
        )
        .await;

        let refused = send(&app, Method::POST, "/api/v1/clear", Some(json!({}))).await;
        assert_eq!(refused.status(), StatusCode::CONFLICT);
        assert_eq!(
            json_body(refused).await["error"]["code"],
            "CONFIRMATION_REQUIRED"
        );
        assert_eq!(
            state.editor.lock().await.workspace().document.objective,
            "Lead teams"
        );

        let cleared = send(&app, Method::POST, "/api/v1/clear", Some(json!({"confirm": true}))).await;
        assert_eq!(cleared.status(), StatusCode::OK);
        let body = json_body(cleared).await;
        assert_eq!(body["document"]["objective"], "");
        assert_eq!(body["template"], 1);
    }
}
