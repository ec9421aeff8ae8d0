use std::sync::Arc;

use axum::{
    Router,
    extract::Extension,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{delete, get, patch, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;
use crate::routes::{catalog, in_times, schedule, sessions, teams};
use crate::services::{session_store::SessionStore, websocket::websocket_handler};

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    // tower-http refuses a wildcard inside an origin list.
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE]);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
}

pub fn build_router(store: SessionStore, config: Arc<ServerConfig>) -> Router {
    Router::new()
        .route("/health", get(catalog::health))
        .route("/catalog", get(catalog::get_catalog))
        .route("/schedule", post(schedule::format_form))
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{id}", get(sessions::get_session).delete(sessions::delete_session))
        .route("/sessions/{id}/date", put(sessions::set_date))
        .route("/sessions/{id}/teams", post(teams::add_team))
        .route("/sessions/{id}/teams/last", delete(teams::remove_last_team))
        .route("/sessions/{id}/teams/{index}", patch(teams::edit_team))
        .route("/sessions/{id}/in-times", post(in_times::add_in_time))
        .route("/sessions/{id}/in-times/last", delete(in_times::remove_last_in_time))
        .route("/sessions/{id}/in-times/{index}", patch(in_times::edit_in_time))
        .route("/sessions/{id}/schedule", post(schedule::generate_schedule))
        .route("/sessions/{id}/schedule/download", get(schedule::download_schedule))
        .route("/sessions/{id}/ws", get(websocket_handler))
        .layer(Extension(store))
        .layer(Extension(config.clone()))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn app_with(initial_teams: usize, initial_in_times: usize) -> Router {
        let config = ServerConfig {
            initial_teams,
            initial_in_times,
            ..ServerConfig::default()
        };
        build_router(SessionStore::new(), Arc::new(config))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn open_session(app: &Router) -> String {
        let response = send(app, "POST", "/sessions", Some(json!({ "date": "2024-07-04" }))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn new_session_uses_configured_counts() {
        let app = app_with(2, 3);
        let response = send(&app, "POST", "/sessions", Some(json!({ "date": "2024-07-04" }))).await;
        let json = body_json(response).await;

        assert_eq!(json["form"]["date"], "2024-07-04");
        assert_eq!(json["form"]["teams"].as_array().unwrap().len(), 2);
        assert_eq!(json["form"]["in_times"].as_array().unwrap().len(), 3);
        assert_eq!(json["form"]["in_times"][0]["time"], "00:00");
    }

    #[tokio::test]
    async fn session_without_date_starts_today() {
        let app = app_with(1, 1);
        let response = send(&app, "POST", "/sessions", Some(json!({}))).await;
        let json = body_json(response).await;

        let today = chrono::Local::now().date_naive().to_string();
        assert_eq!(json["form"]["date"], today);
    }

    #[tokio::test]
    async fn removing_the_only_team_is_a_no_op() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let response = send(&app, "DELETE", &format!("/sessions/{id}/teams/last"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "len": 1, "removed": false }));

        let response = send(&app, "POST", &format!("/sessions/{id}/teams"), None).await;
        assert_eq!(body_json(response).await, json!({ "len": 2 }));

        let response = send(&app, "DELETE", &format!("/sessions/{id}/teams/last"), None).await;
        assert_eq!(body_json(response).await, json!({ "len": 1, "removed": true }));
    }

    #[tokio::test]
    async fn in_times_grow_and_shrink_from_the_tail() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        send(&app, "POST", &format!("/sessions/{id}/in-times"), None).await;
        let response = send(
            &app,
            "PATCH",
            &format!("/sessions/{id}/in-times/1"),
            Some(json!({ "time": "13:05", "members": ["Yeni"] })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "time": "13:05", "members": ["Yeni"] }));

        let response = send(&app, "DELETE", &format!("/sessions/{id}/in-times/last"), None).await;
        assert_eq!(body_json(response).await, json!({ "len": 1, "removed": true }));
        let response = send(&app, "DELETE", &format!("/sessions/{id}/in-times/last"), None).await;
        assert_eq!(body_json(response).await, json!({ "len": 1, "removed": false }));
    }

    #[tokio::test]
    async fn generated_schedule_reflects_edits() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        send(
            &app,
            "PATCH",
            &format!("/sessions/{id}/in-times/0"),
            Some(json!({ "time": "09:00", "members": ["Lulu"] })),
        )
        .await;
        let response = send(
            &app,
            "PATCH",
            &format!("/sessions/{id}/teams/0"),
            Some(json!({
                "roles": ["Project Manager"],
                "trucks": ["50"],
                "leave_by": "07:30",
                "materials": [
                    { "material": "Tape (Pack)", "quantity": 3 },
                    { "material": "2 PC Mirror" }
                ]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "POST", &format!("/sessions/{id}/schedule"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;

        assert!(text.starts_with("July 4\n\nHi everyone!\n"));
        assert!(text.contains("9:00 AM Lulu"));
        assert!(text.contains("Role: Project Manager\n"));
        assert!(text.contains("Trucks & Trailers: 50\n"));
        assert!(text.contains("🚨 Leave by 7:30 AM 🚨"));
        assert!(text.contains("Materials:\n3 x Tape (Pack)\n1 x 2 PC Mirror\n"));
        assert!(text.contains("Point of Contact: N/A"));
        assert!(text.contains("Notes: N/A"));
    }

    #[tokio::test]
    async fn download_is_a_text_attachment() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let response = send(&app, "GET", &format!("/sessions/{id}/schedule/download"), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
        assert_eq!(
            headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
            "attachment; filename=\"move_schedule.txt\""
        );
        assert!(body_text(response).await.ends_with("everyone is in the truck."));
    }

    #[tokio::test]
    async fn unknown_person_is_rejected_and_form_kept() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let response = send(
            &app,
            "PATCH",
            &format!("/sessions/{id}/teams/0"),
            Some(json!({ "client": "Rivera", "members": ["Nobody"] })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "GET", &format!("/sessions/{id}"), None).await;
        let json = body_json(response).await;
        assert_eq!(json["teams"][0]["client"], "");
        assert_eq!(json["teams"][0]["members"], json!([]));
    }

    #[tokio::test]
    async fn missing_session_and_team_are_not_found() {
        let app = app_with(1, 1);
        let response = send(&app, "POST", "/sessions/nope/schedule", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let id = open_session(&app).await;
        let response = send(&app, "PATCH", &format!("/sessions/{id}/teams/7"), Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ended_session_is_discarded() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let response = send(&app, "DELETE", &format!("/sessions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, "GET", &format!("/sessions/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn date_change_shows_in_schedule() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let response = send(
            &app,
            "PUT",
            &format!("/sessions/{id}/date"),
            Some(json!({ "date": "2025-12-01" })),
        )
        .await;
        assert_eq!(body_json(response).await, json!({ "date": "2025-12-01" }));

        let response = send(&app, "POST", &format!("/sessions/{id}/schedule"), None).await;
        assert!(body_text(response).await.starts_with("December 1\n"));
    }

    #[tokio::test]
    async fn stateless_formatting_matches_the_session_output() {
        let app = app_with(1, 1);
        let form = json!({
            "date": "2024-07-04",
            "in_times": [{ "time": "09:00", "members": ["Lulu"] }],
            "teams": [{}, { "contact": "555-0100", "notes": "Stairs" }]
        });

        let response = send(&app, "POST", "/schedule", Some(form)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = body_text(response).await;

        assert_eq!(text.matches("—————————\n").count(), 2);
        assert!(text.contains("Team 2:\n"));
        assert!(text.contains("Point of Contact: 555-0100\n"));
        assert!(text.contains("Notes: Stairs\n"));
    }

    #[tokio::test]
    async fn stateless_formatting_rejects_empty_team_list() {
        let app = app_with(1, 1);
        let form = json!({ "date": "2024-07-04", "in_times": [{}], "teams": [] });

        let response = send(&app, "POST", "/schedule", Some(form)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_lists_reference_options() {
        let app = app_with(1, 1);
        let json = body_json(send(&app, "GET", "/catalog", None).await).await;

        assert_eq!(json["people"].as_array().unwrap().len(), 11);
        assert_eq!(json["materials"].as_array().unwrap().len(), 18);
        assert_eq!(json["trucks"].as_array().unwrap().len(), 15);
        assert_eq!(json["roles"], json!(["Project Manager", "Client Manager"]));
    }

    #[tokio::test]
    async fn huge_index_is_not_found_with_logging_on() {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let uri = format!("/sessions/{id}/teams/{}", usize::MAX);
        let response = send(&app, "PATCH", &uri, Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let uri = format!("/sessions/{id}/in-times/{}", usize::MAX);
        let response = send(&app, "PATCH", &uri, Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn repeated_picks_are_rejected_and_not_printed() {
        let app = app_with(1, 1);
        let id = open_session(&app).await;

        let response = send(
            &app,
            "PATCH",
            &format!("/sessions/{id}/teams/0"),
            Some(json!({
                "members": ["Lulu", "Lulu"],
                "trucks": ["50", "50"],
                "roles": ["Project Manager", "Project Manager"]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "POST", &format!("/sessions/{id}/schedule"), None).await;
        let text = body_text(response).await;
        assert!(text.contains("Role: \n"));
        assert!(text.contains("Team Members: \n"));
        assert!(text.contains("Trucks & Trailers: \n"));
    }

    #[tokio::test]
    async fn session_can_be_opened_without_a_body() {
        let app = app_with(1, 1);
        let response = send(&app, "POST", "/sessions", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["form"]["date"], chrono::Local::now().date_naive().to_string());
        assert!(json["id"].is_string());
    }

    #[tokio::test]
    async fn wildcard_cors_origin_allows_any() {
        let config = ServerConfig {
            cors_origins: vec!["*".to_string()],
            ..ServerConfig::default()
        };
        let app = build_router(SessionStore::new(), Arc::new(config));

        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN].to_str().unwrap(), "*");
    }
}
