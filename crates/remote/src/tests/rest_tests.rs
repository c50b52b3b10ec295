use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{RemoteStore, RestStore, Settings};

#[derive(Clone, Default)]
struct ServerState {
    inserted: Arc<Mutex<Option<(HeaderMap, Value)>>>,
    list_request: Arc<Mutex<Option<(HeaderMap, Vec<(String, String)>)>>>,
    reject_user_check: Arc<Mutex<bool>>,
}

async fn handle_token(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "access_token": "session-token-1",
        "user": { "email": body["email"] }
    }))
}

async fn handle_signup(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "access_token": "signup-token-1",
        "user": { "email": body["email"] }
    }))
}

async fn handle_user_check(State(state): State<ServerState>) -> (StatusCode, Json<Value>) {
    if *state.reject_user_check.lock().await {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "expired"})))
    } else {
        (StatusCode::OK, Json(json!({"email": "ash@urex.admin"})))
    }
}

async fn handle_list(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Json<Value> {
    *state.list_request.lock().await = Some((headers, params));
    Json(json!([{
        "id": "7e4e3f7a-1111-4a8c-9d6c-2f65a1f0aa01",
        "full_name": "Lina",
        "last_name": "Haddad",
        "date_of_birth": "2004-05-11",
        "major": "CS",
        "department": "Informatics",
        "campus": "Main",
        "programming_knowledge": "Beginner",
        "programming_goals": "Build an app",
        "created_at": "2026-08-20T10:30:00Z"
    }]))
}

async fn handle_insert(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    *state.inserted.lock().await = Some((headers, body));
    StatusCode::CREATED
}

async fn spawn_backend() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/auth/v1/token", post(handle_token))
        .route("/auth/v1/signup", post(handle_signup))
        .route("/auth/v1/user", get(handle_user_check))
        .route("/auth/v1/logout", post(|| async { StatusCode::NO_CONTENT }))
        .route("/rest/v1/registrations", get(handle_list).post(handle_insert))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

fn store_for(url: &str) -> RestStore {
    RestStore::new(&Settings {
        api_url: url.to_string(),
        api_key: "anon-key".into(),
        admin_domain: "urex.admin".into(),
    })
}

#[tokio::test]
async fn sign_in_establishes_session_used_as_bearer() {
    let (url, state) = spawn_backend().await;
    let store = store_for(&url);

    let session = store.sign_in("ash@urex.admin", "Ash2004").await.expect("sign in");
    assert_eq!(session.access_token, "session-token-1");
    assert_eq!(session.email, "ash@urex.admin");

    store.list_registrations().await.expect("list");
    let (headers, _) = state.list_request.lock().await.clone().expect("list seen");
    assert_eq!(
        headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer session-token-1")
    );
    assert_eq!(
        headers.get("apikey").and_then(|v| v.to_str().ok()),
        Some("anon-key")
    );
}

#[tokio::test]
async fn list_requests_all_columns_newest_first() {
    let (url, state) = spawn_backend().await;
    let store = store_for(&url);

    let rows = store.list_registrations().await.expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].major, "CS");

    let (headers, params) = state.list_request.lock().await.clone().expect("list seen");
    assert!(params.contains(&("select".to_string(), "*".to_string())));
    assert!(params.contains(&("order".to_string(), "created_at.desc".to_string())));
    // anon bearer before any sign-in
    assert_eq!(
        headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer anon-key")
    );
}

#[tokio::test]
async fn insert_posts_draft_fields_with_minimal_return() {
    let (url, state) = spawn_backend().await;
    let store = store_for(&url);

    let draft = shared::domain::RegistrationDraft {
        full_name: "Lina".into(),
        last_name: "Haddad".into(),
        date_of_birth: "2004-05-11".into(),
        major: "CS".into(),
        department: "Informatics".into(),
        campus: "Main".into(),
        programming_knowledge: "None yet".into(),
        programming_goals: "Learn Rust".into(),
    };
    store.insert_registration(&draft).await.expect("insert");

    let (headers, body) = state.inserted.lock().await.clone().expect("insert seen");
    assert_eq!(
        headers.get("prefer").and_then(|v| v.to_str().ok()),
        Some("return=minimal")
    );
    assert_eq!(body["full_name"], "Lina");
    assert_eq!(body["programming_knowledge"], "None yet");
}

#[tokio::test]
async fn current_session_is_none_before_sign_in() {
    let (url, _state) = spawn_backend().await;
    let store = store_for(&url);
    assert_eq!(store.current_session().await.expect("check"), None);
}

#[tokio::test]
async fn rejected_token_clears_the_stored_session() {
    let (url, state) = spawn_backend().await;
    let store = store_for(&url);

    store.sign_in("ash@urex.admin", "Ash2004").await.expect("sign in");
    assert!(store.current_session().await.expect("check").is_some());

    *state.reject_user_check.lock().await = true;
    assert_eq!(store.current_session().await.expect("check"), None);
    // cleared locally, no further network round trip needed
    *state.reject_user_check.lock().await = false;
    assert_eq!(store.current_session().await.expect("check"), None);
}

#[tokio::test]
async fn sign_up_fallback_yields_a_session_too() {
    let (url, _state) = spawn_backend().await;
    let store = store_for(&url);

    let session = store.sign_up("new@urex.admin", "pw").await.expect("sign up");
    assert_eq!(session.access_token, "signup-token-1");
}

#[tokio::test]
async fn unreachable_backend_maps_to_network_error() {
    let store = store_for("http://127.0.0.1:1");
    let err = store.list_registrations().await.expect_err("should fail");
    assert!(matches!(err, shared::error::StoreError::Network(_)));
}
