//! End-to-end tests: `AuraApp` over real HTTP against a fake API.
//!
//! The fake server (axum on a random port) issues an HTTP-only refresh
//! cookie on login, checks bearer tokens, recomputes `banter_mode` on
//! profile changes, and reports predictions as pending.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aura::prelude::*;
use aura::protocol::{GenerateRequest, MatchId};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

// =========================================================================
// Fake API
// =========================================================================

#[derive(Default)]
struct Account {
    club: String,
    prediction: Option<Value>,
}

#[derive(Clone, Default)]
struct Fake {
    account: Arc<Mutex<Account>>,
}

impl Fake {
    fn user(&self) -> Value {
        let account = self.account.lock().unwrap();
        let banter = matches!(account.club.as_str(), "Tottenham Hotspur" | "Chelsea");
        json!({
            "id": 1,
            "email": "test@x.com",
            "favorite_club": account.club,
            "banter_mode": banter,
        })
    }
}

fn detail(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "detail": text }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer tok1" || v == "Bearer tok2")
}

async fn login(State(fake): State<Fake>, Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return detail(StatusCode::UNAUTHORIZED, "Invalid credentials.");
    }
    (
        [(header::SET_COOKIE, "refresh_token=r1; Path=/; HttpOnly")],
        Json(json!({ "access": "tok1", "user": fake.user() })),
    )
        .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == "taken@x.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "email": ["Email already registered."] })),
        )
            .into_response();
    }
    let user = json!({
        "id": 2,
        "email": body["email"],
        "favorite_club": body["favorite_club"],
        "banter_mode": false,
    });
    (
        StatusCode::CREATED,
        [(header::SET_COOKIE, "refresh_token=r2; Path=/; HttpOnly")],
        Json(json!({ "access": "tok9", "user": user })),
    )
        .into_response()
}

async fn refresh(headers: HeaderMap) -> Response {
    let has_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("refresh_token=r1"));
    if has_cookie {
        Json(json!({ "access": "tok2" })).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Missing refresh token.")
    }
}

async fn me(State(fake): State<Fake>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Authentication required.");
    }
    Json(fake.user()).into_response()
}

async fn patch_me(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Authentication required.");
    }
    if let Some(club) = body["favorite_club"].as_str() {
        fake.account.lock().unwrap().club = club.to_string();
    }
    Json(fake.user()).into_response()
}

async fn next_fixture() -> Response {
    Json(json!({
        "match_id": 42,
        "utcDate": "2030-05-04T16:30:00Z",
        "competition": "Premier League",
        "homeTeam": "Arsenal FC",
        "awayTeam": "Chelsea FC",
        "homeBadge": "https://crests.example/57.png",
        "awayBadge": "https://crests.example/61.png",
        "status": "TIMED",
        "arsenal_is_home": true,
        "opponent": "Chelsea FC",
        "stale": false,
    }))
    .into_response()
}

async fn latest(State(fake): State<Fake>) -> Response {
    let account = fake.account.lock().unwrap();
    Json(account.prediction.clone().unwrap_or_else(|| json!({}))).into_response()
}

async fn create_prediction(
    State(fake): State<Fake>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Authentication required.");
    }
    let record = json!({
        "id": 9,
        "match_id": body["match_id"],
        "opponent": body["opponent"],
        "arsenal_is_home": body["arsenal_is_home"],
        "kickoff": body["kickoff"],
        "predicted_home": body["predicted_home"],
        "predicted_away": body["predicted_away"],
        "locked": false,
        "checked_at": null,
        "actual_home": null,
        "actual_away": null,
        "points": 0,
        "created_at": "2030-05-01T09:00:00Z",
    });
    fake.account.lock().unwrap().prediction = Some(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn check(Path(id): Path<u64>) -> Response {
    if id != 9 {
        return detail(StatusCode::NOT_FOUND, "Not found.");
    }
    detail(StatusCode::BAD_REQUEST, "Match not finished yet.")
}

async fn generate(headers: HeaderMap, Query(q): Query<HashMap<String, String>>) -> Response {
    if !authorized(&headers) {
        return detail(StatusCode::UNAUTHORIZED, "Authentication required.");
    }
    let text = format!(
        "{}/{}/{}",
        q.get("mode").map_or("-", String::as_str),
        q.get("intensity").map_or("-", String::as_str),
        q.get("player").map_or("-", String::as_str),
    );
    Json(json!({ "text": text })).into_response()
}

async fn chat(Json(body): Json<Value>) -> Response {
    Json(json!({ "reply": format!("You said: {}", body["message"].as_str().unwrap_or("")) }))
        .into_response()
}

async fn start_server(club: &str) -> String {
    let fake = Fake::default();
    fake.account.lock().unwrap().club = club.to_string();

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/me", get(me).patch(patch_me))
        .route("/api/fixtures/next", get(next_fixture))
        .route("/api/predictions/latest", get(latest))
        .route("/api/predictions", post(create_prediction))
        .route("/api/predictions/{id}/check", post(check))
        .route("/api/generate", get(generate))
        .route("/api/chat", post(chat))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn app_for(base: &str) -> AuraApp<aura::transport::HttpBackend> {
    AuraApp::builder()
        .config(AuraConfig::default().with_api_base_url(base))
        .build()
        .expect("app should build")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_first_visit_bootstrap_signs_out_quietly() {
    let base = start_server("Arsenal").await;
    let app = app_for(&base);

    let session = app.start().await;

    assert_eq!(session, Session::SignedOut);
    assert_eq!(app.navigate("/"), RouteDecision::Redirect("/login".into()));
}

#[tokio::test]
async fn test_login_cookie_survives_into_bootstrap() {
    let base = start_server("Arsenal").await;
    let app = app_for(&base);
    app.start().await;

    app.auth().login("test@x.com", "secret").await.unwrap();
    assert_eq!(app.navigate("/predictor"), RouteDecision::Render("/predictor".into()));

    // A reload: the in-memory token is gone, the cookie is not.
    app.auth().logout();
    let session = app.start().await;

    assert_eq!(
        session.access_token().map(|t| t.as_str().to_string()),
        Some("tok2".to_string())
    );
    assert_eq!(session.current_user().map(|u| u.email.as_str()), Some("test@x.com"));
}

#[tokio::test]
async fn test_wrong_password_is_displayable() {
    let base = start_server("Arsenal").await;
    let app = app_for(&base);

    let err = app.auth().login("test@x.com", "nope").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials.");
    assert!(app.session().snapshot().is_loading());
}

#[tokio::test]
async fn test_register_then_login_separately() {
    let base = start_server("Arsenal").await;
    let app = app_for(&base);
    app.start().await;

    let user = app
        .auth()
        .register("new@x.com", "secret", "Arsenal")
        .await
        .unwrap();
    assert_eq!(user.email, "new@x.com");
    assert_eq!(app.session().snapshot(), Session::SignedOut);

    let err = app
        .auth()
        .register("taken@x.com", "secret", "Arsenal")
        .await
        .unwrap_err();
    assert!(err.is_duplicate_email());
}

#[tokio::test]
async fn test_banter_gate_round_trip() {
    let base = start_server("Chelsea").await;
    let app = app_for(&base);
    app.start().await;
    app.auth().login("test@x.com", "secret").await.unwrap();

    assert_eq!(app.navigate("/"), RouteDecision::Redirect("/banter".into()));
    assert_eq!(app.navigate("/banter"), RouteDecision::Render("/banter".into()));

    let user = app.leave_banter_gate().await.unwrap();

    assert!(!user.banter_mode);
    assert_eq!(app.navigate("/"), RouteDecision::Render("/".into()));
}

#[tokio::test]
async fn test_predictor_save_then_pending_over_http() {
    let base = start_server("Arsenal").await;
    let app = app_for(&base);
    app.start().await;
    app.auth().login("test@x.com", "secret").await.unwrap();
    let mut predictor = app.predictor();

    let state = predictor.load_context().await.unwrap();
    assert_eq!(
        state.fixture().map(|f| f.match_id.clone()),
        Some(MatchId::from(42))
    );
    assert!(state.prediction.is_none());

    let state = predictor.save_prediction(2, 1).await.unwrap();
    let saved = state.prediction.as_ref().unwrap();
    assert_eq!(saved.match_id, MatchId::from(42));
    assert_eq!(saved.scoreline(), Scoreline::new(2, 1));

    let first = predictor.check_result().await.unwrap().clone();
    let second = predictor.check_result().await.unwrap().clone();
    assert_eq!(
        first,
        CheckOutcome::Pending {
            message: "Match not finished yet.".into()
        }
    );
    assert_eq!(first, second);

    // A second predictor picks the saved scoreline up as its draft.
    let mut reloaded = app.predictor();
    let state = reloaded.load_context().await.unwrap();
    assert_eq!(state.draft, Scoreline::new(2, 1));
}

#[tokio::test]
async fn test_generator_and_chat_pass_through() {
    let base = start_server("Arsenal").await;
    let app = app_for(&base);
    app.start().await;
    app.auth().login("test@x.com", "secret").await.unwrap();

    let text = app
        .generate(&GenerateRequest {
            mode: "fact".into(),
            intensity: Intensity::Low,
            player: None,
        })
        .await
        .unwrap();
    let reply = app.chat("COYG").await.unwrap();

    assert_eq!(text, "fact/low/-");
    assert_eq!(reply, "You said: COYG");
}
