use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use cinearr::config::Config;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    // In-memory SQLite is per-connection; a single pooled connection keeps
    // every request on the same database.
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.server.secure_cookies = false;

    let state = cinearr::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    cinearr::api::router(state).await
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should carry a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn signup(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            &json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

#[tokio::test]
async fn test_signup_and_login_flow() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            &json!({ "username": "alice", "password": "secret1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["avatar_url"], "/static/images/default-pic.png");

    // signup established a session
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "alice");

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            &json!({ "username": "alice", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials.");

    // an unknown username answers exactly like a wrong password
    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            &json!({ "username": "nobody", "password": "secret1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials.");

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            &json!({ "username": "alice", "password": "secret1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_username_conflict() {
    let app = spawn_app().await;

    signup(&app, "alice", "secret1").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            &json!({ "username": "alice", "password": "another1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Username is taken, please choose a new username"
    );
}

#[tokio::test]
async fn test_short_password_rejected() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/signup",
            &json!({ "username": "alice", "password": "short" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = spawn_app().await;

    for uri in ["/me", "/watchlist-tv/1", "/watchlist-movie/1"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {uri}");
    }

    for uri in ["/watchlist/add/42", "/completed/add/42", "/delete/42"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "POST {uri}");
    }
}

#[tokio::test]
async fn test_add_and_delete_flow() {
    let app = spawn_app().await;
    let cookie = signup(&app, "bob", "secret1").await;

    let post = |uri: &str| {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(post("/watchlist/add/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["list"], "saved");
    assert_eq!(body["data"]["already_present"], false);

    // adding the same id again is a soft no-op
    let response = app.clone().oneshot(post("/watchlist/add/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["already_present"], true);

    let response = app.clone().oneshot(post("/completed/add/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["list"], "finished");
    assert_eq!(body["data"]["already_present"], false);

    // the id sits in both lists; the finished entry goes first
    let response = app.clone().oneshot(post("/delete/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["removed_from"], "finished");

    let response = app.clone().oneshot(post("/delete/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["removed_from"], "saved");

    let response = app.clone().oneshot(post("/delete/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = spawn_app().await;
    let cookie = signup(&app, "carol", "secret1").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/search/multi/?query=")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
