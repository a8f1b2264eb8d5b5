use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

const JWT_SECRET: &str = "test-secret";
const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "hunter2";

async fn test_app(tag: &str) -> (Router, voltlead::db::LeadStorage, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "voltlead-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let storage = voltlead::db::LeadStorage::connect(&database_url)
        .await
        .expect("failed to open test database");

    voltlead::service::session::seed_admin(&storage, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("failed to seed admin");

    let mut cfg = voltlead::config::Config::default();
    cfg.jwt_secret = JWT_SECRET.to_string();
    cfg.insecure_cookie = true;

    let state = voltlead::router::AppState::new(storage.clone(), &cfg);
    (voltlead::router::voltlead_router(state), storage, temp_path)
}

async fn read_json(resp: axum::response::Response) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Logs in and returns the `token=...` cookie pair from Set-Cookie.
async fn login_cookie(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }).to_string(),
                ))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("login did not set a cookie")
        .to_str()
        .expect("cookie was not utf-8")
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = read_json(resp).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    set_cookie
        .split(';')
        .next()
        .expect("empty Set-Cookie")
        .to_string()
}

async fn get_leads(app: &Router, cookie: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri("/api/admin/leads");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let resp = app
        .clone()
        .oneshot(builder.body(Body::empty()).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    (status, read_json(resp).await)
}

async fn submit_lead(app: &Router, name: &str) -> i64 {
    let payload = json!({
        "name": name,
        "email": "maria@example.com",
        "phone": "11988887777",
        "cpf": "12345678901",
        "consumption": {
            "monthly_bill": 200.0,
            "city": "Campinas",
            "state": "SP",
            "supply_type": "Trifásico"
        }
    });
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/simulation")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    read_json(resp).await["lead_id"]
        .as_i64()
        .expect("lead_id missing")
}

#[tokio::test]
async fn admin_routes_reject_missing_and_garbage_tokens() {
    let (app, _storage, temp_path) = test_app("admin-401").await;

    let (status, body) = get_leads(&app, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));

    let (status, _body) = get_leads(&app, Some("token=not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn admin_routes_reject_expired_tokens() {
    let (app, _storage, temp_path) = test_app("admin-expired").await;

    // Issued two hours in the past, beyond the verifier's leeway.
    let stale = voltlead::service::session::issue_token(JWT_SECRET, 1, ADMIN_EMAIL, -2)
        .expect("failed to sign token");
    let cookie = format!("token={stale}");

    let (status, _body) = get_leads(&app, Some(&cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email_alike() {
    let (app, _storage, temp_path) = test_app("admin-badlogin").await;

    let mut bodies = Vec::new();
    for (email, password) in [(ADMIN_EMAIL, "wrong"), ("ghost@example.com", "wrong")] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({ "email": email, "password": password }).to_string(),
                    ))
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        bodies.push(read_json(resp).await);
    }
    // Unknown email must not be distinguishable from a wrong password.
    assert_eq!(bodies[0], bodies[1]);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn login_lists_and_deletes_leads() {
    let (app, storage, temp_path) = test_app("admin-crud").await;

    let first = submit_lead(&app, "First Lead").await;
    let second = submit_lead(&app, "Second Lead").await;

    let cookie = login_cookie(&app).await;

    let (status, body) = get_leads(&app, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("expected an array");
    assert_eq!(rows.len(), 2);
    // Newest first.
    assert_eq!(rows[0]["id"].as_i64(), Some(second));
    assert_eq!(rows[0]["name"], json!("Second Lead"));
    assert_eq!(rows[0]["city"], json!("Campinas"));
    assert_eq!(rows[0]["state"], json!("SP"));
    assert_eq!(rows[0]["bill_value"], json!(200.0));

    // Delete by path.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/leads/{first}"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["success"], json!(true));

    // Consumption rows cascade with the lead.
    let count = storage
        .count_consumption_for_lead(first)
        .await
        .expect("count failed");
    assert_eq!(count, 0);

    // Deleting again is a 404.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/leads/{first}"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Delete by body removes the remaining lead.
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/admin/leads")
                .header(header::COOKIE, &cookie)
                .header("content-type", "application/json")
                .body(Body::from(json!({ "id": second }).to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, body) = get_leads(&app, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("expected an array").is_empty());

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn delete_with_non_numeric_id_is_a_client_error() {
    let (app, _storage, temp_path) = test_app("admin-badid").await;
    let cookie = login_cookie(&app).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/admin/leads/abc")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (app, _storage, temp_path) = test_app("admin-logout").await;
    let cookie = login_cookie(&app).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout did not clear the cookie")
        .to_str()
        .expect("cookie was not utf-8");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));

    let _ = fs::remove_file(&temp_path);
}
