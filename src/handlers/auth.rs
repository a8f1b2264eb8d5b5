use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;
use time::Duration;
use tracing::info;

use crate::error::VoltError;
use crate::middleware::auth::SESSION_COOKIE;
use crate::router::AppState;
use crate::service::session;
use crate::types::lead::is_valid_email;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), VoltError> {
        let mut problems = Vec::new();
        if !is_valid_email(&self.email) {
            problems.push("email is not a valid address");
        }
        if self.password.is_empty() {
            problems.push("password must not be empty");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(VoltError::Validation(problems.join("; ")))
        }
    }
}

/// POST /api/auth/login -> verifies credentials, sets the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, VoltError> {
    req.validate()?;

    let Some(user) = state.storage.find_user_by_email(&req.email).await? else {
        return Err(VoltError::InvalidCredentials);
    };
    if !session::verify_password(&req.password, &user.password_hash)? {
        return Err(VoltError::InvalidCredentials);
    }

    let token = session::issue_token(
        &state.jwt_secret,
        user.id,
        &user.email,
        state.token_ttl_hours,
    )?;
    let cookie = session_cookie(token.clone(), state.token_ttl_hours, state.insecure_cookie);

    info!(user = %user.email, "admin session issued");
    Ok((jar.add(cookie), Json(json!({ "token": token }))))
}

/// POST /api/auth/logout -> clears the session cookie. No auth required.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(clear_cookie()),
        Json(json!({ "message": "logged out" })),
    )
}

fn session_cookie(token: String, ttl_hours: i64, insecure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), token))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(ttl_hours))
        .build()
}

fn clear_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
