use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use crate::error::VoltError;
use crate::router::AppState;
use crate::service::session::{self, Claims};

/// Name of the session cookie issued at login.
pub const SESSION_COOKIE: &str = "token";

/// Ensure the inbound request carries a valid session.
/// The JWT travels in the `token` cookie; signature and expiry are
/// checked against the configured secret.
#[derive(Debug, Clone)]
pub struct RequireSession(pub Claims);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Err(VoltError::MissingToken.into_response());
        };
        let claims = session::verify_token(&state.jwt_secret, cookie.value())
            .map_err(IntoResponse::into_response)?;
        Ok(Self(claims))
    }
}
