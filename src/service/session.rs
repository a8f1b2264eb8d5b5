use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::LeadStorage;
use crate::error::VoltError;

/// Payload of the `token` session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs a session token for the given user, valid for `ttl_hours`.
pub fn issue_token(
    secret: &str,
    user_id: i64,
    email: &str,
    ttl_hours: i64,
) -> Result<String, VoltError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now,
        exp: now + ttl_hours * 3600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies signature and expiry, returning the decoded claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, VoltError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

pub fn hash_password(plain: &str) -> Result<String, VoltError> {
    Ok(bcrypt::hash(plain, bcrypt::DEFAULT_COST)?)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, VoltError> {
    Ok(bcrypt::verify(plain, hash)?)
}

/// Upserts the admin account used by the panel. Called at startup when
/// `ADMIN_EMAIL` / `ADMIN_PASSWORD` are configured.
pub async fn seed_admin(
    storage: &LeadStorage,
    email: &str,
    password: &str,
) -> Result<(), VoltError> {
    let hash = hash_password(password)?;
    storage.upsert_user(email, &hash).await?;
    info!(email = %email, "admin user seeded");
    Ok(())
}
