pub mod auth;

pub use auth::{RequireSession, SESSION_COOKIE};
