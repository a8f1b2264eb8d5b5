use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::GeoClient;
use crate::config::Config;
use crate::db::LeadStorage;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub storage: LeadStorage,
    pub geo: GeoClient,
    pub jwt_secret: Arc<str>,
    pub insecure_cookie: bool,
    pub token_ttl_hours: i64,
}

impl AppState {
    pub fn new(storage: LeadStorage, cfg: &Config) -> Self {
        Self {
            storage,
            geo: GeoClient::new(reqwest::Client::new(), cfg.geo_base_url.clone()),
            jwt_secret: Arc::from(cfg.jwt_secret.as_str()),
            insecure_cookie: cfg.insecure_cookie,
            token_ttl_hours: cfg.token_ttl_hours,
        }
    }
}

pub fn voltlead_router(state: AppState) -> Router {
    Router::new()
        .route("/api/simulation", post(handlers::leads::submit_simulation))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/admin/leads",
            get(handlers::leads::list_leads).delete(handlers::leads::delete_lead_by_body),
        )
        .route("/api/admin/leads/{id}", delete(handlers::leads::delete_lead))
        .route("/api/geo/states", get(handlers::geo::list_states))
        .route("/api/geo/states/{uf}/cities", get(handlers::geo::list_cities))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
