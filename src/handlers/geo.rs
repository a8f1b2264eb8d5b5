use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::{GeoCity, GeoState};
use crate::error::VoltError;
use crate::router::AppState;
use crate::types::lead::is_valid_uf;

/// GET /api/geo/states -> proxied IBGE state list for the form picker.
pub async fn list_states(State(state): State<AppState>) -> Result<Json<Vec<GeoState>>, VoltError> {
    Ok(Json(state.geo.states().await?))
}

/// GET /api/geo/states/{uf}/cities -> proxied municipality list.
pub async fn list_cities(
    State(state): State<AppState>,
    Path(uf): Path<String>,
) -> Result<Json<Vec<GeoCity>>, VoltError> {
    if !is_valid_uf(&uf) {
        return Err(VoltError::Validation(
            "state must be a 2-letter UF code".to_string(),
        ));
    }
    let uf = uf.to_ascii_uppercase();
    Ok(Json(state.geo.cities(&uf).await?))
}
