use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::db::models::LeadSummary;
use crate::error::VoltError;
use crate::middleware::RequireSession;
use crate::router::AppState;
use crate::service::simulation::{self, SavingsProjection};
use crate::types::LeadSubmission;

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub lead_id: i64,
    pub savings: SavingsProjection,
}

/// POST /api/simulation -> validates and stores a lead, returning the
/// projected savings for the quoted monthly bill.
pub async fn submit_simulation(
    State(state): State<AppState>,
    Json(sub): Json<LeadSubmission>,
) -> Result<impl IntoResponse, VoltError> {
    sub.validate()?;

    let lead_id = state.storage.insert_lead(&sub).await?;
    let savings = simulation::project(sub.consumption.monthly_bill);

    info!(lead_id, city = %sub.consumption.city, "simulation lead captured");
    Ok((
        StatusCode::CREATED,
        Json(SimulationResponse {
            success: true,
            lead_id,
            savings,
        }),
    ))
}

/// GET /api/admin/leads -> all captured leads, newest first.
pub async fn list_leads(
    State(state): State<AppState>,
    RequireSession(_claims): RequireSession,
) -> Result<Json<Vec<LeadSummary>>, VoltError> {
    Ok(Json(state.storage.list_leads().await?))
}

/// DELETE /api/admin/leads/{id}
pub async fn delete_lead(
    State(state): State<AppState>,
    RequireSession(_claims): RequireSession,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, VoltError> {
    remove_lead(&state, id).await
}

#[derive(Debug, Deserialize)]
pub struct DeleteLeadRequest {
    pub id: i64,
}

/// DELETE /api/admin/leads with `{"id": N}` body. Same semantics as the
/// path form; both are part of the public surface.
pub async fn delete_lead_by_body(
    State(state): State<AppState>,
    RequireSession(_claims): RequireSession,
    Json(req): Json<DeleteLeadRequest>,
) -> Result<impl IntoResponse, VoltError> {
    remove_lead(&state, req.id).await
}

async fn remove_lead(state: &AppState, id: i64) -> Result<Json<serde_json::Value>, VoltError> {
    if !state.storage.delete_lead(id).await? {
        return Err(VoltError::LeadNotFound(id));
    }
    info!(lead_id = id, "lead deleted");
    Ok(Json(json!({ "success": true })))
}
