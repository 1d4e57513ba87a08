//! Driver alert endpoints

use axum::extract::State;
use chrono::Utc;
use roadguard_core::domain::Alert;
use roadguard_core::messages;
use roadguard_core::services::DriverReport;
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::IdQuery;
use crate::handlers::drivers::required_id;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
}

/// GET /backend/get_driver_alerts?id=N
pub async fn get_driver_alerts(
    State(state): State<AppState>,
    query: IdQuery,
) -> Result<ApiResponse<AlertsResponse>, ApiError> {
    let id = required_id(&query)?;
    let alerts = state
        .alerts
        .driver_alerts(id)
        .await
        .map_err(|e| ApiError::from_domain(e, messages::CTX_GET_ALERTS))?;

    Ok(ApiResponse::success(AlertsResponse { alerts }))
}

/// GET /backend/get_driver_report?id=N
pub async fn get_driver_report(
    State(state): State<AppState>,
    query: IdQuery,
) -> Result<ApiResponse<DriverReport>, ApiError> {
    let id = required_id(&query)?;
    let report = state
        .alerts
        .driver_report(id, Utc::now())
        .await
        .map_err(|e| ApiError::from_domain(e, messages::CTX_GET_ALERTS))?;

    Ok(ApiResponse::success(report))
}
