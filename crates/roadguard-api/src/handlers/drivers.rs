//! Driver listing and detail endpoints

use axum::extract::State;
use chrono::Utc;
use roadguard_core::messages;
use roadguard_core::services::{DriverDetail, DriverOverview};
use serde::Serialize;

use crate::error::ApiError;
use crate::extract::IdQuery;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DriversResponse {
    pub drivers: Vec<DriverOverview>,
}

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub driver: DriverDetail,
}

/// GET /backend/get_drivers
pub async fn get_drivers(
    State(state): State<AppState>,
) -> Result<ApiResponse<DriversResponse>, ApiError> {
    let drivers = state
        .drivers
        .list_drivers(Utc::now())
        .await
        .map_err(|e| ApiError::from_domain(e, messages::CTX_LIST_DRIVERS))?;

    Ok(ApiResponse::success(DriversResponse { drivers }))
}

/// GET /backend/get_driver?id=N
pub async fn get_driver(
    State(state): State<AppState>,
    query: IdQuery,
) -> Result<ApiResponse<DriverResponse>, ApiError> {
    let id = required_id(&query)?;
    let driver = state
        .drivers
        .get_driver(id)
        .await
        .map_err(|e| ApiError::from_domain(e, messages::CTX_GET_DRIVER))?;

    Ok(ApiResponse::success(DriverResponse { driver }))
}

pub(crate) fn required_id(query: &IdQuery) -> Result<i32, ApiError> {
    query
        .driver_id()
        .ok_or_else(|| ApiError::Validation(messages::DRIVER_ID_MISSING.to_string()))
}
