//! Database init script endpoint

use axum::extract::State;
use roadguard_core::domain::StatementOutcome;
use roadguard_core::messages;
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub results: Vec<StatementOutcome>,
}

/// GET|POST /backend/execute-sql
pub async fn execute_sql(
    State(state): State<AppState>,
) -> Result<ApiResponse<ScriptResponse>, ApiError> {
    if !state.settings.allow_init_script {
        warn!("Init script requested while disabled");
        return Err(ApiError::Disabled(messages::SQL_SCRIPT_DISABLED.to_string()));
    }

    let results = state.bootstrap.run_script(state.init_script).await?;

    Ok(ApiResponse::success_with_message(
        ScriptResponse { results },
        messages::SQL_SCRIPT_EXECUTED,
    ))
}
