// HTTP request handlers
use crate::domain::chart::ChartSpec;
use crate::domain::period::{PeriodSelection, resolve};
use crate::infrastructure::board::BoardSnapshot;
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct PeriodRequest {
    /// Name of the checked period control, absent when none is checked
    pub selected: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub enabled: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderStarted {
    pub period: &'static str,
    pub generation: u64,
}

#[derive(Debug, Serialize)]
pub struct DetailsShown {
    pub metric: String,
    pub text: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Everything currently drawn
pub async fn board(State(state): State<Arc<AppState>>) -> Json<BoardSnapshot> {
    Json(state.board.snapshot())
}

pub async fn chart(
    Path(canvas): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChartSpec>> {
    state
        .board
        .chart(&canvas)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("nothing drawn on {}", canvas)))
}

/// Period control changed: redraw every enabled chart for the new window
pub async fn set_period(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PeriodRequest>,
) -> ApiResult<(StatusCode, Json<RenderStarted>)> {
    let period = PeriodSelection::from_control(request.selected.as_deref(), request.from, request.to)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state.set_period(period);
    let generation = state.refresh_charts();

    Ok((
        StatusCode::ACCEPTED,
        Json(RenderStarted {
            period: period.label(),
            generation,
        }),
    ))
}

/// Checkboxes changed: redraw, and store the full visibility map for the session
pub async fn set_visibility(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VisibilityRequest>,
) -> ApiResult<(StatusCode, Json<RenderStarted>)> {
    let checked: HashSet<String> = request.enabled.into_iter().collect();
    for unknown in checked.iter().filter(|id| !state.catalogue.is_known(id)) {
        tracing::warn!("Ignoring unknown metric {} in visibility update", unknown);
    }

    state.set_checked(checked.clone());
    let generation = state.refresh_charts();
    if let Err(e) = state.visibility.push(&checked).await {
        tracing::error!("Failed to store visibility for the session: {:#}", e);
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(RenderStarted {
            period: state.controls().period.label(),
            generation,
        }),
    ))
}

/// Current value widget clicked: show the statistics overlay
pub async fn show_details(
    Path(metric): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DetailsShown>> {
    if state.catalogue.metric(&metric).is_none() {
        return Err(ApiError::NotFound(format!("unknown metric {}", metric)));
    }

    let period = resolve(&state.controls().period);
    let text = state.details.show(&metric, &period).await?;

    Ok(Json(DetailsShown { metric, text }))
}
