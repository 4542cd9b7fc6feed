//! Timeslot API endpoints (batch provisioning, time labels, days)

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::timeslot::{BatchTimeslots, CreateTimeLabel, Day, TimeLabel, Timeslot},
};

use super::{parse_id, ApiJson, MessageResponse};

#[derive(Serialize, ToSchema)]
pub struct BatchResponse {
    pub success: bool,
    pub message: String,
    /// Links created by this batch
    pub inserted: u64,
    /// Pairs already linked or referencing an unregistered time
    pub skipped: u64,
}

#[derive(Serialize, ToSchema)]
pub struct TimeslotsResponse {
    pub success: bool,
    pub timeslots: Vec<Timeslot>,
}

#[derive(Serialize, ToSchema)]
pub struct TimesResponse {
    pub success: bool,
    pub times: Vec<TimeLabel>,
}

#[derive(Serialize, ToSchema)]
pub struct TimeCreatedResponse {
    pub success: bool,
    pub id: i32,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct DaysResponse {
    pub success: bool,
    pub days: Vec<Day>,
}

// ---- Slots ----

/// Link every given date to every given time label
#[utoipa::path(
    post,
    path = "/timeslots/batch",
    tag = "timeslots",
    request_body = BatchTimeslots,
    responses(
        (status = 200, description = "Batch processed", body = BatchResponse),
        (status = 400, description = "Missing dates or times", body = crate::error::ErrorResponse),
        (status = 500, description = "Batch rolled back", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_batch(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<BatchTimeslots>,
) -> AppResult<Json<BatchResponse>> {
    let outcome = state.services.timeslots.provision(&data).await?;
    Ok(Json(BatchResponse {
        success: true,
        message: "Timeslot batch processed".to_string(),
        inserted: outcome.inserted,
        skipped: outcome.skipped,
    }))
}

/// List pickup slots ordered by date and time
#[utoipa::path(
    get,
    path = "/timeslots",
    tag = "timeslots",
    responses(
        (status = 200, description = "Pickup slots", body = TimeslotsResponse)
    )
)]
pub async fn list_timeslots(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TimeslotsResponse>> {
    let timeslots = state.services.timeslots.list_slots().await?;
    Ok(Json(TimeslotsResponse {
        success: true,
        timeslots,
    }))
}

/// Delete a pickup slot (the day and the time label are kept)
#[utoipa::path(
    delete,
    path = "/timeslots/{id}",
    tag = "timeslots",
    params(("id" = i32, Path, description = "Timeslot ID")),
    responses(
        (status = 200, description = "Timeslot deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Timeslot not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_timeslot(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.services.timeslots.delete_slot(id).await?;
    Ok(Json(MessageResponse::ok("Timeslot deleted")))
}

// ---- Time labels ----

/// List registered time labels
#[utoipa::path(
    get,
    path = "/timeslots/times",
    tag = "timeslots",
    responses(
        (status = 200, description = "Time labels", body = TimesResponse)
    )
)]
pub async fn list_times(State(state): State<crate::AppState>) -> AppResult<Json<TimesResponse>> {
    let times = state.services.timeslots.list_times().await?;
    Ok(Json(TimesResponse {
        success: true,
        times,
    }))
}

/// Register a time label
#[utoipa::path(
    post,
    path = "/timeslots/times",
    tag = "timeslots",
    request_body = CreateTimeLabel,
    responses(
        (status = 200, description = "Time registered", body = TimeCreatedResponse),
        (status = 400, description = "Missing or duplicate time", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_time(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateTimeLabel>,
) -> AppResult<Json<TimeCreatedResponse>> {
    let id = state
        .services
        .timeslots
        .create_time(data.time_value.as_deref())
        .await?;
    Ok(Json(TimeCreatedResponse {
        success: true,
        id,
        message: "Time registered".to_string(),
    }))
}

/// Delete a time label that no day uses
#[utoipa::path(
    delete,
    path = "/timeslots/times/{id}",
    tag = "timeslots",
    params(("id" = i32, Path, description = "Time label ID")),
    responses(
        (status = 200, description = "Time deleted", body = MessageResponse),
        (status = 400, description = "Invalid ID or time in use", body = crate::error::ErrorResponse),
        (status = 404, description = "Time not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_time(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.services.timeslots.delete_time(id).await?;
    Ok(Json(MessageResponse::ok("Time deleted")))
}

// ---- Days ----

/// List days known to provisioning
#[utoipa::path(
    get,
    path = "/timeslots/days",
    tag = "timeslots",
    responses(
        (status = 200, description = "Days", body = DaysResponse)
    )
)]
pub async fn list_days(State(state): State<crate::AppState>) -> AppResult<Json<DaysResponse>> {
    let days = state.services.timeslots.list_days().await?;
    Ok(Json(DaysResponse {
        success: true,
        days,
    }))
}
