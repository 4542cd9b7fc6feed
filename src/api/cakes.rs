//! Cake catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::cake::Cake};

use super::parse_id;

#[derive(Serialize, ToSchema)]
pub struct CakesResponse {
    pub success: bool,
    pub cakes: Vec<Cake>,
}

#[derive(Serialize, ToSchema)]
pub struct CakeResponse {
    pub success: bool,
    pub cake: Cake,
}

/// List the cake catalog
#[utoipa::path(
    get,
    path = "/cake",
    tag = "cakes",
    responses(
        (status = 200, description = "Cakes with their sizes", body = CakesResponse)
    )
)]
pub async fn list_cakes(State(state): State<crate::AppState>) -> AppResult<Json<CakesResponse>> {
    let cakes = state.services.cakes.list().await?;
    Ok(Json(CakesResponse {
        success: true,
        cakes,
    }))
}

/// Get one cake
#[utoipa::path(
    get,
    path = "/cake/{id}",
    tag = "cakes",
    params(("id" = i32, Path, description = "Cake ID")),
    responses(
        (status = 200, description = "Cake with its sizes", body = CakeResponse),
        (status = 400, description = "Invalid ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Cake not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_cake(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CakeResponse>> {
    let cake = state.services.cakes.get_by_id(parse_id(&id)?).await?;
    Ok(Json(CakeResponse {
        success: true,
        cake,
    }))
}
