//! API handlers for the cake booking REST endpoints

pub mod cakes;
pub mod health;
pub mod openapi;
pub mod orders;
pub mod timeslots;

use axum::extract::FromRequest;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Body of endpoints that only report success
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// JSON body extractor whose rejections render as `{success:false,error}`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Parse a numeric path ID, rejecting anything else as a validation error
pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Invalid ID".to_string()))
}
