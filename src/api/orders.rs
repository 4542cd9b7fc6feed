//! Order endpoints: storefront reservations, admin listing and monthly sales

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        order::{CreateOrder, Order, UpdateOrderStatus},
        sales::MonthlyReport,
    },
};

use super::{parse_id, ApiJson};

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub success: bool,
    /// One entry per month, oldest first
    pub months: Vec<MonthlyReport>,
}

/// Query parameters for the monthly summary
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    /// Restrict to one month (YYYY-MM)
    pub month: Option<String>,
}

/// Place a cake reservation
#[utoipa::path(
    post,
    path = "/reservar",
    tag = "orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid reservation", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateOrder>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let order = state.services.orders.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            success: true,
            order,
        }),
    ))
}

/// List all orders with their cakes
#[utoipa::path(
    get,
    path = "/list",
    tag = "orders",
    responses(
        (status = 200, description = "Orders", body = OrdersResponse)
    )
)]
pub async fn list_orders(State(state): State<crate::AppState>) -> AppResult<Json<OrdersResponse>> {
    let orders = state.services.orders.list().await?;
    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}

/// Get one order
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = OrderResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_order(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.services.orders.get_by_id(parse_id(&id)?).await?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// Change the status of an order
#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    tag = "orders",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_order_status(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    ApiJson(data): ApiJson<UpdateOrderStatus>,
) -> AppResult<Json<OrderResponse>> {
    let order = state
        .services
        .orders
        .update_status(parse_id(&id)?, data.status)
        .await?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// Monthly sales summaries
#[utoipa::path(
    get,
    path = "/orders/summary",
    tag = "orders",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Monthly summaries", body = SummaryResponse),
        (status = 400, description = "Invalid month", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<SummaryResponse>> {
    let months = state
        .services
        .sales
        .monthly_reports(query.month.as_deref())
        .await?;
    Ok(Json(SummaryResponse {
        success: true,
        months,
    }))
}
