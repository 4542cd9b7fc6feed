//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{cakes, health, orders, timeslots};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cake Booking API",
        version = "0.3.0",
        description = "Pickup slots, cake reservations and monthly sales summaries"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Timeslots
        timeslots::create_batch,
        timeslots::list_timeslots,
        timeslots::delete_timeslot,
        timeslots::list_times,
        timeslots::create_time,
        timeslots::delete_time,
        timeslots::list_days,
        // Cakes
        cakes::list_cakes,
        cakes::get_cake,
        // Orders
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::get_summary,
    ),
    components(
        schemas(
            // Timeslots
            crate::models::timeslot::Day,
            crate::models::timeslot::TimeLabel,
            crate::models::timeslot::CreateTimeLabel,
            crate::models::timeslot::Timeslot,
            crate::models::timeslot::BatchTimeslots,
            timeslots::BatchResponse,
            timeslots::TimeslotsResponse,
            timeslots::TimesResponse,
            timeslots::TimeCreatedResponse,
            timeslots::DaysResponse,
            // Cakes
            crate::models::cake::Cake,
            crate::models::cake::CakeSize,
            cakes::CakesResponse,
            cakes::CakeResponse,
            // Orders
            crate::models::order::OrderStatus,
            crate::models::order::Order,
            crate::models::order::CakeLineItem,
            crate::models::order::CreateOrder,
            crate::models::order::CreateOrderCake,
            crate::models::order::UpdateOrderStatus,
            orders::OrderResponse,
            orders::OrdersResponse,
            orders::SummaryResponse,
            orders::SummaryQuery,
            // Sales
            crate::models::sales::CakeSizeTally,
            crate::models::sales::MonthlySummary,
            crate::models::sales::MonthlyReport,
            crate::models::sales::StatusTotal,
            // Common
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "timeslots", description = "Pickup days, time labels and slots"),
        (name = "cakes", description = "Cake catalog"),
        (name = "orders", description = "Reservations and sales summaries")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
