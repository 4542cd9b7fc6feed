//! Order models (reservations and cake line items)

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Order lifecycle state, stored and exchanged as a single letter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum OrderStatus {
    #[serde(rename = "a", alias = "A")]
    Unconfirmed,
    #[serde(rename = "b", alias = "B")]
    OnlineReserved,
    #[serde(rename = "c", alias = "C")]
    PaidInStore,
    #[serde(rename = "d", alias = "D")]
    HandedOver,
    #[serde(rename = "e", alias = "E")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Unconfirmed,
        OrderStatus::OnlineReserved,
        OrderStatus::PaidInStore,
        OrderStatus::HandedOver,
        OrderStatus::Cancelled,
    ];

    /// Single-letter code used on the wire and in the database
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Unconfirmed => "a",
            OrderStatus::OnlineReserved => "b",
            OrderStatus::PaidInStore => "c",
            OrderStatus::HandedOver => "d",
            OrderStatus::Cancelled => "e",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::PaidInStore
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(OrderStatus::Unconfirmed),
            "b" => Ok(OrderStatus::OnlineReserved),
            "c" => Ok(OrderStatus::PaidInStore),
            "d" => Ok(OrderStatus::HandedOver),
            "e" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Unknown order status '{}'", other)),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Unconfirmed => "Unconfirmed",
            OrderStatus::OnlineReserved => "Online reserved",
            OrderStatus::PaidInStore => "Paid in store",
            OrderStatus::HandedOver => "Handed over",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Lenient numbers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Read a quantity or price that may arrive as a number, a numeric string,
/// null or garbage. Anything that is not a finite number becomes 0.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Int(n) => n,
        LenientNumber::Float(f) if f.is_finite() => f as i64,
        LenientNumber::Float(_) => 0,
        LenientNumber::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0)
        }
        LenientNumber::Other(_) => 0,
    };
    Ok(value)
}

// ---------------------------------------------------------------------------
// CakeLineItem
// ---------------------------------------------------------------------------

/// One cake in an order
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CakeLineItem {
    #[serde(skip)]
    pub order_id: i32,
    pub cake_id: Option<i32>,
    pub name: Option<String>,
    pub size: Option<String>,
    /// Quantity ordered
    #[serde(default, deserialize_with = "lenient_i64")]
    pub amount: i64,
    /// Unit price
    #[serde(default, deserialize_with = "lenient_i64")]
    pub price: i64,
    /// Remaining stock seen when the order was placed (informational)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stock: i64,
    /// Message to write on the cake
    pub message_cake: Option<String>,
}

impl CakeLineItem {
    pub fn line_total(&self) -> i64 {
        self.amount.saturating_mul(self.price)
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// A cake reservation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub id_client: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub tel: Option<String>,
    /// Pickup date (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
    /// Pickup time label
    #[serde(default, alias = "pickupHour")]
    pub pickup_hour: String,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub message: Option<String>,
    /// Date the order was placed (YYYY-MM-DD)
    pub date_order: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub cakes: Vec<CakeLineItem>,
}

impl Order {
    /// Sum of line totals, clamped at `i64::MAX`
    pub fn total(&self) -> i64 {
        self.cakes
            .iter()
            .map(CakeLineItem::line_total)
            .fold(0, i64::saturating_add)
    }
}

/// Cake line in a reservation request
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderCake {
    pub cake_id: Option<i32>,
    #[validate(length(min = 1, message = "Cake name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Cake size is required"))]
    pub size: String,
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i32,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i32,
    pub stock: Option<i32>,
    pub message_cake: Option<String>,
}

/// Reservation request sent by the storefront
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    /// Short client reference; generated when absent
    #[validate(length(max = 16, message = "Client reference is at most 16 characters"))]
    pub id_client: Option<String>,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub tel: Option<String>,
    /// Pickup date (YYYY-MM-DD)
    pub date: String,
    /// Pickup time label
    #[serde(alias = "pickupHour")]
    #[validate(length(min = 1, message = "Pickup hour is required"))]
    pub pickup_hour: String,
    pub status: Option<OrderStatus>,
    /// Order date (YYYY-MM-DD), defaults to today
    pub date_order: Option<String>,
    pub message: Option<String>,
    #[validate(length(min = 1, message = "At least one cake is required"), nested)]
    pub cakes: Vec<CreateOrderCake>,
}

/// Status change request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}
