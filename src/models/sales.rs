//! Monthly sales summary models

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

use super::order::OrderStatus;

/// Quantities of one cake size, per pickup day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct CakeSizeTally {
    /// First non-zero stock seen for this cake/size. Informational only,
    /// never decremented by orders.
    pub stock: i64,
    #[schema(value_type = Object)]
    pub days: BTreeMap<NaiveDate, i64>,
}

/// Orders of one calendar month, projected for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlySummary {
    /// YYYY-MM
    pub month: String,
    /// Distinct pickup dates in the month
    #[schema(value_type = Vec<String>)]
    pub dates: BTreeSet<NaiveDate>,
    /// cake name -> size -> tally (cancelled orders excluded)
    #[schema(value_type = Object)]
    pub quantities: BTreeMap<String, BTreeMap<String, CakeSizeTally>>,
    /// status -> date -> number of orders
    #[schema(value_type = Object)]
    pub status_day_counts: BTreeMap<OrderStatus, BTreeMap<NaiveDate, i64>>,
    /// status -> date -> sum of price x amount
    #[schema(value_type = Object)]
    pub status_day_revenue: BTreeMap<OrderStatus, BTreeMap<NaiveDate, i64>>,
}

impl MonthlySummary {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            ..Default::default()
        }
    }

    /// Quantity of one cake (all sizes) picked up on `date`
    pub fn cake_day_total(&self, cake: &str, date: NaiveDate) -> i64 {
        self.quantities
            .get(cake)
            .map(|sizes| {
                sizes
                    .values()
                    .filter_map(|tally| tally.days.get(&date))
                    .copied()
                    .fold(0, i64::saturating_add)
            })
            .unwrap_or(0)
    }

    /// Quantity of all cakes picked up on `date`
    pub fn day_total(&self, date: NaiveDate) -> i64 {
        self.quantities
            .keys()
            .map(|cake| self.cake_day_total(cake, date))
            .fold(0, i64::saturating_add)
    }

    /// Quantity of all cakes over the month
    pub fn quantity_total(&self) -> i64 {
        self.dates
            .iter()
            .map(|date| self.day_total(*date))
            .fold(0, i64::saturating_add)
    }

    pub fn status_day_count(&self, status: OrderStatus, date: NaiveDate) -> i64 {
        self.status_day_counts
            .get(&status)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or(0)
    }

    pub fn status_day_revenue(&self, status: OrderStatus, date: NaiveDate) -> i64 {
        self.status_day_revenue
            .get(&status)
            .and_then(|days| days.get(&date))
            .copied()
            .unwrap_or(0)
    }

    /// Orders with `status` over the month
    pub fn status_count(&self, status: OrderStatus) -> i64 {
        self.status_day_counts
            .get(&status)
            .map(|days| days.values().copied().fold(0, i64::saturating_add))
            .unwrap_or(0)
    }

    /// Revenue of orders with `status` over the month
    pub fn status_revenue(&self, status: OrderStatus) -> i64 {
        self.status_day_revenue
            .get(&status)
            .map(|days| days.values().copied().fold(0, i64::saturating_add))
            .unwrap_or(0)
    }

    /// Non-cancelled orders picked up on `date`
    pub fn day_order_count(&self, date: NaiveDate) -> i64 {
        OrderStatus::ALL
            .iter()
            .filter(|status| !status.is_cancelled())
            .map(|status| self.status_day_count(*status, date))
            .fold(0, i64::saturating_add)
    }

    /// Non-cancelled orders over the month
    pub fn total_count(&self) -> i64 {
        OrderStatus::ALL
            .iter()
            .filter(|status| !status.is_cancelled())
            .map(|status| self.status_count(*status))
            .fold(0, i64::saturating_add)
    }

    /// Revenue of non-cancelled orders over the month
    pub fn total_revenue(&self) -> i64 {
        OrderStatus::ALL
            .iter()
            .filter(|status| !status.is_cancelled())
            .map(|status| self.status_revenue(*status))
            .fold(0, i64::saturating_add)
    }
}

/// Count and revenue of one status over a month
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusTotal {
    pub status: OrderStatus,
    pub count: i64,
    pub revenue: i64,
}

/// A monthly summary together with its rollups, as served to the admin view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyReport {
    #[serde(flatten)]
    pub summary: MonthlySummary,
    /// date -> quantity of all cakes
    #[schema(value_type = Object)]
    pub day_totals: BTreeMap<NaiveDate, i64>,
    /// date -> non-cancelled order count
    #[schema(value_type = Object)]
    pub day_order_counts: BTreeMap<NaiveDate, i64>,
    /// Every status, cancelled included
    pub status_totals: Vec<StatusTotal>,
    pub total_quantity: i64,
    /// Non-cancelled orders
    pub total_count: i64,
    /// Revenue of non-cancelled orders
    pub total_revenue: i64,
}

impl From<MonthlySummary> for MonthlyReport {
    fn from(summary: MonthlySummary) -> Self {
        let day_totals = summary
            .dates
            .iter()
            .map(|date| (*date, summary.day_total(*date)))
            .collect();
        let day_order_counts = summary
            .dates
            .iter()
            .map(|date| (*date, summary.day_order_count(*date)))
            .collect();
        let status_totals = OrderStatus::ALL
            .iter()
            .map(|status| StatusTotal {
                status: *status,
                count: summary.status_count(*status),
                revenue: summary.status_revenue(*status),
            })
            .collect();

        Self {
            total_quantity: summary.quantity_total(),
            total_count: summary.total_count(),
            total_revenue: summary.total_revenue(),
            day_totals,
            day_order_counts,
            status_totals,
            summary,
        }
    }
}
