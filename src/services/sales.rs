//! Sales service: groups orders into monthly summaries for the admin view

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        order::Order,
        sales::{MonthlyReport, MonthlySummary},
    },
    repository::Repository,
};

/// Label used when a line item has no cake name
pub const UNNAMED_CAKE: &str = "(unnamed cake)";
/// Label used when a line item has no size
pub const UNSIZED_CAKE: &str = "(no size)";

/// Parse a pickup date and derive its "YYYY-MM" month key.
/// Returns None for anything that is not a real calendar date.
pub fn month_key(date: &str) -> Option<(NaiveDate, String)> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    Some((date, format!("{:04}-{:02}", date.year(), date.month())))
}

fn label_or(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Group orders by pickup month, in one pass, sorted by month.
///
/// Orders whose date cannot be parsed are left out. Cancelled orders are
/// counted per status and day but do not contribute cake quantities.
pub fn aggregate_by_month(orders: &[Order]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, MonthlySummary> = BTreeMap::new();

    for order in orders {
        let Some((date, key)) = month_key(&order.date) else {
            tracing::warn!("Order {} has invalid pickup date '{}', skipping", order.id, order.date);
            continue;
        };

        let summary = months
            .entry(key)
            .or_insert_with_key(|key| MonthlySummary::new(key.clone()));

        summary.dates.insert(date);

        let count = summary
            .status_day_counts
            .entry(order.status)
            .or_default()
            .entry(date)
            .or_default();
        *count = count.saturating_add(1);

        let revenue = summary
            .status_day_revenue
            .entry(order.status)
            .or_default()
            .entry(date)
            .or_default();
        *revenue = revenue.saturating_add(order.total());

        if order.status.is_cancelled() {
            continue;
        }

        for cake in &order.cakes {
            let name = label_or(cake.name.as_deref(), UNNAMED_CAKE);
            let size = label_or(cake.size.as_deref(), UNSIZED_CAKE);

            let tally = summary
                .quantities
                .entry(name)
                .or_default()
                .entry(size)
                .or_default();

            // Stock is a snapshot taken at order time, not live inventory:
            // keep the first non-zero value seen.
            if tally.stock == 0 && cake.stock > 0 {
                tally.stock = cake.stock;
            }

            let quantity = tally.days.entry(date).or_default();
            *quantity = quantity.saturating_add(cake.amount);
        }
    }

    months.into_values().collect()
}

#[derive(Clone)]
pub struct SalesService {
    repository: Repository,
}

impl SalesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Monthly reports over all orders, or over a single "YYYY-MM" month
    pub async fn monthly_reports(&self, month: Option<&str>) -> AppResult<Vec<MonthlyReport>> {
        let range = match month {
            Some(m) => Some(month_range(m)?),
            None => None,
        };

        let orders = self
            .repository
            .orders
            .list(range.map(|(from, _)| from), range.map(|(_, to)| to))
            .await?;

        Ok(aggregate_by_month(&orders)
            .into_iter()
            .map(MonthlyReport::from)
            .collect())
    }
}

/// First and last day of a "YYYY-MM" month
fn month_range(month: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::Validation(format!("Invalid month '{}' (use YYYY-MM)", month));

    let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|_| invalid())?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;

    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderStatus;

    fn orders(json: &str) -> Vec<Order> {
        serde_json::from_str(json).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_cancelled_orders_excluded_from_quantities() {
        let orders = orders(
            r#"[
                {"date": "2025-06-01", "status": "c",
                 "cakes": [{"name": "A", "size": "S", "amount": 2, "price": 100}]},
                {"date": "2025-06-01", "status": "e",
                 "cakes": [{"name": "A", "size": "S", "amount": 5, "price": 100}]}
            ]"#,
        );

        let months = aggregate_by_month(&orders);
        assert_eq!(months.len(), 1);

        let june = &months[0];
        assert_eq!(june.month, "2025-06");
        assert_eq!(june.quantities["A"]["S"].days[&date("2025-06-01")], 2);
        assert_eq!(june.status_day_count(OrderStatus::Cancelled, date("2025-06-01")), 1);
        assert_eq!(june.status_day_count(OrderStatus::PaidInStore, date("2025-06-01")), 1);

        // Cancelled revenue is tracked but left out of the grand totals
        assert_eq!(june.status_revenue(OrderStatus::Cancelled), 500);
        assert_eq!(june.total_revenue(), 200);
        assert_eq!(june.total_count(), 1);
    }

    #[test]
    fn test_months_sorted_and_dates_distinct() {
        let orders = orders(
            r#"[
                {"date": "2025-07-03", "status": "a", "cakes": []},
                {"date": "2025-06-20", "status": "b", "cakes": []},
                {"date": "2025-06-02", "status": "b", "cakes": []},
                {"date": "2025-06-20", "status": "d", "cakes": []}
            ]"#,
        );

        let months = aggregate_by_month(&orders);
        let keys: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(keys, vec!["2025-06", "2025-07"]);

        let june: Vec<NaiveDate> = months[0].dates.iter().copied().collect();
        assert_eq!(june, vec![date("2025-06-02"), date("2025-06-20")]);
        assert_eq!(months[0].day_order_count(date("2025-06-20")), 2);
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let orders = orders(
            r#"[
                {"date": "", "status": "c",
                 "cakes": [{"name": "A", "size": "S", "amount": 1, "price": 100}]},
                {"date": "2025-13-40", "status": "c", "cakes": []},
                {"date": "garbage", "status": "c", "cakes": []},
                {"date": "2025-06-01", "status": "c",
                 "cakes": [{"name": "A", "size": "S", "amount": 1, "price": 100}]}
            ]"#,
        );

        let months = aggregate_by_month(&orders);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].total_count(), 1);
        assert_eq!(months[0].quantity_total(), 1);
    }

    #[test]
    fn test_placeholders_and_stock_snapshot() {
        let orders = orders(
            r#"[
                {"date": "2025-06-01", "status": "c",
                 "cakes": [{"name": null, "size": " ", "amount": 1, "price": 100, "stock": 0}]},
                {"date": "2025-06-02", "status": "c",
                 "cakes": [{"name": "Mont Blanc", "size": "12cm", "amount": 1, "price": 3000, "stock": 8}]},
                {"date": "2025-06-03", "status": "c",
                 "cakes": [{"name": "Mont Blanc", "size": "12cm", "amount": 2, "price": 3000, "stock": 5}]}
            ]"#,
        );

        let june = &aggregate_by_month(&orders)[0];
        assert_eq!(june.quantities[UNNAMED_CAKE][UNSIZED_CAKE].days[&date("2025-06-01")], 1);
        assert_eq!(june.quantities["Mont Blanc"]["12cm"].stock, 8);
        assert_eq!(june.cake_day_total("Mont Blanc", date("2025-06-03")), 2);
    }

    #[test]
    fn test_non_numeric_values_count_as_zero() {
        let orders = orders(
            r#"[
                {"date": "2025-06-01", "status": "b",
                 "cakes": [
                    {"name": "A", "size": "S", "amount": "two", "price": 100},
                    {"name": "A", "size": "M", "amount": 1, "price": "n/a"},
                    {"name": "B", "size": "S", "amount": "3", "price": "200"}
                 ]}
            ]"#,
        );

        let june = &aggregate_by_month(&orders)[0];
        assert_eq!(june.cake_day_total("A", date("2025-06-01")), 1);
        assert_eq!(june.status_revenue(OrderStatus::OnlineReserved), 600);
    }

    #[test]
    fn test_day_total_matches_cake_sizes() {
        let orders = orders(
            r#"[
                {"date": "2025-06-01", "status": "a",
                 "cakes": [{"name": "A", "size": "S", "amount": 2, "price": 100},
                           {"name": "A", "size": "L", "amount": 1, "price": 300}]},
                {"date": "2025-06-01", "status": "d",
                 "cakes": [{"name": "B", "size": "S", "amount": 4, "price": 150}]},
                {"date": "2025-06-05", "status": "c",
                 "cakes": [{"name": "B", "size": "S", "amount": 1, "price": 150}]}
            ]"#,
        );

        for summary in aggregate_by_month(&orders) {
            for day in &summary.dates {
                let by_size: i64 = summary
                    .quantities
                    .values()
                    .flat_map(|sizes| sizes.values())
                    .filter_map(|tally| tally.days.get(day))
                    .sum();
                assert_eq!(summary.day_total(*day), by_size);
            }
        }

        let report = MonthlyReport::from(aggregate_by_month(&orders).remove(0));
        assert_eq!(report.day_totals[&date("2025-06-01")], 7);
        assert_eq!(report.total_quantity, 8);
        assert_eq!(report.total_revenue, 200 + 300 + 600 + 150);
        assert_eq!(report.status_totals.len(), OrderStatus::ALL.len());
    }

    #[test]
    fn test_huge_values_saturate() {
        let orders = orders(&format!(
            r#"[
                {{"date": "2025-06-01", "status": "c",
                 "cakes": [{{"name": "A", "size": "S", "amount": {max}, "price": 1}},
                           {{"name": "A", "size": "S", "amount": 1, "price": 1}}]}},
                {{"date": "2025-06-01", "status": "c",
                 "cakes": [{{"name": "A", "size": "S", "amount": 1, "price": 1}}]}}
            ]"#,
            max = i64::MAX
        ));

        let summary = aggregate_by_month(&orders).remove(0);
        let day = date("2025-06-01");
        assert_eq!(summary.quantities["A"]["S"].days[&day], i64::MAX);
        assert_eq!(summary.status_day_revenue(OrderStatus::PaidInStore, day), i64::MAX);
        assert_eq!(summary.status_day_count(OrderStatus::PaidInStore, day), 2);

        let report = MonthlyReport::from(summary);
        assert_eq!(report.total_quantity, i64::MAX);
        assert_eq!(report.total_revenue, i64::MAX);
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key("2025-06-01").map(|(_, k)| k), Some("2025-06".to_string()));
        assert_eq!(month_key("2025-6-1").map(|(_, k)| k), Some("2025-06".to_string()));
        assert!(month_key("").is_none());
        assert!(month_key("2025-06").is_none());
    }

    #[test]
    fn test_month_range() {
        assert_eq!(month_range("2024-02").unwrap(), (date("2024-02-01"), date("2024-02-29")));
        assert_eq!(month_range("2025-12").unwrap(), (date("2025-12-01"), date("2025-12-31")));
        assert!(month_range("2025-13").is_err());
        assert!(month_range("june").is_err());
    }
}
