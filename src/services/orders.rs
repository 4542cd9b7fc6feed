//! Orders service (storefront reservations, admin listing)

use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        cake::CakeSize,
        order::{CreateOrder, CreateOrderCake, Order, OrderStatus},
    },
    repository::{orders::NewOrder, Repository},
};

const CLIENT_ID_LEN: usize = 6;

fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} '{}' (use YYYY-MM-DD)", field, value)))
}

/// Short reference handed to the customer when the storefront sends none
fn generate_client_id() -> String {
    uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(CLIENT_ID_LEN)
        .collect()
}

/// Stock recorded on an order line: the value sent by the client, else the
/// catalog stock of the matching cake size, else 0
fn snapshot_stock(catalog: &HashMap<i32, Vec<CakeSize>>, cake: &CreateOrderCake) -> i32 {
    if let Some(stock) = cake.stock {
        return stock;
    }
    cake.cake_id
        .and_then(|id| catalog.get(&id))
        .and_then(|sizes| sizes.iter().find(|s| s.size.trim() == cake.size.trim()))
        .map(|s| s.stock)
        .unwrap_or(0)
}

#[derive(Clone)]
pub struct OrdersService {
    repository: Repository,
}

impl OrdersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Order>> {
        self.repository.orders.list(None, None).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Order> {
        self.repository.orders.get_by_id(id).await
    }

    /// Record a reservation sent by the storefront
    pub async fn create(&self, data: &CreateOrder) -> AppResult<Order> {
        data.validate()?;

        let pickup_date = parse_date(&data.date, "pickup date")?;
        let date_order = match data.date_order.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(s) => parse_date(s, "order date")?,
            None => Local::now().date_naive(),
        };
        let id_client = data
            .id_client
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generate_client_id);

        let cake_ids: Vec<i32> = data.cakes.iter().filter_map(|c| c.cake_id).collect();
        let catalog = self.repository.cakes.sizes_for(&cake_ids).await?;
        let stocks = data.cakes.iter().map(|c| snapshot_stock(&catalog, c)).collect();

        let order = NewOrder {
            id_client,
            pickup_date,
            date_order,
            status: data.status.unwrap_or_default(),
            stocks,
            data,
        };

        let id = self.repository.orders.create(&order).await?;
        tracing::info!("Order {} created for pickup on {} {}", id, pickup_date, data.pickup_hour);

        self.repository.orders.get_by_id(id).await
    }

    pub async fn update_status(&self, id: i32, status: OrderStatus) -> AppResult<Order> {
        self.repository.orders.update_status(id, status).await?;
        tracing::info!("Order {} status set to {}", id, status);
        self.repository.orders.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_client_id() {
        let id = generate_client_id();
        assert_eq!(id.len(), CLIENT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    fn line(cake_id: Option<i32>, size: &str, stock: Option<i32>) -> CreateOrderCake {
        CreateOrderCake {
            cake_id,
            name: "Shortcake".to_string(),
            size: size.to_string(),
            amount: 1,
            price: 4200,
            stock,
            message_cake: None,
        }
    }

    #[test]
    fn test_snapshot_stock() {
        let catalog = HashMap::from([(
            1,
            vec![
                CakeSize { cake_id: 1, size: "12cm".into(), price: 3200, stock: 4 },
                CakeSize { cake_id: 1, size: "15cm".into(), price: 4200, stock: 2 },
            ],
        )]);

        assert_eq!(snapshot_stock(&catalog, &line(Some(1), "15cm", None)), 2);
        assert_eq!(snapshot_stock(&catalog, &line(Some(1), " 12cm", None)), 4);
        assert_eq!(snapshot_stock(&catalog, &line(Some(1), "15cm", Some(9))), 9);
        assert_eq!(snapshot_stock(&catalog, &line(Some(1), "18cm", None)), 0);
        assert_eq!(snapshot_stock(&catalog, &line(Some(7), "15cm", None)), 0);
        assert_eq!(snapshot_stock(&catalog, &line(None, "15cm", None)), 0);
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-06-01", "pickup date").is_ok());
        assert!(matches!(parse_date("", "pickup date"), Err(AppError::Validation(_))));
    }
}
