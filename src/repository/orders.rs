//! Orders repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::order::{CakeLineItem, CreateOrder, Order, OrderStatus},
};

const ORDER_COLUMNS: &str = r#"
    id, id_client, first_name, last_name, email, tel,
    to_char(pickup_date, 'YYYY-MM-DD') AS date,
    pickup_hour, status, message,
    to_char(date_order, 'YYYY-MM-DD') AS date_order
"#;

/// Order row ready to insert, with dates already parsed
pub struct NewOrder<'a> {
    pub id_client: String,
    pub pickup_date: NaiveDate,
    pub date_order: NaiveDate,
    pub status: OrderStatus,
    /// Stock snapshot per cake line, in the order of `data.cakes`
    pub stocks: Vec<i32>,
    pub data: &'a CreateOrder,
}

#[derive(Clone)]
pub struct OrdersRepository {
    pool: Pool<Postgres>,
}

impl OrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an order with its cakes
    pub async fn get_by_id(&self, id: i32) -> AppResult<Order> {
        let query = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        let mut order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

        order.cakes = self.cakes_for(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(order)
    }

    /// List orders with their cakes, optionally restricted to a pickup date range
    pub async fn list(
        &self,
        pickup_from: Option<NaiveDate>,
        pickup_to: Option<NaiveDate>,
    ) -> AppResult<Vec<Order>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if pickup_from.is_some() {
            conditions.push(format!("pickup_date >= ${}", idx));
            idx += 1;
        }
        if pickup_to.is_some() {
            conditions.push(format!("pickup_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {} FROM orders {} ORDER BY pickup_date, id",
            ORDER_COLUMNS, where_clause
        );

        let mut builder = sqlx::query_as::<_, Order>(&query);
        if let Some(from) = pickup_from { builder = builder.bind(from); }
        if let Some(to) = pickup_to { builder = builder.bind(to); }

        let mut orders = builder.fetch_all(&self.pool).await?;

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let mut cakes = self.cakes_for(&ids).await?;
        for order in &mut orders {
            order.cakes = cakes.remove(&order.id).unwrap_or_default();
        }
        Ok(orders)
    }

    async fn cakes_for(&self, order_ids: &[i32]) -> AppResult<HashMap<i32, Vec<CakeLineItem>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CakeLineItem>(
            r#"
            SELECT order_id, cake_id, name, size,
                   amount::int8 AS amount, price::int8 AS price, stock::int8 AS stock,
                   message_cake
            FROM order_cakes
            WHERE order_id = ANY($1)
            ORDER BY order_id, id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i32, Vec<CakeLineItem>> = HashMap::new();
        for row in rows {
            by_order.entry(row.order_id).or_default().push(row);
        }
        Ok(by_order)
    }

    /// Insert an order and its cakes in one transaction, returning the new ID
    pub async fn create(&self, order: &NewOrder<'_>) -> AppResult<i32> {
        let data = order.data;
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (id_client, first_name, last_name, email, tel,
                                pickup_date, pickup_hour, status, message, date_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&order.id_client)
        .bind(data.first_name.trim())
        .bind(data.last_name.trim())
        .bind(data.email.trim())
        .bind(&data.tel)
        .bind(order.pickup_date)
        .bind(&data.pickup_hour)
        .bind(order.status.code())
        .bind(&data.message)
        .bind(order.date_order)
        .fetch_one(&mut *tx)
        .await?;

        for (cake, stock) in data.cakes.iter().zip(&order.stocks) {
            sqlx::query(
                r#"
                INSERT INTO order_cakes (order_id, cake_id, name, size, amount, price, stock, message_cake)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(id)
            .bind(cake.cake_id)
            .bind(cake.name.trim())
            .bind(cake.size.trim())
            .bind(cake.amount)
            .bind(cake.price)
            .bind(*stock)
            .bind(&cake.message_cake)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Change the status of an order
    pub async fn update_status(&self, id: i32, status: OrderStatus) -> AppResult<()> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status.code())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }
}
