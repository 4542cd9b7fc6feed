//! Cake catalog repository

use sqlx::{Pool, Postgres};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::cake::{Cake, CakeSize},
};

#[derive(Clone)]
pub struct CakesRepository {
    pool: Pool<Postgres>,
}

impl CakesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all cakes with their sizes
    pub async fn list(&self) -> AppResult<Vec<Cake>> {
        let mut cakes = sqlx::query_as::<_, Cake>(
            "SELECT id, name, image, description FROM cakes ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i32> = cakes.iter().map(|c| c.id).collect();
        let mut sizes = self.sizes_for(&ids).await?;
        for cake in &mut cakes {
            cake.sizes = sizes.remove(&cake.id).unwrap_or_default();
        }
        Ok(cakes)
    }

    /// Get a cake with its sizes
    pub async fn get_by_id(&self, id: i32) -> AppResult<Cake> {
        let mut cake = sqlx::query_as::<_, Cake>(
            "SELECT id, name, image, description FROM cakes WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cake {} not found", id)))?;

        cake.sizes = self.sizes_for(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(cake)
    }

    /// Sizes of the given cakes, keyed by cake ID, ordered by price
    pub async fn sizes_for(&self, cake_ids: &[i32]) -> AppResult<HashMap<i32, Vec<CakeSize>>> {
        if cake_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CakeSize>(
            r#"
            SELECT cake_id, size, price, stock
            FROM cake_sizes
            WHERE cake_id = ANY($1)
            ORDER BY cake_id, price, id
            "#,
        )
        .bind(cake_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_cake: HashMap<i32, Vec<CakeSize>> = HashMap::new();
        for row in rows {
            by_cake.entry(row.cake_id).or_default().push(row);
        }
        Ok(by_cake)
    }
}
