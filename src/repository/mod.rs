//! Repository layer for database operations

pub mod cakes;
pub mod orders;
pub mod timeslots;

use sqlx::{Pool, Postgres};

pub use timeslots::SlotWriter;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub timeslots: timeslots::TimeslotsRepository,
    pub orders: orders::OrdersRepository,
    pub cakes: cakes::CakesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            timeslots: timeslots::TimeslotsRepository::new(pool.clone()),
            orders: orders::OrdersRepository::new(pool.clone()),
            cakes: cakes::CakesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
