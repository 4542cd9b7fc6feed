//! Timeslots repository (days, time labels, day/time links)

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::timeslot::{Day, TimeLabel, Timeslot},
};

/// Steps of slot provisioning, all scoped to one open transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlotWriter: Send {
    /// Insert the day if absent and return its ID
    async fn ensure_day(&mut self, date: NaiveDate) -> AppResult<i32>;

    /// Look up a registered time label by its exact text
    async fn find_time_id(&mut self, time_value: &str) -> AppResult<Option<i32>>;

    /// Link a day to a time label. Returns false when the link already exists.
    async fn link(&mut self, day_id: i32, time_id: i32) -> AppResult<bool>;

    /// Make every write of the batch visible
    async fn commit(&mut self) -> AppResult<()>;

    /// Discard every write of the batch
    async fn rollback(&mut self) -> AppResult<()>;
}

/// `SlotWriter` over a Postgres transaction. The transaction is consumed by
/// the first `commit` or `rollback`; later calls fail with `Internal`.
pub struct PgSlotWriter {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSlotWriter {
    fn conn(&mut self) -> AppResult<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or_else(transaction_closed)
    }

    fn take(&mut self) -> AppResult<Transaction<'static, Postgres>> {
        self.tx.take().ok_or_else(transaction_closed)
    }
}

#[async_trait]
impl SlotWriter for PgSlotWriter {
    async fn ensure_day(&mut self, date: NaiveDate) -> AppResult<i32> {
        let conn = self.conn()?;
        sqlx::query("INSERT INTO days (day_date) VALUES ($1) ON CONFLICT (day_date) DO NOTHING")
            .bind(date)
            .execute(&mut *conn)
            .await?;

        let id: i32 = sqlx::query_scalar("SELECT id FROM days WHERE day_date = $1")
            .bind(date)
            .fetch_one(&mut *conn)
            .await?;
        Ok(id)
    }

    async fn find_time_id(&mut self, time_value: &str) -> AppResult<Option<i32>> {
        let id: Option<i32> = sqlx::query_scalar("SELECT id FROM times WHERE time_value = $1")
            .bind(time_value)
            .fetch_optional(self.conn()?)
            .await?;
        Ok(id)
    }

    async fn link(&mut self, day_id: i32, time_id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO day_time_slots (day_id, time_id)
            VALUES ($1, $2)
            ON CONFLICT (day_id, time_id) DO NOTHING
            "#,
        )
        .bind(day_id)
        .bind(time_id)
        .execute(self.conn()?)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit(&mut self) -> AppResult<()> {
        self.take()?.commit().await?;
        Ok(())
    }

    async fn rollback(&mut self) -> AppResult<()> {
        self.take()?.rollback().await?;
        Ok(())
    }
}

fn transaction_closed() -> AppError {
    AppError::Internal("Provisioning transaction is already closed".to_string())
}

#[derive(Clone)]
pub struct TimeslotsRepository {
    pool: Pool<Postgres>,
}

impl TimeslotsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Open the transaction a provisioning batch runs in
    pub async fn begin(&self) -> AppResult<PgSlotWriter> {
        Ok(PgSlotWriter {
            tx: Some(self.pool.begin().await?),
        })
    }

    // ---- Slots ----

    /// List all day/time links, ordered by date then time label
    pub async fn list_slots(&self) -> AppResult<Vec<Timeslot>> {
        let rows = sqlx::query_as::<_, Timeslot>(
            r#"
            SELECT dt.id, d.day_date AS date, t.time_value AS time
            FROM day_time_slots dt
            JOIN days d ON dt.day_id = d.id
            JOIN times t ON dt.time_id = t.id
            ORDER BY d.day_date, t.time_value
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Delete a day/time link. The day and the time label are kept.
    pub async fn delete_slot(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM day_time_slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Timeslot {} not found", id)));
        }
        Ok(())
    }

    // ---- Time labels ----

    pub async fn list_times(&self) -> AppResult<Vec<TimeLabel>> {
        let rows = sqlx::query_as::<_, TimeLabel>(
            "SELECT id, time_value FROM times ORDER BY time_value"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Register a time label and return its ID
    pub async fn create_time(&self, time_value: &str) -> AppResult<i32> {
        sqlx::query_scalar::<_, i32>("INSERT INTO times (time_value) VALUES ($1) RETURNING id")
            .bind(time_value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    AppError::Conflict(format!("Time '{}' is already registered", time_value))
                }
                e => AppError::Database(e),
            })
    }

    /// Delete a time label that no day references
    pub async fn delete_time(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let usage: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM day_time_slots WHERE time_id = $1"
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if let Err(e) = ensure_time_unused(id, usage) {
            tx.rollback().await?;
            return Err(e);
        }

        let result = sqlx::query("DELETE FROM times WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                // A link created after the usage check still blocks the delete
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => time_in_use(id),
                e => AppError::Database(e),
            })?;

        if let Err(e) = ensure_time_removed(id, result.rows_affected()) {
            tx.rollback().await?;
            return Err(e);
        }

        tx.commit().await?;
        Ok(())
    }

    // ---- Days ----

    pub async fn list_days(&self) -> AppResult<Vec<Day>> {
        let rows = sqlx::query_as::<_, Day>("SELECT id, day_date FROM days ORDER BY day_date")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn time_in_use(id: i32) -> AppError {
    AppError::Conflict(format!(
        "Time {} cannot be deleted because it is linked to existing days",
        id
    ))
}

/// A label still referenced by `usage` links cannot be removed
fn ensure_time_unused(id: i32, usage: i64) -> AppResult<()> {
    if usage > 0 {
        return Err(time_in_use(id));
    }
    Ok(())
}

fn ensure_time_removed(id: i32, rows_affected: u64) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Time {} not found", id)));
    }
    Ok(())
}
