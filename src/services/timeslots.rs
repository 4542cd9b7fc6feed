//! Timeslots service (slot provisioning, time labels, days)

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::timeslot::{BatchTimeslots, Day, ProvisionOutcome, TimeLabel, Timeslot},
    repository::{Repository, SlotWriter},
};

/// Link every date to every time label through `writer`.
///
/// Unknown time labels and existing links are counted as skipped. Any error
/// from the writer aborts the batch; the caller owns commit and rollback.
pub async fn provision_slots<W>(
    writer: &mut W,
    dates: &BTreeSet<NaiveDate>,
    times: &BTreeSet<String>,
) -> AppResult<ProvisionOutcome>
where
    W: SlotWriter + ?Sized,
{
    let mut outcome = ProvisionOutcome::default();

    for date in dates {
        let day_id = writer.ensure_day(*date).await?;

        for time in times {
            let Some(time_id) = writer.find_time_id(time).await? else {
                tracing::warn!("Time '{}' is not registered, skipping {}", time, date);
                outcome.skipped += 1;
                continue;
            };

            if writer.link(day_id, time_id).await? {
                outcome.inserted += 1;
            } else {
                outcome.skipped += 1;
            }
        }
    }

    Ok(outcome)
}

/// Run `provision_slots` and close the writer's transaction: commit on
/// success, rollback on any error. A failed rollback is logged and the
/// original error is returned.
pub async fn run_batch<W>(
    writer: &mut W,
    dates: &BTreeSet<NaiveDate>,
    times: &BTreeSet<String>,
) -> AppResult<ProvisionOutcome>
where
    W: SlotWriter + ?Sized,
{
    match provision_slots(writer, dates, times).await {
        Ok(outcome) => {
            writer.commit().await?;
            tracing::info!(
                "Timeslot batch processed: {} inserted, {} skipped",
                outcome.inserted,
                outcome.skipped
            );
            Ok(outcome)
        }
        Err(e) => {
            if let Err(rollback_err) = writer.rollback().await {
                tracing::error!("Rollback of timeslot batch failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

/// Validate a batch request into deduplicated dates and time labels
fn parse_batch(request: &BatchTimeslots) -> AppResult<(BTreeSet<NaiveDate>, BTreeSet<String>)> {
    if request.dates.is_empty() || request.times.is_empty() {
        return Err(AppError::Validation(
            "Incomplete data: dates and times are required".to_string(),
        ));
    }

    let dates = request
        .dates
        .iter()
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("Invalid date '{}' (use YYYY-MM-DD)", s)))
        })
        .collect::<AppResult<BTreeSet<_>>>()?;

    let times = request.times.iter().cloned().collect();

    Ok((dates, times))
}

#[derive(Clone)]
pub struct TimeslotsService {
    repository: Repository,
}

impl TimeslotsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Slots ----

    /// Provision every (date, time) pair of the batch atomically
    pub async fn provision(&self, request: &BatchTimeslots) -> AppResult<ProvisionOutcome> {
        let (dates, times) = parse_batch(request)?;

        let mut writer = self.repository.timeslots.begin().await?;
        run_batch(&mut writer, &dates, &times).await
    }

    pub async fn list_slots(&self) -> AppResult<Vec<Timeslot>> {
        self.repository.timeslots.list_slots().await
    }

    pub async fn delete_slot(&self, id: i32) -> AppResult<()> {
        self.repository.timeslots.delete_slot(id).await
    }

    // ---- Time labels ----

    pub async fn list_times(&self) -> AppResult<Vec<TimeLabel>> {
        self.repository.timeslots.list_times().await
    }

    pub async fn create_time(&self, time_value: Option<&str>) -> AppResult<i32> {
        let time_value = time_value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("Time is required".to_string()))?;
        self.repository.timeslots.create_time(time_value).await
    }

    pub async fn delete_time(&self, id: i32) -> AppResult<()> {
        self.repository.timeslots.delete_time(id).await
    }

    // ---- Days ----

    pub async fn list_days(&self) -> AppResult<Vec<Day>> {
        self.repository.timeslots.list_days().await
    }
}
