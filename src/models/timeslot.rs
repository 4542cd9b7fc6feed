//! Pickup availability models (days, time labels, slot links)

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

/// A calendar date that has been referenced by provisioning
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Day {
    pub id: i32,
    pub day_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// TimeLabel
// ---------------------------------------------------------------------------

/// A canonical pickup time, e.g. "11:00〜12:00"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TimeLabel {
    pub id: i32,
    pub time_value: String,
}

/// Register time label request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTimeLabel {
    #[serde(default)]
    pub time_value: Option<String>,
}

// ---------------------------------------------------------------------------
// Timeslot (day/time link)
// ---------------------------------------------------------------------------

/// A selectable pickup slot: one day linked to one time label
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Timeslot {
    /// Link ID
    pub id: i32,
    pub date: NaiveDate,
    pub time: String,
}

/// Batch provisioning request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BatchTimeslots {
    /// Dates (YYYY-MM-DD)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dates: Vec<String>,
    /// Canonical time labels, matched verbatim
    #[serde(default, deserialize_with = "null_as_empty")]
    pub times: Vec<String>,
}

/// `null` reads as an empty list so it fails the same emptiness check
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Outcome of one provisioning batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProvisionOutcome {
    /// Links created by this batch
    pub inserted: u64,
    /// Pairs that already existed or referenced an unknown time label
    pub skipped: u64,
}
