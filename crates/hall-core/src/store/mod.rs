//! Schedule persistence.
//!
//! Provides the `ScheduleStore` trait (one schedule per calendar date, looked
//! up by date and written by upsert) and two backends: `YamlStore`, one
//! manifest file per date, and `DbStore`, an embedded redb database. Every
//! schedule a store returns has had its lead/support roles re-derived from
//! the stored primary column.

pub mod db;
pub mod yaml;

pub use db::DbStore;
pub use yaml::YamlStore;

use crate::config::{Config, StoreBackend};
use crate::error::{HallError, Result};
use crate::paths;
use crate::schedule::{Schedule, ScheduleStatus};
use chrono::{NaiveDate, Utc};
use std::path::Path;
use uuid::Uuid;

pub trait ScheduleStore: Send + Sync {
    /// The schedule stored for `date`, if any.
    fn fetch_by_date(&self, date: NaiveDate) -> Result<Option<Schedule>>;

    /// Insert or replace the schedule for its date. Returns the identifier.
    fn upsert(&self, schedule: &Schedule) -> Result<String>;

    /// Remove the schedule for `date`. Returns false if none was stored.
    fn delete(&self, date: NaiveDate) -> Result<bool>;

    /// All stored schedules, oldest date first.
    fn list(&self) -> Result<Vec<Schedule>>;
}

/// Open the backend selected in `config`.
pub fn open(root: &Path, config: &Config) -> Result<Box<dyn ScheduleStore>> {
    match config.store {
        StoreBackend::Yaml => Ok(Box::new(YamlStore::new(root))),
        StoreBackend::Redb => Ok(Box::new(DbStore::open(&paths::db_path(root))?)),
    }
}

/// The stored schedule for `date`, or a fresh empty draft when none exists.
pub fn load_or_empty(store: &dyn ScheduleStore, date: NaiveDate) -> Result<Schedule> {
    Ok(store
        .fetch_by_date(date)?
        .unwrap_or_else(|| Schedule::empty(date)))
}

/// Validate, mark published, and upsert. Returns the schedule as stored.
pub fn save(store: &dyn ScheduleStore, schedule: &Schedule) -> Result<Schedule> {
    schedule.validate()?;
    let date = required_date(schedule)?;
    let published = schedule.clone().with_status(ScheduleStatus::Published);
    store.upsert(&published)?;
    store
        .fetch_by_date(date)?
        .ok_or_else(|| HallError::ScheduleNotFound(paths::date_key(date)))
}

// ---------------------------------------------------------------------------
// Shared backend helpers
// ---------------------------------------------------------------------------

pub(crate) fn required_date(schedule: &Schedule) -> Result<NaiveDate> {
    schedule
        .date
        .ok_or_else(|| HallError::Validation("date is missing".to_string()))
}

/// Build the record to write: keeps the existing id and creation time for the
/// date, otherwise assigns new ones, and refreshes `updated_at`.
pub(crate) fn stamp(existing: Option<&Schedule>, schedule: &Schedule) -> Schedule {
    let now = Utc::now();
    let mut record = schedule.clone();
    record.id = existing
        .and_then(|e| e.id.clone())
        .or_else(|| schedule.id.clone())
        .or_else(|| Some(Uuid::new_v4().to_string()));
    record.created_at = existing
        .and_then(|e| e.created_at)
        .or(schedule.created_at)
        .or(Some(now));
    record.updated_at = Some(now);
    record
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
