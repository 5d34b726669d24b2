//! Embedded schedule store using redb.
//!
//! # Table design
//!
//! A single `SCHEDULES` table keyed by the ISO date string (`YYYY-MM-DD`),
//! so key order equals date order and a full scan lists schedules
//! chronologically. Values are JSON-encoded `Schedule` records.

use std::path::Path;

use chrono::NaiveDate;
use redb::{Database, ReadableTable, TableDefinition};

use super::{required_date, stamp, ScheduleStore};
use crate::error::{HallError, Result};
use crate::paths;
use crate::schedule::Schedule;

// ---------------------------------------------------------------------------
// Table definition
// ---------------------------------------------------------------------------

/// Key: date string. Value: JSON-encoded Schedule.
const SCHEDULES: TableDefinition<&str, &[u8]> = TableDefinition::new("schedules");

// ---------------------------------------------------------------------------
// DbStore
// ---------------------------------------------------------------------------

pub struct DbStore {
    db: Database,
}

impl DbStore {
    /// Open or create the redb database at `path`.
    ///
    /// Creates the `SCHEDULES` table if it doesn't already exist.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            crate::io::ensure_dir(parent)?;
        }
        let db = Database::create(path).map_err(|e| HallError::Store(e.to_string()))?;
        let wt = db
            .begin_write()
            .map_err(|e| HallError::Store(e.to_string()))?;
        wt.open_table(SCHEDULES)
            .map_err(|e| HallError::Store(e.to_string()))?;
        wt.commit().map_err(|e| HallError::Store(e.to_string()))?;
        Ok(Self { db })
    }

    fn decode(bytes: &[u8]) -> Result<Schedule> {
        let schedule: Schedule = serde_json::from_slice(bytes)?;
        schedule.rederived()
    }
}

impl ScheduleStore for DbStore {
    fn fetch_by_date(&self, date: NaiveDate) -> Result<Option<Schedule>> {
        let key = paths::date_key(date);
        let rt = self
            .db
            .begin_read()
            .map_err(|e| HallError::Store(e.to_string()))?;
        let table = rt
            .open_table(SCHEDULES)
            .map_err(|e| HallError::Store(e.to_string()))?;

        let found = table
            .get(key.as_str())
            .map_err(|e| HallError::Store(e.to_string()))?;
        match found {
            Some(v) => Self::decode(v.value()).map(Some),
            None => {
                tracing::debug!(date = %key, "no schedule record");
                Ok(None)
            }
        }
    }

    fn upsert(&self, schedule: &Schedule) -> Result<String> {
        schedule.validate()?;
        let date = required_date(schedule)?;
        let key = paths::date_key(date);
        let existing = self.fetch_by_date(date)?;
        let record = stamp(existing.as_ref(), schedule);
        let value = serde_json::to_vec(&record)?;

        let wt = self
            .db
            .begin_write()
            .map_err(|e| HallError::Store(e.to_string()))?;
        {
            let mut table = wt
                .open_table(SCHEDULES)
                .map_err(|e| HallError::Store(e.to_string()))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(|e| HallError::Store(e.to_string()))?;
        }
        wt.commit().map_err(|e| HallError::Store(e.to_string()))?;

        let id = record
            .id
            .ok_or_else(|| HallError::Store("record written without an id".to_string()))?;
        tracing::info!(date = %key, id = %id, "schedule saved");
        Ok(id)
    }

    fn delete(&self, date: NaiveDate) -> Result<bool> {
        let key = paths::date_key(date);
        let wt = self
            .db
            .begin_write()
            .map_err(|e| HallError::Store(e.to_string()))?;
        let removed = {
            let mut table = wt
                .open_table(SCHEDULES)
                .map_err(|e| HallError::Store(e.to_string()))?;
            let old = table
                .remove(key.as_str())
                .map_err(|e| HallError::Store(e.to_string()))?;
            old.is_some()
        };
        wt.commit().map_err(|e| HallError::Store(e.to_string()))?;
        if removed {
            tracing::info!(date = %key, "schedule deleted");
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<Schedule>> {
        let rt = self
            .db
            .begin_read()
            .map_err(|e| HallError::Store(e.to_string()))?;
        let table = rt
            .open_table(SCHEDULES)
            .map_err(|e| HallError::Store(e.to_string()))?;

        let mut result = Vec::new();
        for entry in table.iter().map_err(|e| HallError::Store(e.to_string()))? {
            let (_, v) = entry.map_err(|e| HallError::Store(e.to_string()))?;
            result.push(Self::decode(v.value())?);
        }
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
