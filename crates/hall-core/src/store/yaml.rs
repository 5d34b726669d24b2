use super::{required_date, stamp, ScheduleStore};
use crate::error::{HallError, Result};
use crate::paths;
use crate::schedule::Schedule;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// File-backed store: `.hall/schedules/<YYYY-MM-DD>.yaml` per date.
pub struct YamlStore {
    root: PathBuf,
}

impl YamlStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(path: &Path) -> Result<Schedule> {
        let data = std::fs::read_to_string(path)?;
        let schedule: Schedule = serde_yaml::from_str(&data)?;
        schedule.rederived()
    }
}

impl ScheduleStore for YamlStore {
    fn fetch_by_date(&self, date: NaiveDate) -> Result<Option<Schedule>> {
        let path = paths::schedule_manifest(&self.root, date);
        if !path.exists() {
            tracing::debug!(date = %date, "no schedule manifest");
            return Ok(None);
        }
        Self::read(&path).map(Some)
    }

    fn upsert(&self, schedule: &Schedule) -> Result<String> {
        schedule.validate()?;
        let date = required_date(schedule)?;
        let existing = self.fetch_by_date(date)?;
        let record = stamp(existing.as_ref(), schedule);

        let data = serde_yaml::to_string(&record)?;
        crate::io::atomic_write(&paths::schedule_manifest(&self.root, date), data.as_bytes())?;

        let id = record
            .id
            .ok_or_else(|| HallError::Store("record written without an id".to_string()))?;
        tracing::info!(date = %date, id = %id, "schedule saved");
        Ok(id)
    }

    fn delete(&self, date: NaiveDate) -> Result<bool> {
        let removed = crate::io::remove_if_exists(&paths::schedule_manifest(&self.root, date))?;
        if removed {
            tracing::info!(date = %date, "schedule deleted");
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<Schedule>> {
        let dir = paths::schedules_dir(&self.root);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut schedules = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file()
                && path.extension().is_some_and(|ext| ext == "yaml")
            {
                schedules.push(Self::read(&path)?);
            }
        }
        schedules.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(schedules)
    }
}
