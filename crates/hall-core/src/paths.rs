use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const HALL_DIR: &str = ".hall";
pub const SCHEDULES_DIR: &str = ".hall/schedules";

pub const CONFIG_FILE: &str = ".hall/config.yaml";
pub const SESSION_FILE: &str = ".hall/session.yaml";
pub const DB_FILE: &str = ".hall/hall.redb";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn hall_dir(root: &Path) -> PathBuf {
    root.join(HALL_DIR)
}

pub fn schedules_dir(root: &Path) -> PathBuf {
    root.join(SCHEDULES_DIR)
}

pub fn schedule_manifest(root: &Path, date: NaiveDate) -> PathBuf {
    schedules_dir(root).join(format!("{}.yaml", date_key(date)))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn session_path(root: &Path) -> PathBuf {
    root.join(SESSION_FILE)
}

pub fn db_path(root: &Path) -> PathBuf {
    root.join(DB_FILE)
}

/// Canonical storage key for a date: `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_is_named_by_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let path = schedule_manifest(Path::new("/venue"), date);
        assert_eq!(path, PathBuf::from("/venue/.hall/schedules/2024-01-09.yaml"));
    }
}
