pub mod config;
pub mod init;
pub mod roster;
pub mod schedule;
pub mod serve;
pub mod session;

use anyhow::Context;
use chrono::NaiveDate;
use hall_core::{config::Config, schedule::parse_date, store, store::ScheduleStore};
use std::path::Path;

/// Load the config and open the schedule store it selects.
pub fn open_store(root: &Path) -> anyhow::Result<(Config, Box<dyn ScheduleStore>)> {
    let config = Config::load(root).context("failed to load config")?;
    let store = store::open(root, &config).context("failed to open schedule store")?;
    Ok((config, store))
}

/// `--date` value, or today's local date when omitted.
pub fn resolve_date(date: Option<&str>) -> anyhow::Result<NaiveDate> {
    match date {
        Some(d) => Ok(parse_date(d)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
