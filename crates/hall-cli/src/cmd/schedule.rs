use crate::cmd::{open_store, resolve_date, session};
use crate::output::{cell, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hall_core::{
    auth::Session,
    paths::date_key,
    rotation::Hour,
    schedule::Schedule,
    slot::Role,
    store::{self, ScheduleStore},
    HallError,
};
use std::path::Path;

#[derive(Subcommand)]
pub enum ScheduleSubcommand {
    /// Show the schedule for a date as a two-column, 12-row table
    Show {
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Assign the primary for an hour and save
    Set {
        /// Hour of day, 0-23
        hour: u32,
        /// Staff name from the roster
        name: String,
        #[arg(long)]
        date: Option<String>,
        /// Accept a name that is not on the roster
        #[arg(long)]
        force: bool,
    },
    /// Remove the primary for an hour and save
    Unset {
        hour: u32,
        #[arg(long)]
        date: Option<String>,
    },
    /// Reset every hour to empty and save
    Clear {
        #[arg(long)]
        date: Option<String>,
    },
    /// Check a stored schedule for structural problems
    Validate {
        #[arg(long)]
        date: Option<String>,
    },
    /// List stored schedules
    List,
    /// Delete the stored schedule for a date
    Delete {
        #[arg(long)]
        date: Option<String>,
    },
    /// Show every hour and role a staff member covers
    Mine {
        #[arg(long)]
        date: Option<String>,
        /// Staff name; defaults to the staff member linked to the logged-in account
        #[arg(long)]
        name: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: ScheduleSubcommand, json: bool) -> anyhow::Result<()> {
    let session = session::require(root)?;
    match subcmd {
        ScheduleSubcommand::Show { date } => show(root, date.as_deref(), json),
        ScheduleSubcommand::Set {
            hour,
            name,
            date,
            force,
        } => set(root, &session, hour, &name, date.as_deref(), force, json),
        ScheduleSubcommand::Unset { hour, date } => {
            set(root, &session, hour, "", date.as_deref(), false, json)
        }
        ScheduleSubcommand::Clear { date } => clear(root, &session, date.as_deref(), json),
        ScheduleSubcommand::Validate { date } => validate(root, date.as_deref(), json),
        ScheduleSubcommand::List => list(root, json),
        ScheduleSubcommand::Delete { date } => delete(root, &session, date.as_deref(), json),
        ScheduleSubcommand::Mine { date, name } => {
            mine(root, &session, date.as_deref(), name.as_deref(), json)
        }
    }
}

fn show(root: &Path, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let date = resolve_date(date)?;
    let (_, store) = open_store(root)?;
    let schedule = store::load_or_empty(store.as_ref(), date)
        .with_context(|| format!("failed to load schedule for {date}"))?;

    if json {
        return print_json(&schedule);
    }
    print_schedule(&schedule);
    Ok(())
}

fn print_schedule(schedule: &Schedule) {
    let stored = if schedule.id.is_some() {
        schedule.status.to_string()
    } else {
        "not saved".to_string()
    };
    let date = schedule.date.map(date_key).unwrap_or_default();
    println!("Schedule {date} ({stored})");
    println!();

    let mut headers = vec!["HOUR"];
    headers.extend(Role::all().iter().map(|r| r.local_label()));
    headers.push("HOUR");
    headers.extend(Role::all().iter().map(|r| r.local_label()));

    let rows: Vec<Vec<String>> = Schedule::rows()
        .into_iter()
        .map(|(left, right)| {
            let mut row = slot_cells(schedule, left);
            row.extend(slot_cells(schedule, right));
            row
        })
        .collect();
    print_table(&headers, rows);
}

fn slot_cells(schedule: &Schedule, hour: Hour) -> Vec<String> {
    let mut cells = vec![hour.to_string()];
    if let Some(slot) = schedule.slot(hour) {
        cells.extend(Role::all().iter().map(|r| cell(slot.get(*r))));
    }
    cells
}

fn set(
    root: &Path,
    session: &Session,
    hour: u32,
    name: &str,
    date: Option<&str>,
    force: bool,
    json: bool,
) -> anyhow::Result<()> {
    session.require_admin("edit schedules")?;
    let hour = Hour::new(hour)?;
    let date = resolve_date(date)?;
    let (config, store) = open_store(root)?;
    if !force {
        config.check_staff(name)?;
    }

    let current = store::load_or_empty(store.as_ref(), date)?;
    let updated = current.set_primary(hour, name)?;
    let saved = store::save(store.as_ref(), &updated)
        .with_context(|| format!("failed to save schedule for {date}"))?;

    if json {
        print_json(&saved)?;
    } else if name.is_empty() {
        println!("Cleared {hour} primary for {date}.");
    } else {
        println!("Set {hour} primary to {name} for {date}.");
    }
    Ok(())
}

fn clear(root: &Path, session: &Session, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    session.require_admin("clear schedules")?;
    let date = resolve_date(date)?;
    let (_, store) = open_store(root)?;

    let current = store::load_or_empty(store.as_ref(), date)?;
    let saved = store::save(store.as_ref(), &current.clear())
        .with_context(|| format!("failed to save schedule for {date}"))?;

    if json {
        print_json(&saved)?;
    } else {
        println!("Cleared all hours for {date}.");
    }
    Ok(())
}

fn fetch_stored(store: &dyn ScheduleStore, date: chrono::NaiveDate) -> anyhow::Result<Schedule> {
    store
        .fetch_by_date(date)?
        .ok_or_else(|| HallError::ScheduleNotFound(date_key(date)).into())
}

fn validate(root: &Path, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    let date = resolve_date(date)?;
    let (_, store) = open_store(root)?;
    let schedule = fetch_stored(store.as_ref(), date)?;
    let result = schedule.validate();

    if json {
        print_json(&serde_json::json!({
            "date": date_key(date),
            "valid": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        }))?;
    } else if result.is_ok() {
        println!("Schedule for {date} is valid.");
    }
    result.with_context(|| format!("schedule for {date} failed validation"))
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let (_, store) = open_store(root)?;
    let schedules = store.list().context("failed to list schedules")?;

    if json {
        let items: Vec<serde_json::Value> = schedules
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "date": s.date,
                    "status": s.status.to_string(),
                    "assigned_hours": assigned_hours(s),
                    "updated_at": s.updated_at,
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if schedules.is_empty() {
        println!("No schedules.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = schedules
        .iter()
        .map(|s| {
            vec![
                s.date.map(date_key).unwrap_or_default(),
                s.status.to_string(),
                assigned_hours(s).to_string(),
                s.updated_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["DATE", "STATUS", "ASSIGNED", "UPDATED"], rows);
    Ok(())
}

fn assigned_hours(schedule: &Schedule) -> usize {
    schedule
        .slots
        .iter()
        .filter(|s| !s.primary.is_empty())
        .count()
}

fn delete(root: &Path, session: &Session, date: Option<&str>, json: bool) -> anyhow::Result<()> {
    session.require_admin("delete schedules")?;
    let date = resolve_date(date)?;
    let (_, store) = open_store(root)?;
    if !store.delete(date)? {
        return Err(HallError::ScheduleNotFound(date_key(date)).into());
    }

    if json {
        print_json(&serde_json::json!({ "date": date_key(date), "deleted": true }))?;
    } else {
        println!("Deleted schedule for {date}.");
    }
    Ok(())
}

fn mine(
    root: &Path,
    session: &Session,
    date: Option<&str>,
    name: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let date = resolve_date(date)?;
    let Some(name) = name.or(session.user.staff.as_deref()) else {
        anyhow::bail!(
            "account '{}' is not linked to a staff member: pass --name",
            session.user.username
        );
    };
    let (_, store) = open_store(root)?;
    let schedule = store::load_or_empty(store.as_ref(), date)?;
    let assignments = schedule.assignments_for(name);

    if json {
        print_json(&serde_json::json!({
            "date": date_key(date),
            "name": name,
            "assignments": assignments,
        }))?;
        return Ok(());
    }

    if assignments.is_empty() {
        println!("No assignments for {name} on {date}.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = assignments
        .iter()
        .map(|a| {
            vec![
                a.hour.to_string(),
                a.role.to_string(),
                a.role.local_label().to_string(),
            ]
        })
        .collect();
    print_table(&["HOUR", "ROLE", "LABEL"], rows);
    Ok(())
}
