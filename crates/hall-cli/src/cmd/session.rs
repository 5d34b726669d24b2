use crate::output::print_json;
use anyhow::Context;
use hall_core::{auth, auth::Session, config::Config};
use std::path::Path;

/// The stored session, required by every command that reads or edits schedules.
pub fn require(root: &Path) -> anyhow::Result<Session> {
    Ok(Session::load(root)?)
}

pub fn login(root: &Path, username: &str, password: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let session = auth::authenticate(&config, username, password)?;
    session.save(root).context("failed to write session")?;

    if json {
        print_json(&session.user)?;
    } else {
        println!(
            "Logged in as {} ({}).",
            session.user.display_name, session.user.role
        );
    }
    Ok(())
}

pub fn logout(root: &Path) -> anyhow::Result<()> {
    if Session::clear(root).context("failed to remove session")? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami(root: &Path, json: bool) -> anyhow::Result<()> {
    let session = require(root)?;
    if json {
        print_json(&session.user)?;
    } else {
        println!(
            "{} ({}, {})",
            session.user.display_name, session.user.username, session.user.role
        );
    }
    Ok(())
}
