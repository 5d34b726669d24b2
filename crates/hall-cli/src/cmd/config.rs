use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hall_core::config::{Config, StoreBackend, WarnLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the venue, store backend, roster, and accounts
    Show,

    /// Validate the config for common mistakes
    Validate,
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    // Passwords never leave the config file
    let accounts: Vec<serde_json::Value> = config
        .accounts
        .iter()
        .map(|a| {
            serde_json::json!({
                "username": a.username,
                "role": a.role,
                "display_name": a.display_name,
                "staff": a.staff,
            })
        })
        .collect();

    if json {
        print_json(&serde_json::json!({
            "venue": config.venue,
            "store": config.store,
            "roster": config.roster,
            "accounts": accounts,
        }))?;
        return Ok(());
    }

    let store = match config.store {
        StoreBackend::Yaml => "yaml",
        StoreBackend::Redb => "redb",
    };
    println!("Venue:  {}", config.venue);
    println!("Store:  {store}");
    println!("Roster: {}", config.roster.join(", "));
    println!();
    let rows: Vec<Vec<String>> = config
        .accounts
        .iter()
        .map(|a| {
            vec![
                a.username.clone(),
                a.role.to_string(),
                a.display_name.clone(),
                a.staff.as_deref().unwrap_or("-").to_string(),
            ]
        })
        .collect();
    print_table(&["USERNAME", "ROLE", "NAME", "STAFF"], rows);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    let has_errors = warnings.iter().any(|w| w.level == WarnLevel::Error);
    if has_errors {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
