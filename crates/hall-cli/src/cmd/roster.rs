use crate::output::print_json;
use anyhow::Context;
use hall_core::config::Config;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;

    if json {
        return print_json(&config.roster);
    }
    if config.roster.is_empty() {
        println!("Roster is empty.");
        return Ok(());
    }
    for name in &config.roster {
        println!("{name}");
    }
    Ok(())
}
