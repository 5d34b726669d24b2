use anyhow::Context;
use hall_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, venue: Option<&str>) -> anyhow::Result<()> {
    let venue = venue.map(str::to_string).unwrap_or_else(|| {
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "hall".to_string())
    });

    println!("Initializing hall in: {}", root.display());

    for dir in [paths::HALL_DIR, paths::SCHEDULES_DIR] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let config_path = paths::config_path(root);
    if !config_path.exists() {
        let cfg = Config::new(&venue);
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: {}", paths::CONFIG_FILE);
    } else {
        println!("  exists:  {}", paths::CONFIG_FILE);
    }

    Ok(())
}
