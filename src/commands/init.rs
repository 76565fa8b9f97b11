use std::path::PathBuf;

use anyhow::Result;
use coursesched_core::config::SchedConfig;
use owo_colors::OwoColorize;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => SchedConfig::default_path()?,
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\n\n\
            Use --force to overwrite it.",
            path.display()
        );
    }

    SchedConfig::create_default_config(&path)?;
    println!("{} {}", "Created".green(), path.display());

    Ok(())
}
