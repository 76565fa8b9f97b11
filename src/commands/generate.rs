use anyhow::{Context, Result};
use coursesched_core::config::SchedConfig;
use owo_colors::OwoColorize;

pub fn run(config: &SchedConfig, dry_run: bool) -> Result<()> {
    let schedule = config.schedule()?;
    let generator = config.generator();
    let output_dir = config.output_dir();

    if dry_run {
        let files = generator.render(&schedule)?;
        for file in &files {
            println!(
                "{} {}",
                "Would write".yellow(),
                output_dir.join(&file.name).display()
            );
        }
        return Ok(());
    }

    let written = generator
        .write(&schedule, &output_dir, |path| {
            println!("{} {}", "Wrote".green(), path.display());
        })
        .with_context(|| format!("Generation into {} stopped", output_dir.display()))?;

    println!(
        "\nGenerated {} week files and {}",
        written.len() - 1,
        config.layout.index_name.bold()
    );

    Ok(())
}
