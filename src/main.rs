mod args;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use args::ScheduleArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coursesched")]
#[command(about = "Generate weekly schedule files for a course syllabus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one file per week plus an index file
    Generate {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Directory to write into (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Show which files would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the computed weeks and meeting dates without writing anything
    Preview {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Create a config file with every option commented out
    Init {
        /// Where to create it (default: ~/.config/coursesched/config.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schedule,
            output_dir,
            dry_run,
        } => {
            let mut config = schedule.resolve()?;
            if output_dir.is_some() {
                config.output_dir = output_dir;
            }
            commands::generate::run(&config, dry_run)
        }
        Commands::Preview { schedule } => {
            let config = schedule.resolve()?;
            commands::preview::run(&config)
        }
        Commands::Init { path, force } => commands::init::run(path, force),
    }
}
