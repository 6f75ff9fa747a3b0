//! docbot command line interface.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docbot", version, about = "Record narrated terminal documentation videos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record every scene of a project.
    Record {
        /// Project root directory.
        project: PathBuf,
    },
    /// Synthesize narration audio for a project.
    Narrate {
        project: PathBuf,
    },
    /// Convert, render and concatenate a project's final video.
    Render {
        project: PathBuf,
        /// Where to write the final video (default: <project>/final.mp4).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the whole pipeline: record, narrate, render.
    Video {
        project: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay one instruction file inside a pty (used under the terminal
    /// recorder).
    Run {
        /// Instruction file with `commands` and `expect` lists.
        instructions: PathBuf,
    },
    /// Check that the required external tools are installed.
    Doctor,
    /// Show or edit configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current configuration as TOML.
    Show,
    /// Open the configuration file in $EDITOR.
    Edit,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Record { project } => commands::record::handle(&project),
        Command::Narrate { project } => commands::narrate::handle(&project),
        Command::Render { project, output } => commands::render::handle(&project, output),
        Command::Video { project, output } => commands::video::handle(&project, output),
        Command::Run { instructions } => commands::run::handle(&instructions),
        Command::Doctor => commands::doctor::handle(),
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Edit => commands::config::handle_edit(),
        },
    }
}
