//! twindeck - a terminal audio player.
//!
//! Point it at a music directory and it plays the directory as a playlist,
//! preloading the upcoming track while the current one plays. A single file
//! can be played on its own. The terminal UI lists the directory and drives
//! the transport; headless mode reads one-letter commands from stdin.

use clap::{CommandFactory, Parser, Subcommand, builder::PossibleValuesParser};
use clap_complete::{Generator, Shell, generate};
use std::error::Error;
use std::io;

mod cli;
mod player;

#[derive(Parser)]
#[command(name = "twindeck")]
#[command(about = "Terminal audio player with gap-reducing track preloading")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a directory as a playlist, or a single file
    Play {
        /// File or directory (defaults to the configured music_dir, then ".")
        path: Option<String>,
        /// Skip the terminal UI and read commands from stdin
        #[arg(long)]
        headless: bool,
    },
    /// Print the playlist a directory would produce
    List {
        /// Directory to scan (defaults to the configured music_dir, then ".")
        dir: Option<String>,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// View current configuration
    View,
    /// Set a configuration value (an empty value clears optional keys)
    Set {
        /// Configuration key
        #[arg(value_parser = PossibleValuesParser::new(twindeck::config::Config::keys().iter().copied()))]
        key: String,
        /// Configuration value
        value: String,
    },
    /// Edit configuration file in your editor
    Edit,
    /// Print the configuration file location
    Path,
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { path, headless } => {
            cli::play::handle_play(path.as_deref(), headless)?;
        }
        Commands::List { dir } => {
            cli::list::handle_list(dir.as_deref())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::View => {
                cli::config::handle_config_view()?;
            }
            ConfigAction::Set { key, value } => {
                cli::config::handle_config_set(&key, &value)?;
            }
            ConfigAction::Edit => {
                cli::config::handle_config_edit()?;
            }
            ConfigAction::Path => {
                cli::config::handle_config_path()?;
            }
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
    }

    Ok(())
}
