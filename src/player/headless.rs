//! Line-oriented front end: plays immediately and reads one-letter commands
//! from stdin.

use log::{error, info, warn};
use owo_colors::OwoColorize;
use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use twindeck::config::Config;
use twindeck::engine::{Engine, OutputDriver, PlayerError};
use twindeck::library::{scan_directory, track_title};

use super::{Target, init_logging, resolve_target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Next,
    Previous,
    Stop,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "" | "q" | "quit" => Some(Command::Quit),
        "p" | "pause" => Some(Command::Pause),
        "n" | "next" => Some(Command::Next),
        "b" | "back" | "prev" => Some(Command::Previous),
        "s" | "stop" => Some(Command::Stop),
        _ => None,
    }
}

fn print_help() {
    println!(
        "{}  p pause  n next  b previous  s stop  q quit (Enter on an empty line quits)",
        "Commands:".bold()
    );
}

pub fn run_headless(path: Option<&str>) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    init_logging(&config)?;
    info!("Starting twindeck in headless mode");

    let target = resolve_target(path, &config)?;
    let mut engine = Engine::with_default_device(config.sample_rate, config.channels)?;

    let started = match &target {
        Target::File(file) => engine.play_file(file),
        Target::Directory(dir) => {
            let files = scan_directory(dir, config.show_hidden)?;
            engine.play_playlist(&files)
        }
    };
    match started {
        Ok(()) => {}
        Err(PlayerError::EmptyPlaylist) => {
            println!(
                "{} No audio files in {}",
                "Note:".yellow(),
                target.directory().display()
            );
            engine.shutdown()?;
            return Ok(());
        }
        Err(e) => println!("{} {e}", "Error:".red()),
    }

    print_help();

    let (lines_tx, lines_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if lines_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut shown: Option<PathBuf> = None;
    loop {
        announce_track(&engine, &mut shown);
        if let Some(e) = engine.take_preload_failure() {
            warn!("Preload failed: {e}");
            println!("{} {e}", "Warning:".yellow());
        }

        match lines_rx.recv_timeout(Duration::from_millis(200)) {
            Ok(line) => match parse_command(&line) {
                Some(Command::Quit) => break,
                Some(command) => {
                    if let Err(e) = apply(&mut engine, command) {
                        println!("{} {e}", "Error:".red());
                    }
                }
                None => print_help(),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // stdin closed
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    engine.shutdown()?;
    info!("twindeck headless mode exited");
    Ok(())
}

fn apply<D: OutputDriver>(engine: &mut Engine<D>, command: Command) -> Result<(), PlayerError> {
    match command {
        Command::Pause => {
            let paused = engine.toggle_pause();
            println!("{}", if paused { "||" } else { "|>" });
            Ok(())
        }
        Command::Next => engine.skip_next(),
        Command::Previous => engine.skip_previous(),
        Command::Stop => engine.stop(),
        Command::Quit => Ok(()),
    }
    .inspect_err(|e| error!("{command:?} failed: {e}"))
}

fn announce_track<D: OutputDriver>(engine: &Engine<D>, shown: &mut Option<PathBuf>) {
    let status = engine.status();
    if status.current_path == *shown {
        return;
    }

    match &status.current_path {
        Some(path) => {
            let position = status
                .current_index
                .map(|index| format!(" [{}/{}]", index + 1, status.playlist_length))
                .unwrap_or_default();
            info!("Now playing: {}", track_title(path));
            println!("{} {}{}", "Now playing:".green(), track_title(path), position);
        }
        None => println!("{}", "Stopped".dimmed()),
    }
    *shown = status.current_path;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("p"), Some(Command::Pause));
        assert_eq!(parse_command(" next \n"), Some(Command::Next));
        assert_eq!(parse_command("b"), Some(Command::Previous));
        assert_eq!(parse_command("s"), Some(Command::Stop));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command(""), Some(Command::Quit));
        assert_eq!(parse_command("volume up"), None);
    }
}
