use owo_colors::OwoColorize;
use std::error::Error;
use std::path::PathBuf;
use twindeck::config::Config;
use twindeck::library::{scan_directory, track_title};

pub fn handle_list(dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let dir = match dir {
        Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
        None => config.music_dir_path().unwrap_or_else(|| PathBuf::from(".")),
    };

    let files = scan_directory(&dir, config.show_hidden)?;
    if files.is_empty() {
        println!("{} No audio files in {}", "Note:".yellow(), dir.display());
        return Ok(());
    }

    for (index, path) in files.iter().enumerate() {
        println!("{:>3}  {}", (index + 1).dimmed(), track_title(path));
    }
    println!();
    println!("{} tracks", files.len().bold());

    Ok(())
}
