//! Terminal front ends for the playback engine.

#[cfg(feature = "tui")]
pub mod app;
pub mod headless;
#[cfg(feature = "tui")]
pub mod ui;

use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use twindeck::config::Config;

pub use headless::run_headless;

#[cfg(feature = "tui")]
pub fn run(path: Option<&str>) -> Result<(), Box<dyn Error>> {
    app::run(path)
}

/// What the user asked to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Directory(PathBuf),
    File(PathBuf),
}

impl Target {
    /// Directory whose contents the player lists
    pub fn directory(&self) -> PathBuf {
        match self {
            Target::Directory(dir) => dir.clone(),
            Target::File(file) => file
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Resolve the command-line path, falling back to the configured music
/// directory and then the current directory.
pub fn resolve_target(path: Option<&str>, config: &Config) -> Result<Target, Box<dyn Error>> {
    let path = match path {
        Some(path) => PathBuf::from(shellexpand::tilde(path).as_ref()),
        None => config.music_dir_path().unwrap_or_else(|| PathBuf::from(".")),
    };

    let path = fs::canonicalize(&path)
        .map_err(|_| format!("No such file or directory: {}", path.display()))?;
    if path.is_dir() {
        Ok(Target::Directory(path))
    } else {
        Ok(Target::File(path))
    }
}

pub fn init_logging(config: &Config) -> Result<(), Box<dyn Error>> {
    use simplelog::*;

    CombinedLogger::init(vec![WriteLogger::new(
        config.log_level_filter()?,
        simplelog::Config::default(),
        File::create(config.log_file_path())?,
    )])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let file = root.join("one.wav");
        fs::write(&file, b"").unwrap();
        let config = Config::new();

        let dir = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(
            resolve_target(Some(&dir), &config).unwrap(),
            Target::Directory(root.clone())
        );

        let target = resolve_target(Some(&file.to_string_lossy()), &config).unwrap();
        assert_eq!(target, Target::File(file.clone()));
        assert_eq!(target.directory(), root);
    }

    #[test]
    fn test_resolve_uses_configured_music_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.music_dir = Some(temp_dir.path().to_string_lossy().to_string());

        assert_eq!(
            resolve_target(None, &config).unwrap(),
            Target::Directory(fs::canonicalize(temp_dir.path()).unwrap())
        );
    }

    #[test]
    fn test_resolve_missing_path() {
        assert!(resolve_target(Some("/nonexistent/album"), &Config::new()).is_err());
    }

    #[test]
    fn test_bare_file_lists_current_directory() {
        let target = Target::File(PathBuf::from("song.mp3"));
        assert_eq!(target.directory(), PathBuf::from("."));
    }
}
