use owo_colors::OwoColorize;
use std::error::Error;
use std::process::Command;
use twindeck::config::Config;

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "(device default)".to_string())
}

pub fn handle_config_view() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    println!("Current twindeck configuration:");
    println!(
        "  music_dir: {}",
        config
            .music_dir
            .as_deref()
            .unwrap_or("(current directory)")
    );
    println!("  sample_rate: {}", show(config.sample_rate));
    println!("  channels: {}", show(config.channels));
    println!("  log_file: {}", config.log_file);
    println!("  log_level: {}", config.log_level);
    println!("  show_hidden: {}", config.show_hidden);

    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    config.set_value(key, value)?;
    config.save()?;

    println!("{} {key} = {value}", "Configuration updated:".green());

    Ok(())
}

pub fn handle_config_path() -> Result<(), Box<dyn Error>> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

pub fn handle_config_edit() -> Result<(), Box<dyn Error>> {
    // Write defaults first so the editor has something to show
    if !Config::exists()? {
        Config::new().save()?;
    }

    let config_path = Config::config_path()?;
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} in {}", config_path.display(), editor);

    let status = Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                format!("Editor '{editor}' not found. Set $EDITOR to a valid editor path.")
            } else {
                format!("Failed to launch editor '{editor}': {e}")
            }
        })?;

    if !status.success() {
        return Err(format!("Editor '{editor}' exited with error").into());
    }

    // Validate the config after editing
    match Config::load() {
        Ok(_) => println!("Configuration saved successfully"),
        Err(e) => {
            return Err(format!("Configuration validation failed: {e}").into());
        }
    }

    Ok(())
}
