use tempfile::TempDir;

#[test]
fn test_config_lifecycle() {
    // Create a temporary directory for test config
    let temp_dir = TempDir::new().unwrap();

    // Override the config path for testing
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    }

    // Test that config doesn't exist initially
    assert!(!twindeck::config::Config::exists().unwrap());

    // Loading without a file gives defaults
    let defaults = twindeck::config::Config::load().unwrap();
    assert_eq!(defaults, twindeck::config::Config::new());

    // Create and save a config
    let mut config = twindeck::config::Config::new();
    config.set_value("music_dir", "~/Music/Albums").unwrap();
    config.set_value("sample_rate", "44100").unwrap();
    config.save().unwrap();

    // Verify it exists now
    assert!(twindeck::config::Config::exists().unwrap());

    // Load and verify values
    let loaded = twindeck::config::Config::load().unwrap();
    assert_eq!(loaded.music_dir.as_deref(), Some("~/Music/Albums"));
    assert_eq!(loaded.sample_rate, Some(44_100));
    assert_eq!(loaded.channels, None);

    // Clearing an optional key persists too
    let mut config = twindeck::config::Config::load().unwrap();
    config.set_value("sample_rate", "").unwrap();
    config.save().unwrap();
    let reloaded = twindeck::config::Config::load().unwrap();
    assert_eq!(reloaded.sample_rate, None);

    // Test invalid key
    let mut config = twindeck::config::Config::load().unwrap();
    assert!(config.set_value("invalid_key", "value").is_err());
}
