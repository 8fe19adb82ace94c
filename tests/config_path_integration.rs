//! Loading through the default config location. Kept in its own test binary
//! because it sets process environment variables.

use gerrit_trigger::infra::app_config::{AppConfig, ConfigError, load_config};

#[test]
fn default_location_reports_broken_config() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");

    // SAFETY: this is the only test in this binary touching the environment.
    unsafe {
        std::env::set_var("GERRIT_TRIGGER_CONFIG_PATH", &path);
    }
    assert_eq!(load_config()?, AppConfig::default());

    std::fs::write(&path, "[[servers]]\nname = \"review\"\ncategories = 3\n")?;
    let err = load_config().unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
    Ok(())
}
