use oximeter_dashboard::config::io::ConfigIO;
use oximeter_dashboard::config::types::{Config, ThemeMode};
use tempfile::TempDir;

#[tokio::test]
async fn dark_theme_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oximeter-dashboard.json");

    {
        let config_io = ConfigIO::open_sync(&path).unwrap();
        let mut config = config_io.read().await.unwrap();
        assert_eq!(config.theme_or_default(), ThemeMode::Light);

        config.theme = Some(ThemeMode::Dark);
        config_io.save(config).await.unwrap();
    }

    // a new handle, as if the application was started again
    let config_io = ConfigIO::open_sync(&path).unwrap();
    let config = config_io.read().await.unwrap();
    assert_eq!(config.theme_or_default(), ThemeMode::Dark);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#""theme": "dark""#), "{}", content);
}

#[tokio::test]
async fn switching_back_to_light_is_stored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oximeter-dashboard.json");
    let config_io = ConfigIO::open_sync(&path).unwrap();

    config_io.save(Config { theme: Some(ThemeMode::Dark) }).await.unwrap();
    config_io.save(Config { theme: Some(ThemeMode::Light) }).await.unwrap();

    assert_eq!(config_io.read().await.unwrap().theme, Some(ThemeMode::Light));
}
