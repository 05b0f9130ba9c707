use super::*;

#[test]
fn test_load_from_environment() {
    temp_env::with_vars(
        [
            ("MERIDIAN__DATABASE__URL", Some("postgres://localhost/meridian")),
            ("MERIDIAN__SERVER__PORT", Some("9090")),
            ("MERIDIAN__GEMINI__API_KEY", Some("test-key")),
        ],
        || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.database.url, "postgres://localhost/meridian");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.gemini.api_key, "test-key");
            assert_eq!(config.gemini.model, "gemini-2.5-flash");
            assert_eq!(config.export.timezone, "Asia/Seoul");
        },
    );
}

#[test]
fn test_load_requires_database_url() {
    temp_env::with_vars([("MERIDIAN__DATABASE__URL", None::<&str>)], || {
        assert!(AppConfig::load().is_err());
    });
}

#[test]
fn test_load_rejects_unknown_timezone() {
    temp_env::with_vars(
        [
            ("MERIDIAN__DATABASE__URL", Some("postgres://localhost/meridian")),
            ("MERIDIAN__EXPORT__TIMEZONE", Some("Mars/Olympus")),
        ],
        || {
            assert!(AppConfig::load().is_err());
        },
    );
}

#[test]
fn test_defaults() {
    let gemini = GeminiConfig::default();
    assert!(gemini.api_key.is_empty());
    assert_eq!(
        gemini.base_url,
        "https://generativelanguage.googleapis.com/v1"
    );

    let export = ExportConfig::default();
    assert_eq!(export.tz(), Ok(chrono_tz::Asia::Seoul));
    assert!(export.entity_name_prefix.is_none());
}
