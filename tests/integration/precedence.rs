//! Override-over-master precedence through the public service API.

use super::test_utils::ConfigDirGuard;
use stratum::resources::CONFIG_FILE_NAME;
use stratum::ConfigService;
use tempfile::TempDir;

#[test]
fn test_override_value_shadows_master_default() {
    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());
    std::fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        "[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let service = ConfigService::new();
    service.load("stratum-it").unwrap();
    let config = service.get_config();

    // The bundled master ships logging.level = "info"; the override wins.
    assert_eq!(
        config.get_string("logging.level").unwrap(),
        Some("debug".to_string())
    );
}

#[test]
fn test_master_supplies_keys_missing_from_override() {
    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "x = 1\n").unwrap();

    let service = ConfigService::new();
    service.load("stratum-it").unwrap();
    let config = service.get_config();

    assert_eq!(config.get_i64("x").unwrap(), Some(1));
    // Keys present only in the bundled master still resolve.
    assert_eq!(
        config.get_string("logging.format").unwrap(),
        Some("text".to_string())
    );
    assert_eq!(
        config.get_string("service.name").unwrap(),
        Some("stratum".to_string())
    );
}

#[test]
fn test_typed_section_lookup() {
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Logging {
        level: String,
        format: String,
    }

    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());

    let service = ConfigService::new();
    service.load("stratum-it").unwrap();

    // With a pristine override, the whole section comes from the master.
    let logging: Option<Logging> = service.get_config().get_as("logging").unwrap();
    assert_eq!(
        logging,
        Some(Logging {
            level: "info".to_string(),
            format: "text".to_string()
        })
    );
}
