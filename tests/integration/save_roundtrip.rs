//! Save semantics: only the override layer is ever persisted.

use super::test_utils::ConfigDirGuard;
use stratum::resources::{CONFIG_FILE_NAME, MASTER_CONFIG};
use stratum::{ConfigService, ConfigStore, SaveOutcome};
use tempfile::TempDir;

#[test]
fn test_save_flushes_in_memory_mutation() {
    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());
    let file = temp_dir.path().join(CONFIG_FILE_NAME);

    let service = ConfigService::new();
    service.load("stratum-it").unwrap();

    let config = service.get_config();
    assert!(config.set("logging.level", "trace"));
    assert_eq!(service.save().unwrap(), SaveOutcome::Saved(file.clone()));

    let on_disk = ConfigStore::from_file(&file).unwrap();
    assert_eq!(
        on_disk.get_string("logging.level").unwrap(),
        Some("trace".to_string())
    );
}

#[test]
fn test_save_preserves_user_keys() {
    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());
    let file = temp_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&file, "keep_me = \"yes\"\n").unwrap();

    let service = ConfigService::new();
    service.load("stratum-it").unwrap();
    service.get_config().set("added", 7i64);
    service.save().unwrap();

    let on_disk = ConfigStore::from_file(&file).unwrap();
    assert_eq!(
        on_disk.get_string("keep_me").unwrap(),
        Some("yes".to_string())
    );
    assert_eq!(on_disk.get_i64("added").unwrap(), Some(7));
}

#[test]
fn test_master_defaults_survive_override_save() {
    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());

    let service = ConfigService::new();
    service.load("stratum-it").unwrap();

    // Shadow a master key, persist, reload.
    service.get_config().set("logging.level", "debug");
    service.save().unwrap();
    service.load("stratum-it").unwrap();

    let config = service.get_config();
    assert_eq!(
        config.get_string("logging.level").unwrap(),
        Some("debug".to_string())
    );
    // Keys the override never shadowed still come from the master, which is
    // re-read from the embedded resource each load.
    assert_eq!(
        config.get_string("logging.format").unwrap(),
        Some("text".to_string())
    );
    let master = ConfigStore::from_str(MASTER_CONFIG, "master").unwrap();
    assert_eq!(
        master.get_string("logging.level").unwrap(),
        Some("info".to_string())
    );
}

#[test]
fn test_saved_file_round_trips_through_reload() {
    let temp_dir = TempDir::new().unwrap();
    let _env = ConfigDirGuard::set(temp_dir.path());

    let writer = ConfigService::new();
    writer.load("stratum-it").unwrap();
    writer.get_config().set("session.id", "abc123");
    writer.save().unwrap();

    // A separate service instance sees the persisted value.
    let reader = ConfigService::new();
    reader.load("stratum-it").unwrap();
    assert_eq!(
        reader.get_config().get_string("session.id").unwrap(),
        Some("abc123".to_string())
    );
}
