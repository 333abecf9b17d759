//! Integration tests for the persistent registry.

use std::fs;

use filevault::errors::FileVaultError;
use filevault::vault::{RegistryStore, MAX_ENTRIES};
use tempfile::TempDir;

/// Helper: a registry inside a fresh temp dir, managed files alongside it.
fn store(dir: &TempDir) -> RegistryStore {
    RegistryStore::load(&dir.path().join("vault.txt"), dir.path(), MAX_ENTRIES)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn add_creates_empty_file_and_persists() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    store.add_entry("notes.txt", "pw").unwrap();

    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), b"");
    assert_eq!(
        fs::read_to_string(dir.path().join("vault.txt")).unwrap(),
        "notes.txt pw\n"
    );
}

#[test]
fn duplicate_registration_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    store.add_entry("a.txt", "one").unwrap();
    let err = store.add_entry("a.txt", "two").unwrap_err();

    assert!(matches!(err, FileVaultError::AlreadyExists(ref n) if n == "a.txt"));
    assert_eq!(store.len(), 1);
    assert!(store.verify_password("a.txt", "one").unwrap());
}

#[test]
fn registration_beyond_capacity_fails() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    for i in 0..MAX_ENTRIES {
        store.add_entry(&format!("f{i}.txt"), "pw").unwrap();
    }
    let err = store.add_entry("one-too-many.txt", "pw").unwrap_err();

    assert!(matches!(err, FileVaultError::VaultFull(100)));
    assert_eq!(store.len(), 100);
    assert!(!dir.path().join("one-too-many.txt").exists());
}

#[test]
fn capacity_is_checked_before_duplicates() {
    let dir = TempDir::new().unwrap();
    let mut store = RegistryStore::load(&dir.path().join("vault.txt"), dir.path(), 1);

    store.add_entry("a.txt", "pw").unwrap();
    assert!(matches!(
        store.add_entry("a.txt", "pw"),
        Err(FileVaultError::VaultFull(1))
    ));
}

#[test]
fn create_failure_leaves_registry_untouched() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-dir");
    let mut store = RegistryStore::load(&dir.path().join("vault.txt"), &missing, MAX_ENTRIES);

    let err = store.add_entry("a.txt", "pw").unwrap_err();

    assert!(matches!(err, FileVaultError::CreateError { .. }));
    assert!(store.is_empty());
    assert!(!dir.path().join("vault.txt").exists());
}

#[test]
fn invalid_fields_are_rejected_not_truncated() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    let long = "x".repeat(100);
    assert!(matches!(
        store.add_entry(&long, "pw"),
        Err(FileVaultError::InvalidField { field: "filename", .. })
    ));
    assert!(matches!(
        store.add_entry("a.txt", &long),
        Err(FileVaultError::InvalidField { field: "password", .. })
    ));
    assert!(store.add_entry("has space.txt", "pw").is_err());
    assert!(store.add_entry("a.txt", "").is_err());
    assert!(store.is_empty());
}

#[test]
fn registry_file_name_is_reserved() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    store.add_entry("a.txt", "pw").unwrap();
    assert!(matches!(
        store.add_entry("vault.txt", "pw"),
        Err(FileVaultError::InvalidField { .. })
    ));
    assert_eq!(
        fs::read_to_string(dir.path().join("vault.txt")).unwrap(),
        "a.txt pw\n"
    );
}

#[test]
fn scratch_config_and_audit_names_are_reserved() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    store.add_entry("a.txt", "pw").unwrap();

    fs::write(dir.path().join(".filevault.toml"), "undo_capacity = 7\n").unwrap();
    fs::write(dir.path().join(".filevault-audit.db"), b"history").unwrap();

    for name in [
        ".vault.txt.tmp",
        ".filevault.toml",
        ".filevault-audit.db",
        ".filevault-audit.db-journal",
    ] {
        assert!(
            matches!(
                store.add_entry(name, "pw"),
                Err(FileVaultError::InvalidField { field: "filename", .. })
            ),
            "{name} should be rejected"
        );
    }

    assert_eq!(store.len(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join(".filevault.toml")).unwrap(),
        "undo_capacity = 7\n"
    );
    assert_eq!(fs::read(dir.path().join(".filevault-audit.db")).unwrap(), b"history");
    assert!(!dir.path().join(".vault.txt.tmp").exists());
}

#[test]
fn capacity_is_checked_before_field_validation() {
    let dir = TempDir::new().unwrap();
    let mut store = RegistryStore::load(&dir.path().join("vault.txt"), dir.path(), 1);

    store.add_entry("a.txt", "pw").unwrap();
    assert!(matches!(
        store.add_entry("has space.txt", "pw"),
        Err(FileVaultError::VaultFull(1))
    ));
}

// ---------------------------------------------------------------------------
// Passwords
// ---------------------------------------------------------------------------

#[test]
fn verify_reports_missing_entries() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);

    assert!(matches!(
        store.verify_password("ghost.txt", ""),
        Err(FileVaultError::NotFound(_))
    ));
}

#[test]
fn verify_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    store.add_entry("a.txt", "Secret").unwrap();

    assert!(store.verify_password("a.txt", "Secret").unwrap());
    assert!(!store.verify_password("a.txt", "secret").unwrap());
    // An empty password only proves existence.
    assert!(!store.verify_password("a.txt", "").unwrap());
}

#[test]
fn failed_change_attempts_keep_original_password() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    store.add_entry("a.txt", "orig").unwrap();

    for attempt in ["nope", "ORIG", "orig2", ""] {
        assert!(matches!(
            store.change_password("a.txt", attempt, "new"),
            Err(FileVaultError::WrongPassword)
        ));
    }

    assert!(store.verify_password("a.txt", "orig").unwrap());
    assert!(!store.verify_password("a.txt", "new").unwrap());
}

#[test]
fn change_password_swaps_old_for_new() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    store.add_entry("a.txt", "old").unwrap();

    store.change_password("a.txt", "old", "new").unwrap();

    assert!(store.verify_password("a.txt", "new").unwrap());
    assert!(!store.verify_password("a.txt", "old").unwrap());
    assert_eq!(
        fs::read_to_string(dir.path().join("vault.txt")).unwrap(),
        "a.txt new\n"
    );
}

#[test]
fn change_password_on_unknown_file() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);

    assert!(matches!(
        store.change_password("ghost.txt", "a", "b"),
        Err(FileVaultError::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn reload_preserves_every_entry() {
    let dir = TempDir::new().unwrap();
    let mut store = store(&dir);
    store.add_entry("a.txt", "pa").unwrap();
    store.add_entry("b.txt", "pb").unwrap();
    store.change_password("b.txt", "pb", "pb2").unwrap();

    let reloaded = self::store(&dir);

    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.filenames().collect::<Vec<_>>(), vec!["a.txt", "b.txt"]);
    assert!(reloaded.verify_password("a.txt", "pa").unwrap());
    assert!(reloaded.verify_password("b.txt", "pb2").unwrap());
    assert!(!reloaded.verify_password("b.txt", "pb").unwrap());
}

#[test]
fn missing_registry_loads_empty() {
    let dir = TempDir::new().unwrap();
    assert!(store(&dir).is_empty());
}

#[test]
fn garbage_registry_loads_without_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vault.txt"), [0xff, 0xfe, 0x00, 0x01]).unwrap();
    assert!(store(&dir).is_empty());

    fs::write(dir.path().join("vault.txt"), "lonely-token\n").unwrap();
    assert!(store(&dir).is_empty());
}

#[cfg(unix)]
#[test]
fn registry_write_failure_keeps_memory_change() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let reg_dir = dir.path().join("reg");
    let data_dir = dir.path().join("data");
    fs::create_dir_all(&reg_dir).unwrap();
    fs::create_dir_all(&data_dir).unwrap();

    let mut store = RegistryStore::load(&reg_dir.join("vault.txt"), &data_dir, MAX_ENTRIES);
    fs::set_permissions(&reg_dir, fs::Permissions::from_mode(0o500)).unwrap();

    // Root ignores directory permissions; nothing to observe then.
    if fs::write(reg_dir.join("write-test"), b"x").is_ok() {
        return;
    }

    let err = store.add_entry("a.txt", "pw").unwrap_err();
    fs::set_permissions(&reg_dir, fs::Permissions::from_mode(0o700)).unwrap();

    assert!(matches!(err, FileVaultError::RegistryWriteFailed { .. }));
    assert!(store.contains("a.txt"));
    assert!(!reg_dir.join("vault.txt").exists());
}
