//! Integration tests for the key store and field encryption.

use std::fs;

use passvault::crypto::{EncryptionKey, KeyOrigin, KeyStore, KEY_LEN};
use passvault::errors::VaultError;
use passvault::vault::{RecordFile, Vault};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Field encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn decrypt_encrypt_roundtrip_for_assorted_strings() {
    let store = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
    let long = "x".repeat(10_000);
    let samples = [
        "",
        "a",
        "S3cr3t!",
        "correct horse battery staple",
        "日本語のパスワード",
        "emoji 🔑🗝️",
        "quotes \" and \\ backslashes",
        "\u{0}nul byte",
        long.as_str(),
    ];

    for p in samples {
        let ct = store.encrypt_field(p).expect("encrypt");
        assert_eq!(store.decrypt_field(&ct).expect("decrypt"), p);
    }
}

#[test]
fn ciphertext_never_contains_plaintext() {
    let store = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
    let ct = store.encrypt_field("VerySecretValue").unwrap();
    assert!(!ct.contains("VerySecretValue"));
}

#[test]
fn malformed_ciphertexts_fail_with_decryption_error() {
    let store = KeyStore::with_key(&EncryptionKey::generate()).unwrap();
    for bad in ["", "@@@@", "AAAA", "plain-text-password"] {
        assert!(
            matches!(store.decrypt_field(bad), Err(VaultError::DecryptionFailed)),
            "{bad:?} should not decrypt"
        );
    }
}

// ---------------------------------------------------------------------------
// Key self-healing
// ---------------------------------------------------------------------------

#[test]
fn corrupt_key_is_regenerated_and_orphans_old_records() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("key.key");
    let records_path = dir.path().join("passwords.json");

    // First "process": store a password.
    let id = {
        let vault = Vault::new(
            KeyStore::open(&key_path).unwrap(),
            RecordFile::new(&records_path, true),
        );
        vault.add("example.com", "bob", "S3cr3t!", "").unwrap().id
    };

    // Corrupt the key file (wrong length).
    fs::write(&key_path, b"definitely not a key").unwrap();

    // Second "process": startup succeeds with a fresh key.
    let keys = KeyStore::open(&key_path).unwrap();
    assert_eq!(keys.origin(), KeyOrigin::Regenerated);
    assert_eq!(fs::read(&key_path).unwrap().len(), KEY_LEN);

    let vault = Vault::new(keys, RecordFile::new(&records_path, true));
    assert!(matches!(vault.get(&id), Err(VaultError::DecryptionFailed)));
    assert!(matches!(vault.search("example"), Err(VaultError::DecryptionFailed)));

    // The orphaned entry is still listed and can be deleted.
    assert_eq!(vault.list().unwrap().len(), 1);
    vault.delete(&id).unwrap();
    assert!(vault.list().unwrap().is_empty());
}

#[test]
fn replaced_key_of_valid_length_also_orphans_records() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("key.key");
    let records_path = dir.path().join("passwords.json");

    let vault = Vault::new(
        KeyStore::open(&key_path).unwrap(),
        RecordFile::new(&records_path, false),
    );
    let id = vault.add("site", "user", "pw", "").unwrap().id;
    drop(vault);

    fs::write(&key_path, [0x5Au8; KEY_LEN]).unwrap();

    let keys = KeyStore::open(&key_path).unwrap();
    assert_eq!(keys.origin(), KeyOrigin::Loaded);
    let vault = Vault::new(keys, RecordFile::new(&records_path, false));
    assert!(matches!(vault.get(&id), Err(VaultError::DecryptionFailed)));
}

#[test]
fn key_file_is_raw_32_bytes_and_stable_across_restarts() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("data").join("key.key");

    let first = KeyStore::open(&key_path).unwrap();
    assert_eq!(first.origin(), KeyOrigin::Created);
    let raw = fs::read(&key_path).unwrap();
    assert_eq!(raw.len(), KEY_LEN);

    let second = KeyStore::open(&key_path).unwrap();
    assert_eq!(second.origin(), KeyOrigin::Loaded);
    assert_eq!(fs::read(&key_path).unwrap(), raw);
}
