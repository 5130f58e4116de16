//! Integration tests for master-password authentication.

use std::fs;

use passvault::auth::Authenticator;
use passvault::crypto::{Argon2Params, HashScheme};
use tempfile::TempDir;

fn authenticator() -> (TempDir, Authenticator) {
    let dir = TempDir::new().expect("create temp dir");
    let auth = Authenticator::new(&dir.path().join("master_password.hash"));
    (dir, auth)
}

#[test]
fn uninitialized_then_initialized() {
    let (_dir, auth) = authenticator();
    assert!(!auth.is_initialized());

    auth.set_master_password(b"hunter2").unwrap();
    assert!(auth.is_initialized());
}

#[test]
fn verify_true_only_for_the_set_password() {
    let (_dir, auth) = authenticator();
    assert!(!auth.verify(b"hunter2").unwrap(), "false before setup");

    auth.set_master_password(b"hunter2").unwrap();

    assert!(auth.verify(b"hunter2").unwrap());
    let wrong_passwords: [&[u8]; 5] = [b"hunter3", b"HUNTER2", b"hunter", b"hunter22", b""];
    for wrong in wrong_passwords {
        assert!(!auth.verify(wrong).unwrap());
    }
}

#[test]
fn salts_differ_between_installations() {
    let (_dir_a, a) = authenticator();
    let (_dir_b, b) = authenticator();
    a.set_master_password(b"same").unwrap();
    b.set_master_password(b"same").unwrap();

    let cred_a = a.load_credential().unwrap().unwrap();
    let cred_b = b.load_credential().unwrap().unwrap();
    assert_ne!(cred_a.salt, cred_b.salt);
    assert_ne!(cred_a.hash, cred_b.hash);
}

#[test]
fn credential_file_is_independent_json_object() {
    let (dir, auth) = authenticator();
    auth.set_master_password(b"pw").unwrap();

    let text = fs::read_to_string(dir.path().join("master_password.hash")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["hash"].as_str().unwrap().chars().all(|c| c.is_ascii_hexdigit()));
    assert!(value["salt"].as_str().unwrap().chars().all(|c| c.is_ascii_hexdigit()));

    // No key or records file is created by authentication.
    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["master_password.hash".to_string()]);
}

#[test]
fn argon2id_scheme_verifies() {
    let dir = TempDir::new().unwrap();
    let params = Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    };
    let auth = Authenticator::new(&dir.path().join("master_password.hash"))
        .with_scheme(HashScheme::Argon2id, params);

    auth.set_master_password(b"slow-and-steady").unwrap();
    assert!(auth.verify(b"slow-and-steady").unwrap());
    assert!(!auth.verify(b"fast-and-loose").unwrap());
}
