//! Integration tests for password hashing

use std::sync::Arc;

use testresult::TestResult;

use warden::{
    password::{CostPolicy, PasswordError, PasswordHasher, is_well_formed},
    random::OsRandom,
};

/// Same shape as the default policy, with far less memory per level.
fn hasher() -> PasswordHasher {
    PasswordHasher::new(
        CostPolicy {
            memory_per_level_kib: 64,
            max_level: 6,
            ..CostPolicy::default()
        },
        Arc::new(OsRandom),
    )
}

#[test]
fn every_cost_level_round_trips() -> TestResult {
    let hasher = hasher();

    for level in 0..=hasher.policy().max_level + 1 {
        let hash = hasher.derive("hunter2", level)?;

        assert!(is_well_formed(&hash), "level {level}: {hash}");
        assert!(hasher.confirm("hunter2", &hash), "level {level}");
        assert!(!hasher.confirm("hunter3", &hash), "level {level}");
    }

    Ok(())
}

#[test]
fn hashing_is_not_deterministic() -> TestResult {
    let hasher = hasher();

    for password in ["a", "hunter2", "correct horse battery staple"] {
        assert_ne!(hasher.derive(password, 0)?, hasher.derive(password, 0)?);
    }

    Ok(())
}

#[test]
fn hash_never_contains_the_password() -> TestResult {
    let hasher = hasher();

    for password in ["hunter2", "correct horse battery staple", "p@ss:word"] {
        let hash = hasher.derive(password, 1)?;

        assert!(!hash.contains(password), "{password} leaked into {hash}");
    }

    Ok(())
}

#[test]
fn empty_password_is_refused() {
    let result = hasher().derive("", 0);

    assert!(
        matches!(result, Err(PasswordError::EmptyPassword)),
        "expected EmptyPassword, got {result:?}"
    );
}

#[test]
fn unicode_passwords_round_trip() -> TestResult {
    let hasher = hasher();

    let hash = hasher.derive("pässwörd 🔐", 1)?;

    assert!(hasher.confirm("pässwörd 🔐", &hash), "exact match");
    assert!(!hasher.confirm("passwörd 🔐", &hash), "near miss");

    Ok(())
}

#[test]
fn garbage_is_never_confirmed() {
    let hasher = hasher();

    for hash in [
        "",
        "plaintext",
        "$argon2id$v=19$t=2,m=128,p=2$$",
        "$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW",
    ] {
        assert!(!hasher.confirm("hunter2", hash), "{hash:?}");
    }
}
