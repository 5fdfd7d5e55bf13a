//! Unit tests for authentication configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const LONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn missing_secret_is_fatal_in_every_mode(#[case] mode: BuildMode) {
    let err = auth_settings_from_env(&mock_env(&[]), mode).expect_err("missing secret");
    assert_eq!(
        err,
        AuthConfigError::MissingEnv {
            name: JWT_SECRET_ENV
        }
    );
}

#[rstest]
fn blank_secret_counts_as_missing() {
    let env = mock_env(&[(JWT_SECRET_ENV, "   ")]);
    let err = auth_settings_from_env(&env, BuildMode::Debug).expect_err("blank secret");
    assert!(matches!(err, AuthConfigError::MissingEnv { .. }));
}

#[rstest]
fn short_secret_is_rejected_in_release() {
    let env = mock_env(&[(JWT_SECRET_ENV, "short")]);
    let err = auth_settings_from_env(&env, BuildMode::Release).expect_err("short secret");
    assert_eq!(
        err,
        AuthConfigError::SecretTooShort {
            name: JWT_SECRET_ENV,
            length: 5,
            min_len: SECRET_MIN_LEN,
        }
    );
}

#[rstest]
fn short_secret_is_tolerated_in_debug() {
    let env = mock_env(&[(JWT_SECRET_ENV, "short")]);
    let settings = auth_settings_from_env(&env, BuildMode::Debug).expect("debug tolerates");
    assert_eq!(settings.secret.expose(), b"short");
}

#[rstest]
#[case(None, 10)]
#[case(Some("12"), 12)]
#[case(Some(" 4 "), 4)]
fn bcrypt_cost_parses(#[case] raw: Option<&str>, #[case] expected: u32) {
    let mut vars = vec![(JWT_SECRET_ENV, LONG_SECRET)];
    if let Some(value) = raw {
        vars.push((BCRYPT_COST_ENV, value));
    }
    let settings =
        auth_settings_from_env(&mock_env(&vars), BuildMode::Release).expect("valid settings");
    assert_eq!(settings.bcrypt_cost, expected);
}

#[rstest]
#[case("3")]
#[case("32")]
#[case("ten")]
fn invalid_bcrypt_cost_depends_on_mode(#[case] raw: &str) {
    let vars = [(JWT_SECRET_ENV, LONG_SECRET), (BCRYPT_COST_ENV, raw)];

    let err = auth_settings_from_env(&mock_env(&vars), BuildMode::Release)
        .expect_err("release rejects");
    assert!(matches!(
        err,
        AuthConfigError::InvalidEnv {
            name: BCRYPT_COST_ENV,
            ..
        }
    ));

    let settings =
        auth_settings_from_env(&mock_env(&vars), BuildMode::Debug).expect("debug defaults");
    assert_eq!(settings.bcrypt_cost, DEFAULT_BCRYPT_COST);
}

#[rstest]
fn secret_debug_output_is_redacted() {
    let env = mock_env(&[(JWT_SECRET_ENV, LONG_SECRET)]);
    let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid");
    assert!(!format!("{settings:?}").contains(LONG_SECRET));
}
