//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn valid_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
    ])
}

#[rstest]
fn release_accepts_complete_configuration(valid_key: NamedTempFile) {
    let env = mock_env(release_vars(&valid_key));
    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl, Duration::from_secs(24 * 3600));
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV)]
#[case::same_site(SAMESITE_ENV)]
fn release_rejects_missing_toggles(valid_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&valid_key);
    vars.remove(missing);
    let env = mock_env(vars);

    let Err(err) = session_settings_from_env(&env, BuildMode::Release) else {
        panic!("missing {missing} should fail");
    };
    assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case::cookie_secure(COOKIE_SECURE_ENV, "maybe")]
#[case::same_site(SAMESITE_ENV, "sideways")]
#[case::ttl(TTL_HOURS_ENV, "0")]
#[case::ttl_word(TTL_HOURS_ENV, "forever")]
fn release_rejects_invalid_values(
    valid_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&valid_key);
    vars.insert(name, value.to_owned());
    let env = mock_env(vars);

    let Err(err) = session_settings_from_env(&env, BuildMode::Release) else {
        panic!("{name}={value} should fail");
    };
    assert!(matches!(err, SessionConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(valid_key: NamedTempFile) {
    let mut vars = release_vars(&valid_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    let env = mock_env(vars);

    assert!(matches!(
        session_settings_from_env(&env, BuildMode::Release),
        Err(SessionConfigError::InsecureSameSiteNone)
    ));
}

#[rstest]
fn release_requires_a_readable_key_file() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/session_key".to_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Lax".to_owned()),
    ]);
    let env = mock_env(vars);

    assert!(matches!(
        session_settings_from_env(&env, BuildMode::Release),
        Err(SessionConfigError::KeyRead { .. })
    ));
}

#[rstest]
#[case::debug(BuildMode::Debug)]
#[case::release(BuildMode::Release)]
fn short_keys_are_rejected_in_every_mode(#[case] mode: BuildMode) {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let env = mock_env(release_vars(&short));

    assert!(matches!(
        session_settings_from_env(&env, mode),
        Err(SessionConfigError::KeyTooShort { length, .. }) if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let vars = HashMap::from([
        (KEY_FILE_ENV, "/nonexistent/session_key".to_owned()),
        (COOKIE_SECURE_ENV, "maybe".to_owned()),
        (SAMESITE_ENV, "sideways".to_owned()),
        (TTL_HOURS_ENV, "never".to_owned()),
    ]);
    let env = mock_env(vars);

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.ttl, Duration::from_secs(DEFAULT_TTL_HOURS * 3600));
}

#[rstest]
fn configured_ttl_is_applied(valid_key: NamedTempFile) {
    let mut vars = release_vars(&valid_key);
    vars.insert(TTL_HOURS_ENV, "8".to_owned());
    let env = mock_env(vars);

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.ttl, Duration::from_secs(8 * 3600));
}

#[rstest]
#[case("1", Some(true))]
#[case(" YES ", Some(true))]
#[case("false", Some(false))]
#[case("0", Some(false))]
#[case("maybe", None)]
#[case("", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
