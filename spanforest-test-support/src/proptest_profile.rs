//! Environment-driven case counts for property suites.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "SPANFOREST_PBT_CASES";

/// Case count for one property suite.
///
/// # Examples
/// ```
/// use spanforest_test_support::proptest_profile::CaseProfile;
///
/// let profile = CaseProfile::load(64);
/// assert!(profile.cases() > 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaseProfile {
    cases: u32,
}

impl CaseProfile {
    /// Reads [`CASES_ENV_KEY`], falling back to `default_cases` when it is
    /// unset or invalid.
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = CASES_ENV_KEY,
                    raw = %raw,
                    reason = %reason,
                    "invalid property-test case override; using default",
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self { cases }
    }

    /// Number of cases to run per property.
    #[rustfmt::skip]
    #[must_use]
    pub fn cases(&self) -> u32 { self.cases }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let original = env::var(CASES_ENV_KEY).ok();
            // SAFETY: tests serialize access with ENV_LOCK.
            unsafe {
                match value {
                    Some(value) => env::set_var(CASES_ENV_KEY, value),
                    None => env::remove_var(CASES_ENV_KEY),
                }
            }
            Self { original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: tests serialize access with ENV_LOCK.
            unsafe {
                match &self.original {
                    Some(value) => env::set_var(CASES_ENV_KEY, value),
                    None => env::remove_var(CASES_ENV_KEY),
                }
            }
        }
    }

    #[test]
    fn defaults_apply_without_override() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guard = EnvGuard::set(None);
        assert_eq!(CaseProfile::load(64).cases(), 64);
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn valid_overrides_win(#[case] raw: &str, #[case] expected: u32) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guard = EnvGuard::set(Some(raw));
        assert_eq!(CaseProfile::load(64).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn invalid_overrides_fall_back(#[case] raw: &str) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guard = EnvGuard::set(Some(raw));
        assert_eq!(CaseProfile::load(64).cases(), 64);
    }
}
