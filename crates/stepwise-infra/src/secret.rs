//! Environment API key resolution.
//!
//! The only secret this application needs is the Gemini API key. It is
//! resolved from environment variables, never persisted, and handed
//! around as a [`SecretString`] so it cannot leak through Debug output.
//!
//! Key resolution order:
//! 1. `STEPWISE_GEMINI_API_KEY`
//! 2. `GEMINI_API_KEY`

use secrecy::SecretString;

const ENV_KEYS: [&str; 2] = ["STEPWISE_GEMINI_API_KEY", "GEMINI_API_KEY"];

/// Resolve the Gemini API key from the environment.
///
/// Returns `None` when no variable is set or all are empty. A variable
/// with non-Unicode content is treated as absent rather than erroring,
/// since API keys must be valid strings.
pub fn resolve_api_key() -> Option<SecretString> {
    resolve_from(&ENV_KEYS)
}

fn resolve_from(keys: &[&str]) -> Option<SecretString> {
    for key in keys {
        match std::env::var(key) {
            Ok(val) if !val.is_empty() => return Some(SecretString::from(val)),
            Ok(_) | Err(std::env::VarError::NotPresent) => {}
            Err(std::env::VarError::NotUnicode(_)) => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_resolve_first_match_wins() {
        // SAFETY: the variable names are unique to this test, and they
        // are removed again before it returns.
        unsafe {
            std::env::set_var("STEPWISE_TEST_KEY_A", "first");
            std::env::set_var("STEPWISE_TEST_KEY_B", "second");
        }

        let key = resolve_from(&["STEPWISE_TEST_KEY_A", "STEPWISE_TEST_KEY_B"]).unwrap();
        assert_eq!(key.expose_secret(), "first");

        // SAFETY: cleanup of vars set above.
        unsafe {
            std::env::remove_var("STEPWISE_TEST_KEY_A");
            std::env::remove_var("STEPWISE_TEST_KEY_B");
        }
    }

    #[test]
    fn test_resolve_skips_empty_values() {
        // SAFETY: unique variable names, removed before returning.
        unsafe {
            std::env::set_var("STEPWISE_TEST_KEY_EMPTY", "");
            std::env::set_var("STEPWISE_TEST_KEY_FALLBACK", "fallback");
        }

        let key = resolve_from(&["STEPWISE_TEST_KEY_EMPTY", "STEPWISE_TEST_KEY_FALLBACK"]).unwrap();
        assert_eq!(key.expose_secret(), "fallback");

        // SAFETY: cleanup of vars set above.
        unsafe {
            std::env::remove_var("STEPWISE_TEST_KEY_EMPTY");
            std::env::remove_var("STEPWISE_TEST_KEY_FALLBACK");
        }
    }

    #[test]
    fn test_resolve_missing_returns_none() {
        assert!(resolve_from(&["STEPWISE_TEST_KEY_NONEXISTENT_XYZ"]).is_none());
    }
}
