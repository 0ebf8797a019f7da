//! Environment variable abstraction for testability.
//!
//! Credentials (provider API keys, GitHub tokens) and behaviour toggles
//! reach the tool through environment variables. Production code uses
//! [`Env::real()`] which delegates to [`std::env::var`]; tests use
//! [`Env::mock()`] backed by a `HashMap`, so no test ever calls
//! `std::env::set_var` / `remove_var`.

use std::collections::HashMap;

/// Environment variable reader.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    ///
    /// Lookups only see the given pairs, never the process environment.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Returns `true` if the variable is present.
    pub fn is_set(&self, name: &str) -> bool {
        self.var(name).is_ok()
    }

    /// Return the value of the first variable in `names` that is set.
    ///
    /// Used for credentials with several accepted spellings, e.g. the
    /// GitHub token (`GITHUB_TOKEN` then `GH_TOKEN`).
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.var(name).ok())
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_ok());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("GEMINI_API_KEY", "test-key"), ("GITHUB_TOKEN", "ghp_x")]);
        assert_eq!(env.var("GEMINI_API_KEY").unwrap(), "test-key");
        assert_eq!(env.var("GITHUB_TOKEN").unwrap(), "ghp_x");
    }

    #[test]
    fn mock_env_returns_not_present_for_missing() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert!(env.var("NONEXISTENT").is_err());
    }

    #[test]
    fn is_set_checks_presence() {
        let env = Env::mock([("PRESENT", "value")]);
        assert!(env.is_set("PRESENT"));
        assert!(!env.is_set("ABSENT"));
    }

    #[test]
    fn first_of_respects_order() {
        let env = Env::mock([("GITHUB_TOKEN", "first"), ("GH_TOKEN", "second")]);
        assert_eq!(
            env.first_of(&["GITHUB_TOKEN", "GH_TOKEN"]).as_deref(),
            Some("first")
        );
        let env = Env::mock([("GH_TOKEN", "second")]);
        assert_eq!(
            env.first_of(&["GITHUB_TOKEN", "GH_TOKEN"]).as_deref(),
            Some("second")
        );
    }

    #[test]
    fn first_of_empty_when_none_set() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert_eq!(env.first_of(&["GITHUB_TOKEN", "GH_TOKEN"]), None);
    }
}
