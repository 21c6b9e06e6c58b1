//! Fill settings taken from the command line and the environment

use anyhow::{bail, Result};
use formfill_core::{FillOptions, TextPolicy};
use std::path::PathBuf;

pub const TEXT_POLICY_VAR: &str = "FORMFILL_TEXT_POLICY";
pub const WRITE_LOG_VAR: &str = "FORMFILL_WRITE_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct FillConfig {
    pub text_policy: TextPolicy,
    pub write_log: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            text_policy: TextPolicy::default(),
            write_log: true,
        }
    }
}

impl FillConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(TEXT_POLICY_VAR) {
            config.text_policy = match TextPolicy::from_name(raw.trim()) {
                Some(policy) => policy,
                None => bail!("Unknown {} '{}' (expected preserve or ascii)", TEXT_POLICY_VAR, raw),
            };
        }

        if let Some(raw) = lookup(WRITE_LOG_VAR) {
            config.write_log = !matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }

        Ok(config)
    }

    pub fn fill_options(&self, working_dir: impl Into<PathBuf>, flatten: bool) -> FillOptions {
        FillOptions::new(working_dir)
            .flatten(flatten)
            .text_policy(self.text_policy)
            .write_log(self.write_log)
    }
}

/// Optional fourth positional of `formfill`; anything unrecognized means no.
pub fn parse_flatten_token(token: Option<&str>) -> bool {
    token.is_some_and(|t| {
        matches!(t.to_ascii_lowercase().as_str(), "true" | "1" | "flatten" | "flat")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = FillConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FillConfig::default());
        assert!(config.write_log);
        assert_eq!(config.text_policy, TextPolicy::Preserve);
    }

    #[test]
    fn test_env_overrides() {
        let config = FillConfig::from_lookup(lookup(&[
            (TEXT_POLICY_VAR, "ascii"),
            (WRITE_LOG_VAR, "Off"),
        ]))
        .unwrap();
        assert_eq!(config.text_policy, TextPolicy::Ascii);
        assert!(!config.write_log);
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let err = FillConfig::from_lookup(lookup(&[(TEXT_POLICY_VAR, "ebcdic")])).unwrap_err();
        assert!(err.to_string().contains("ebcdic"));
    }

    #[test]
    fn test_write_log_other_values_keep_log() {
        let config = FillConfig::from_lookup(lookup(&[(WRITE_LOG_VAR, "yes")])).unwrap();
        assert!(config.write_log);
    }

    #[test]
    fn test_flatten_tokens() {
        for token in ["true", "TRUE", "1", "flatten", "Flat"] {
            assert!(parse_flatten_token(Some(token)), "{}", token);
        }
        for token in ["false", "0", "yes", ""] {
            assert!(!parse_flatten_token(Some(token)), "{}", token);
        }
        assert!(!parse_flatten_token(None));
    }

    #[test]
    fn test_fill_options_carry_config() {
        let config = FillConfig {
            text_policy: TextPolicy::Ascii,
            write_log: false,
        };
        let options = config.fill_options("/tmp/work", true);
        assert!(options.flatten);
        assert!(!options.write_log);
        assert_eq!(options.text_policy, TextPolicy::Ascii);
        assert_eq!(options.working_dir, PathBuf::from("/tmp/work"));
    }
}
