//! CLI configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the tool can start with zero
//! configuration. Command-line flags are applied on top in `main`.

use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// SQLite file holding all data.
    /// Env: `HOSTELCARE_DB_PATH`
    /// Default: the platform data directory (see `hostelcare_store::database::default_path`).
    pub db_path: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process.
    /// Env: `HOSTELCARE_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// Accept any warden email/password and log in as the demo warden.
    /// Env: `HOSTELCARE_DEMO_WARDEN_LOGIN` (true/false)
    /// Default: `false`
    pub demo_warden_login: bool,

    /// Skip first-run example data.
    /// Env: `HOSTELCARE_SKIP_SEED` (true/false)
    /// Default: `false`
    pub skip_seed: bool,
}

impl CliConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("HOSTELCARE_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("HOSTELCARE_IN_MEMORY") {
            config.in_memory = parse_flag("HOSTELCARE_IN_MEMORY", &val, config.in_memory);
        }

        if let Some(val) = lookup("HOSTELCARE_DEMO_WARDEN_LOGIN") {
            config.demo_warden_login =
                parse_flag("HOSTELCARE_DEMO_WARDEN_LOGIN", &val, config.demo_warden_login);
        }

        if let Some(val) = lookup("HOSTELCARE_SKIP_SEED") {
            config.skip_seed = parse_flag("HOSTELCARE_SKIP_SEED", &val, config.skip_seed);
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

fn parse_flag(name: &str, value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(var = name, value, "Invalid boolean, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> CliConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = from_pairs(&[]);
        assert!(config.db_path.is_none());
        assert!(!config.in_memory);
        assert!(!config.demo_warden_login);
        assert!(!config.skip_seed);
    }

    #[test]
    fn test_env_overrides() {
        let config = from_pairs(&[
            ("HOSTELCARE_DB_PATH", "/tmp/hc.db"),
            ("HOSTELCARE_IN_MEMORY", "yes"),
            ("HOSTELCARE_DEMO_WARDEN_LOGIN", "1"),
            ("HOSTELCARE_SKIP_SEED", "TRUE"),
        ]);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/hc.db")));
        assert!(config.in_memory);
        assert!(config.demo_warden_login);
        assert!(config.skip_seed);
    }

    #[test]
    fn test_invalid_flag_keeps_default() {
        let config = from_pairs(&[("HOSTELCARE_DEMO_WARDEN_LOGIN", "maybe")]);
        assert!(!config.demo_warden_login);
    }
}
