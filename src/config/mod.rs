// Configuration module entry point
// Loads logging and default cache policy settings

mod types;

pub use types::{CacheConfig, Config, LoggingConfig};

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};

const DEFAULT_CONFIG_PATH: &str = "freshness";

impl Config {
    /// Load configuration from the default path ("freshness.toml" and friends)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        with_defaults(
            config::Config::builder()
                .add_source(File::with_name(config_path).required(false))
                .add_source(
                    Environment::with_prefix("FRESHNESS")
                        .prefix_separator("_")
                        .separator("__"),
                ),
        )?
        .build()?
        .try_deserialize()
    }

    /// Load configuration from TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        with_defaults(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )?
        .build()?
        .try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("logging.level", "info")?
        .set_default("cache.etag_kind", "strong")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cache_control::CachePolicy;
    use crate::http::conditional::Expiry;
    use crate::http::etag::EtagKind;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.log_file, None);
        assert_eq!(cfg.cache.policy, CachePolicy::Public { max_age: 3600 });
        assert_eq!(cfg.cache.etag_kind, EtagKind::Strong);
        assert_eq!(cfg.cache.expiry(), None);
        assert_eq!(
            cfg.cache.cache_control().to_header_value().as_deref(),
            Some("public, max-age=3600")
        );
    }

    #[test]
    fn test_overrides() {
        let cfg = Config::from_toml_str(
            r#"
            [logging]
            level = "debug"
            log_file = "logs/freshness.log"

            [cache]
            etag_kind = "weak"
            expires_in = 600

            [cache.policy]
            type = "private"
            max_age = 60
            "#,
        )
        .unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.log_file.as_deref(), Some("logs/freshness.log"));
        assert_eq!(cfg.cache.policy, CachePolicy::Private { max_age: 60 });
        assert_eq!(cfg.cache.etag_options().kind, EtagKind::Weak);
        assert_eq!(cfg.cache.expiry(), Some(Expiry::Seconds(600)));
    }

    #[test]
    fn test_unit_policy() {
        let cfg = Config::from_toml_str(
            r#"
            [cache.policy]
            type = "no_store"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.cache.policy, CachePolicy::NoStore);
        assert_eq!(cfg.cache.policy.to_header_value(), "no-store");
    }

    #[test]
    fn test_invalid_etag_kind() {
        let result = Config::from_toml_str(
            r#"
            [cache]
            etag_kind = "medium"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = Config::load_from("definitely/not/here/freshness").unwrap();
        assert_eq!(cfg.cache.etag_kind, EtagKind::Strong);
    }
}
