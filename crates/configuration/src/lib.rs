use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DashboardSettings, DatasetSettings, LoggingSettings, ServerSettings};

/// Prefix for environment overrides, e.g. `STOREFRONT__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "STOREFRONT";

/// Loads the application configuration from `path` plus environment overrides.
///
/// The file is optional: a missing file leaves every section at its default.
/// The merged result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), dataset = %config.dataset.path.display(), "Configuration loaded.");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.dashboard.top_n, 10);
        assert_eq!(config.dashboard.chart_size, 5);
        assert_eq!(config.dashboard.currency, "IDR");
        assert_eq!(config.server.address(), "127.0.0.1:3000");
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_toml(
            r#"
            [dataset]
            path = "data/orders.csv"

            [dashboard]
            top_n = 8
            chart_size = 3

            [server]
            port = 8080
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.dataset.path, Path::new("data/orders.csv"));
        assert_eq!(config.dashboard.top_n, 8);
        assert_eq!(config.dashboard.chart_size, 3);
        assert_eq!(config.dashboard.title, "E-Commerce Dashboard");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn chart_size_larger_than_top_n_is_rejected() {
        let file = write_toml(
            r#"
            [dashboard]
            top_n = 3
            chart_size = 5
            "#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn file_logging_can_be_switched_off() {
        let defaults = load_config(Path::new("does-not-exist.toml")).unwrap();
        assert!(defaults.logging.file);
        assert_eq!(defaults.logging.directory, Path::new("logs"));

        let file = write_toml(
            r#"
            [logging]
            level = "debug"
            file = false
            "#,
        );
        let config = load_config(file.path()).unwrap();
        assert!(!config.logging.file);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_prefix, "storefront.log");
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let mut config = Config::default();
        config.dashboard.top_n = 0;
        assert!(config.validate().is_err());
    }
}
