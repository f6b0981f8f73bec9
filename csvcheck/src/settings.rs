use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// One column of the report: `pattern` must match each field from its start.
#[derive(Debug, Deserialize)]
pub struct Column {
    pub name: String,
    pub pattern: String,
}

/// Configuration read from `csvcheck.toml`:
///
/// ```toml
/// path = "report.csv"
///
/// [[columns]]
/// name = "id"
/// pattern = '^\d+$'
///
/// [[columns]]
/// name = "code"
/// pattern = '^[A-Z]+$'
/// ```
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub path: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("path", "report.csv")?
            .add_source(
                File::with_name("csvcheck.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("CSVCHECK"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::set_var;

    #[test]
    fn test_settings() {
        set_var("CSVCHECK_PATH", "weekly.csv");
        let settings = Settings::new().unwrap();
        assert_eq!(settings.path, "weekly.csv");
        assert!(settings.columns.is_empty());
    }
}
