use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;
use crate::error::{RefreshError, Result};
use crate::types::CatalogEntry;

/// Contents of the catalog file: fetch settings plus the labs to refresh.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub labs: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub timeout_seconds: u64,
    pub delay_seconds: u64,
    pub script_id: String,
    pub output_path: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: constants::DEFAULT_TIMEOUT_SECONDS,
            delay_seconds: constants::DEFAULT_DELAY_SECONDS,
            script_id: constants::DEFAULT_SCRIPT_ID.to_string(),
            output_path: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            RefreshError::Config(format!(
                "Failed to read catalog file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Lab names become output keys, so they must be unique and non-empty.
    fn validate(&self) -> Result<()> {
        if self.fetch.script_id.trim().is_empty() {
            return Err(RefreshError::Config("fetch.script_id must not be empty".into()));
        }
        if self.fetch.timeout_seconds == 0 {
            return Err(RefreshError::Config("fetch.timeout_seconds must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for entry in &self.labs {
            if entry.name.trim().is_empty() {
                return Err(RefreshError::Config("lab with empty name".into()));
            }
            if entry.slug.trim().is_empty() {
                return Err(RefreshError::Config(format!("lab '{}' has an empty slug", entry.name)));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(RefreshError::Config(format!("duplicate lab name '{}'", entry.name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::Platform;

    #[test]
    fn test_defaults_when_fetch_table_missing() {
        let config = Config::from_toml_str(
            r#"
            [[labs]]
            name = "YARA Trap"
            platform = "cyberdefenders"
            slug = "yara-trap"
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.fetch.delay(), Duration::from_secs(2));
        assert_eq!(config.fetch.script_id, "contextData");
        assert_eq!(config.fetch.output_path, PathBuf::from("data/labs_metadata.json"));
        assert_eq!(
            config.labs,
            vec![CatalogEntry::new("YARA Trap", Platform::CyberDefenders, "yara-trap")]
        );
    }

    #[test]
    fn test_labs_keep_declared_order() {
        let config = Config::from_toml_str(
            r#"
            [fetch]
            delay_seconds = 0

            [[labs]]
            name = "Zeta"
            platform = "cyberdefenders"
            slug = "zeta"

            [[labs]]
            name = "Alpha"
            platform = "cyberdefenders"
            slug = "alpha"
            "#,
        )
        .unwrap();

        let names: Vec<_> = config.labs.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(config.fetch.delay(), Duration::ZERO);
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let config = Config::from_toml_str("").unwrap();
        assert!(config.labs.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Config::from_toml_str(
            r#"
            [[labs]]
            name = "RoastToRoot"
            platform = "cyberdefenders"
            slug = "roasttoroot"

            [[labs]]
            name = "RoastToRoot"
            platform = "cyberdefenders"
            slug = "roasttoroot-2"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, RefreshError::Config(ref msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_rejects_unknown_platform() {
        let err = Config::from_toml_str(
            r#"
            [[labs]]
            name = "Meow"
            platform = "hackthebox"
            slug = "meow"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, RefreshError::Toml(_)));
    }

    #[test]
    fn test_rejects_misspelled_keys() {
        let fetch_typo = Config::from_toml_str(
            r#"
            [fetch]
            delay_second = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(fetch_typo, RefreshError::Toml(ref e) if e.to_string().contains("delay_second")));

        let lab_typo = Config::from_toml_str(
            r#"
            [[labs]]
            name = "WorkFromHome"
            platform = "cyberdefenders"
            slug = "workfromhome"
            slugs = "typo"
            "#,
        )
        .unwrap_err();
        assert!(matches!(lab_typo, RefreshError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, RefreshError::Config(_)));
    }
}
