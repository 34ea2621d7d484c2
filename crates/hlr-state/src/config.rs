//! Reconciler configuration.
//!
//! Defaults match the production form: only `compensation` is supported and
//! the start page lives at `/start`. A YAML file may override any field, and
//! environment variables override the file.

use std::path::Path;

use hlr_core::BenefitType;
use serde::{Deserialize, Serialize};

/// Configuration for the draft reconciler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Benefit types the form can be filed against.
    pub supported_benefit_types: Vec<BenefitType>,
    /// Path of the page unsupported sessions are sent back to.
    pub start_path: String,
    /// Maximum number of retained reconciliation events.
    pub event_log_capacity: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            supported_benefit_types: vec![BenefitType::compensation()],
            start_path: "/start".to_string(),
            event_log_capacity: 1_000,
        }
    }
}

impl ReconcilerConfig {
    /// Whether `benefit_type` is on the allow-list. Absent types never are.
    pub fn is_supported(&self, benefit_type: Option<&BenefitType>) -> bool {
        benefit_type.is_some_and(|bt| self.supported_benefit_types.contains(bt))
    }

    /// Parse a YAML document. Missing fields keep their defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration: defaults, then the optional YAML file, then
    /// environment overrides.
    ///
    /// Variables:
    /// - `HLR_SUPPORTED_BENEFIT_TYPES` (comma separated)
    /// - `HLR_START_PATH`
    /// - `HLR_EVENT_LOG_CAPACITY`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                serde_yaml::from_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("HLR_SUPPORTED_BENEFIT_TYPES") {
            self.supported_benefit_types = raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| {
                    part.parse::<BenefitType>()
                        .map_err(|e| ConfigError::Invalid(e.to_string()))
                })
                .collect::<Result<_, _>>()?;
        }
        if let Some(raw) = lookup("HLR_START_PATH") {
            self.start_path = raw;
        }
        if let Some(raw) = lookup("HLR_EVENT_LOG_CAPACITY") {
            self.event_log_capacity = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("HLR_EVENT_LOG_CAPACITY is not a number: {raw:?}"))
            })?;
        }
        Ok(())
    }

    /// Reject configurations the reconciler cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supported_benefit_types.is_empty() {
            return Err(ConfigError::Invalid(
                "supported_benefit_types must not be empty".into(),
            ));
        }
        if !self.start_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "start_path must start with '/': {:?}",
                self.start_path
            )));
        }
        if self.event_log_capacity == 0 {
            return Err(ConfigError::Invalid(
                "event_log_capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_support_compensation_only() {
        let cfg = ReconcilerConfig::default();
        assert!(cfg.is_supported(Some(&BenefitType::compensation())));
        assert!(!cfg.is_supported(Some(&BenefitType::new("fiduciary").unwrap())));
        assert!(!cfg.is_supported(None));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn yaml_overrides_selected_fields() {
        let cfg = ReconcilerConfig::from_yaml_str(
            "supported_benefit_types: [compensation, fiduciary]\nstart_path: /hlr/start\n",
        )
        .unwrap();
        assert_eq!(cfg.supported_benefit_types.len(), 2);
        assert_eq!(cfg.start_path, "/hlr/start");
        assert_eq!(cfg.event_log_capacity, 1_000);
    }

    #[test]
    fn yaml_rejects_invalid_benefit_type() {
        assert!(ReconcilerConfig::from_yaml_str("supported_benefit_types: ['']\n").is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut cfg = ReconcilerConfig::default();
        cfg.apply_env(env(&[
            ("HLR_SUPPORTED_BENEFIT_TYPES", "compensation, lifeInsurance,"),
            ("HLR_START_PATH", "/begin"),
            ("HLR_EVENT_LOG_CAPACITY", "50"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.supported_benefit_types,
            vec![
                BenefitType::compensation(),
                BenefitType::new("lifeInsurance").unwrap()
            ]
        );
        assert_eq!(cfg.start_path, "/begin");
        assert_eq!(cfg.event_log_capacity, 50);
    }

    #[test]
    fn env_rejects_bad_capacity() {
        let mut cfg = ReconcilerConfig::default();
        let result = cfg.apply_env(env(&[("HLR_EVENT_LOG_CAPACITY", "lots")]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut cfg = ReconcilerConfig::default();
        cfg.start_path = "start".into();
        assert!(cfg.validate().is_err());

        let mut cfg = ReconcilerConfig::default();
        cfg.supported_benefit_types.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = ReconcilerConfig::default();
        cfg.event_log_capacity = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_reads_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "start_path: /from-file").unwrap();
        let cfg = ReconcilerConfig::load(Some(file.path())).unwrap();
        // Environment overrides win over the file.
        if std::env::var("HLR_START_PATH").is_err() {
            assert_eq!(cfg.start_path, "/from-file");
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let result = ReconcilerConfig::load(Some(Path::new("/nonexistent/hlr.yaml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
