//! Validator configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::batch::BatchError;

/// Construction-time settings for an [`InvestigationValidator`](crate::InvestigationValidator).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Community deployments always require lab technicians to enter data
    #[serde(default)]
    pub community: bool,
}

impl ValidatorConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, BatchError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, BatchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_standard_mode() {
        let config = ValidatorConfig::from_yaml("{}").unwrap();
        assert!(!config.community);
    }

    #[test]
    fn test_parse_community() {
        let config = ValidatorConfig::from_yaml("community: true").unwrap();
        assert!(config.community);

        let config = ValidatorConfig::from_json(r#"{ "community": false }"#).unwrap();
        assert!(!config.community);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = ValidatorConfig::from_yaml("comunity: true");
        assert!(matches!(result, Err(BatchError::YamlError(_))));
    }

    #[test]
    fn test_json_extension_detection() {
        assert!(is_json(Path::new("config.JSON")));
        assert!(!is_json(Path::new("config.yaml")));
        assert!(!is_json(Path::new("config")));
    }
}
