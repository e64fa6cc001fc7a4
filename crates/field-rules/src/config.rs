//! Validator configuration types

use crate::registry::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};

/// Settings for a [`Validator`](crate::validator::Validator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Registry namespace rules are resolved in
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Marker kind passed to the field inspector
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            marker: default_marker(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_marker() -> String {
    DEFAULT_NAMESPACE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.namespace, "validator");
        assert_eq!(config.marker, "validator");
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: ValidatorConfig = serde_json::from_value(json!({ "namespace": "forms" })).unwrap();
        assert_eq!(config.namespace, "forms");
        assert_eq!(config.marker, "validator");
    }
}
