//! General application configuration.

use lb_core::enums::IssueProperty;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_property() -> String {
    String::from("category")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Property used by `lbd distribution` when `--property` is omitted.
    #[serde(default = "default_property")]
    pub default_property: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_property: default_property(),
        }
    }
}

impl GeneralConfig {
    /// Parse `default_property` into an [`IssueProperty`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the name is not a known property.
    pub fn default_property(&self) -> Result<IssueProperty, ConfigError> {
        self.default_property
            .parse()
            .map_err(|e: lb_core::errors::CoreError| ConfigError::InvalidValue {
                field: "general.default_property".into(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_property, "category");
        assert_eq!(config.default_property().unwrap(), IssueProperty::Category);
    }

    #[test]
    fn unknown_property_is_invalid() {
        let config = GeneralConfig {
            default_property: "colour".into(),
        };
        assert!(config.default_property().is_err());
    }
}
