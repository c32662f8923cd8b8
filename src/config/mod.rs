use crate::core::name::validate_name;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Registry settings loaded from a TOML file.
///
/// ```toml
/// [registry]
/// default_serving_name = "${DEFAULT_SERVING_NAME}"
/// max_name_length = 253
/// reserved_names = ["internal.example.com"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub registry: RegistrySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySection {
    pub default_serving_name: Option<String>,
    pub max_name_length: Option<usize>,
    pub reserved_names: Option<Vec<String>>,
}

impl RegistryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR_NAME}` with the environment value; unset variables
    /// are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn default_serving_name(&self) -> Option<&str> {
        self.registry.default_serving_name.as_deref()
    }

    pub fn max_name_length(&self) -> Option<usize> {
        self.registry.max_name_length
    }

    pub fn reserved_names(&self) -> &[String] {
        self.registry.reserved_names.as_deref().unwrap_or(&[])
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.registry.default_serving_name {
            validate_non_empty_string("registry.default_serving_name", name)?;
            validate_name(name).map_err(|_| RegistryError::InvalidConfigValueError {
                field: "registry.default_serving_name".to_string(),
                value: name.clone(),
                reason: "Not a valid domain name".to_string(),
            })?;
        }

        if let Some(max) = self.registry.max_name_length {
            // "a.bc" is the shortest name the grammar accepts
            validate_positive_number("registry.max_name_length", max, 4)?;
        }

        for name in self.reserved_names() {
            validate_name(name).map_err(|_| RegistryError::InvalidConfigValueError {
                field: "registry.reserved_names".to_string(),
                value: name.clone(),
                reason: "Not a valid domain name".to_string(),
            })?;
        }

        Ok(())
    }
}
