//! Function library configuration

use super::error::{FunctionError, FunctionResult};
use serde::{Deserialize, Serialize};

/// What `TIMEZONE` does when its argument carries no timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneFallback {
    /// Raise an error, as SPARQL requires
    #[default]
    Strict,
    /// Report the offset of the local process timezone
    LocalOffset,
}

/// Configuration for built-in function evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Base IRI used by `IRI()` to resolve relative references
    pub base_iri: Option<String>,
    /// Behavior of `TIMEZONE` on timezone-less values
    pub timezone_fallback: TimezoneFallback,
    /// Size limit in bytes for compiled REGEX/REPLACE patterns
    pub regex_size_limit: usize,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            base_iri: None,
            timezone_fallback: TimezoneFallback::Strict,
            regex_size_limit: 1 << 20,
        }
    }
}

impl FunctionConfig {
    /// Load configuration from YAML; missing keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> FunctionResult<Self> {
        let config: FunctionConfig = serde_yaml::from_str(yaml)
            .map_err(|e| FunctionError::Validation(format!("invalid function config: {}", e)))?;
        if let Some(base) = &config.base_iri {
            oxiri::Iri::parse(base.as_str())
                .map_err(|e| FunctionError::Validation(format!("invalid base IRI '{}': {}", base, e)))?;
        }
        Ok(config)
    }
}

/// Immutable evaluation context handed to the dispatcher
#[derive(Debug, Clone, Default)]
pub struct FunctionContext {
    pub config: FunctionConfig,
}

impl FunctionContext {
    pub fn new(config: FunctionConfig) -> Self {
        Self { config }
    }
}
