use crate::app::export::SUPPORTED_EXPORT_FORMATS;
use crate::core::{BiomarkerPayload, ConfigProvider};
use crate::utils::error::{AgeAlignError, Result};
use crate::utils::validation::{
    validate_allowed_values, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A batch of lab panels submitted in file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub session: SessionInfo,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub entries: Vec<BiomarkerPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default)]
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            formats: Vec::new(),
        }
    }
}

fn default_export_dir() -> String {
    "./age-align-output".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl SessionConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AgeAlignError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AgeAlignError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }
}

impl ConfigProvider for SessionConfig {
    fn export_dir(&self) -> &str {
        &self.output.export_dir
    }

    fn export_formats(&self) -> &[String] {
        &self.output.formats
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("session.name", &self.session.name)?;
        validate_path("output.export_dir", &self.output.export_dir)?;
        validate_allowed_values("output.formats", &self.output.formats, &SUPPORTED_EXPORT_FORMATS)?;

        if self.entries.is_empty() {
            return Err(AgeAlignError::ConfigValidationError {
                field: "entries".to_string(),
                message: "At least one [[entries]] table is required".to_string(),
            });
        }

        for (index, entry) in self.entries.iter().enumerate() {
            entry.validate().map_err(|e| match e {
                AgeAlignError::InvalidInput { field, reason } => AgeAlignError::InvalidConfigValueError {
                    field: format!("entries[{}].{}", index, field),
                    value: entry
                        .fields()
                        .iter()
                        .find(|(name, _)| *name == field)
                        .map(|(_, v)| v.to_string())
                        .unwrap_or_default(),
                    reason,
                },
                other => other,
            })?;
        }

        Ok(())
    }
}
