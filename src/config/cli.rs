use crate::app::export::SUPPORTED_EXPORT_FORMATS;
use crate::app::form::BiomarkerForm;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_allowed_values, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Lab values are taken as text and parsed strictly, the same way a form would.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "age-align")]
#[command(about = "Estimate biological age (Phenotypic Age) from a lab panel")]
pub struct CliConfig {
    /// Albumin (g/dL)
    #[arg(long, allow_hyphen_values = true)]
    pub albumin: Option<String>,

    /// Creatinine (mg/dL)
    #[arg(long, allow_hyphen_values = true)]
    pub creatinine: Option<String>,

    /// Fasting glucose (mg/dL)
    #[arg(long, allow_hyphen_values = true)]
    pub glucose: Option<String>,

    /// C-reactive protein (mg/L), must be above 0
    #[arg(long, allow_hyphen_values = true)]
    pub crp: Option<String>,

    /// Mean corpuscular volume (fL)
    #[arg(long, allow_hyphen_values = true)]
    pub mcv: Option<String>,

    /// Red cell distribution width (%)
    #[arg(long, allow_hyphen_values = true)]
    pub rdw: Option<String>,

    /// Alkaline phosphatase (U/L)
    #[arg(long, alias = "alp", allow_hyphen_values = true)]
    pub alkaline_phosphatase: Option<String>,

    /// White blood cell count (10^3/µL)
    #[arg(long, allow_hyphen_values = true)]
    pub wbc: Option<String>,

    /// Chronological age (years)
    #[arg(long = "age", allow_hyphen_values = true)]
    pub chronological_age: Option<String>,

    #[arg(long, default_value = "./age-align-output")]
    pub export_dir: String,

    /// Export formats (csv, json); nothing is exported when empty
    #[arg(long, value_delimiter = ',')]
    pub export: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn form(&self) -> BiomarkerForm {
        BiomarkerForm {
            albumin: self.albumin.clone(),
            creatinine: self.creatinine.clone(),
            glucose: self.glucose.clone(),
            crp: self.crp.clone(),
            mcv: self.mcv.clone(),
            rdw: self.rdw.clone(),
            alkaline_phosphatase: self.alkaline_phosphatase.clone(),
            wbc: self.wbc.clone(),
            chronological_age: self.chronological_age.clone(),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn export_dir(&self) -> &str {
        &self.export_dir
    }

    fn export_formats(&self) -> &[String] {
        &self.export
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if !self.export.is_empty() {
            validate_path("export_dir", &self.export_dir)?;
        }
        validate_allowed_values("export", &self.export, &SUPPORTED_EXPORT_FORMATS)
    }
}
