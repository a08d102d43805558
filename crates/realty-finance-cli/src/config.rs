use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use realty_finance_core::project::DEFAULT_EXPENSE_RATIO;

use crate::OutputFormat;

/// Settings resolved once at startup and passed by reference.
///
/// Precedence: built-in defaults, then the YAML file, then command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub output: OutputFormat,
    /// Decimal places for human-facing output; JSON stays unrounded
    pub decimals: u32,
    /// Expense estimate as a share of the monthly payment
    pub expense_ratio: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Json,
            decimals: 2,
            expense_ratio: DEFAULT_EXPENSE_RATIO,
        }
    }
}

impl CliConfig {
    pub fn from_yaml_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let p = Path::new(path);
        let contents = fs::read_to_string(p)
            .map_err(|e| format!("Failed to read config '{}': {}", p.display(), e))?;
        let config: CliConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config '{}': {}", p.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn resolve(
        path: Option<&str>,
        output: Option<OutputFormat>,
        decimals: Option<u32>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match path {
            Some(p) => Self::from_yaml_file(p)?,
            None => Self::default(),
        };
        if let Some(output) = output {
            config.output = output;
        }
        if let Some(decimals) = decimals {
            config.decimals = decimals;
        }
        config.validate()?;
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(0.0..=1.0).contains(&self.expense_ratio) {
            return Err(format!(
                "expense_ratio must be between 0 and 1, got {}",
                self.expense_ratio
            )
            .into());
        }
        if self.decimals > 10 {
            return Err(format!("decimals must be at most 10, got {}", self.decimals).into());
        }
        Ok(())
    }
}
