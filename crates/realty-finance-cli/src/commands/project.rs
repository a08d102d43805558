use clap::Args;
use serde_json::Value;
use tracing::{debug, info};

use realty_finance_core::project::{analyze_project, ProjectAnalysisInput};

use crate::config::CliConfig;
use crate::input;

/// Arguments for a full project analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProjectArgs {
    /// Path to JSON input file: a `ProjectAnalysisInput`, or a bare project record
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly rent (overrides the input file)
    #[arg(long)]
    pub rent: Option<String>,

    /// Monthly operating charges (overrides the input file)
    #[arg(long)]
    pub charges: Option<String>,

    /// Expense estimate as a share of the payment (overrides the config)
    #[arg(long)]
    pub expense_ratio: Option<f64>,
}

pub fn run_project(args: ProjectArgs, config: &CliConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let document: Value = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for project analysis")?;
    let mut analysis_input = parse_analysis_input(document)?;

    if let Some(rent) = args.rent {
        analysis_input.monthly_rent = rent.into();
    }
    if let Some(charges) = args.charges {
        analysis_input.monthly_charges = charges.into();
    }
    analysis_input.expense_ratio = args
        .expense_ratio
        .or(analysis_input.expense_ratio)
        .or(Some(config.expense_ratio));

    debug!(?analysis_input, "analyzing project");
    let output = analyze_project(&analysis_input)?;
    info!(
        monthly_payment = output.result.monthly_payment,
        dscr = ?output.result.dscr.map(|d| d.ratio),
        warnings = output.warnings.len(),
        "project analyzed"
    );
    Ok(serde_json::to_value(output)?)
}

/// Accept either the analysis envelope or a stored project record on its own.
fn parse_analysis_input(document: Value) -> Result<ProjectAnalysisInput, Box<dyn std::error::Error>> {
    if document.get("project").is_some() {
        Ok(serde_json::from_value(document)?)
    } else {
        Ok(ProjectAnalysisInput {
            project: serde_json::from_value(document)?,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_input(value: &Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    fn args(path: &str) -> ProjectArgs {
        ProjectArgs {
            input: Some(path.to_string()),
            rent: None,
            charges: None,
            expense_ratio: None,
        }
    }

    #[test]
    fn test_bare_project_record() {
        let file = write_input(&json!({
            "id": "a1", "price": 250000, "loan_rate": 3.5, "loan_years": 25
        }));
        let out = run_project(args(file.path().to_str().unwrap()), &CliConfig::default()).unwrap();
        let payment = out["result"]["monthly_payment"].as_f64().unwrap();
        assert!((payment - 1251.56).abs() < 0.1);
        assert!(out["result"].get("dscr").is_none());
        assert_eq!(out["result"]["project"]["id"], "a1");
    }

    #[test]
    fn test_flags_override_file_and_config_ratio_applies() {
        let file = write_input(&json!({
            "project": {"price": 250000, "loan_rate": 3.5, "loan_years": 25},
            "monthly_rent": "900"
        }));
        let mut a = args(file.path().to_str().unwrap());
        a.rent = Some("2000".into());
        let config = CliConfig {
            expense_ratio: 0.2,
            ..CliConfig::default()
        };

        let out = run_project(a, &config).unwrap();
        let r = &out["result"];
        let payment = r["monthly_payment"].as_f64().unwrap();
        let expenses = r["monthly_expenses"].as_f64().unwrap();
        assert!((expenses - payment * 0.2).abs() < 1e-9);
        assert_eq!(r["monthly_rent"], 2000.0);
        assert_eq!(r["dscr"]["tier"], "Comfortable");
    }

    #[test]
    fn test_invalid_ratio_flag_is_error() {
        let file = write_input(&json!({"price": 100000, "loan_years": 10}));
        let mut a = args(file.path().to_str().unwrap());
        a.expense_ratio = Some(-0.5);
        assert!(run_project(a, &CliConfig::default()).is_err());
    }
}
