use clap::Args;
use serde_json::{json, Value};
use tracing::debug;

use realty_finance_core::normalize::{normalize, try_normalize, NumericInput};

/// Arguments for reading a raw numeric field
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NormalizeArgs {
    /// Raw value as typed, e.g. "1250,50"
    pub value: String,

    /// Fail on text that holds no number instead of reading it as 0
    #[arg(long)]
    pub strict: bool,
}

pub fn run_normalize(args: NormalizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = NumericInput::Text(args.value.clone());

    let value = if args.strict {
        try_normalize(&raw)?
    } else {
        Some(normalize(&raw))
    };
    debug!(?raw, ?value, strict = args.strict, "normalized");

    Ok(json!({
        "input": args.value,
        "value": value,
    }))
}
