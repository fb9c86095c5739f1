//! Gates command implementation.

use anyhow::Result;
use console::style;

use iqsgen_codegen::GATE_TABLE;

use super::common::{self, ConfigOverrides};

/// Execute the gates command.
///
/// The example calls use the configured register name.
pub fn execute(overrides: &ConfigOverrides) -> Result<()> {
    let config = common::load_config(overrides)?;

    println!(
        "{} Supported gates (register {}):\n",
        style("iqsgen").cyan().bold(),
        style(&config.register).yellow()
    );

    for rule in &GATE_TABLE {
        println!(
            "  {:<4} {:<18} {}",
            style(rule.name).bold(),
            rule.family.to_string(),
            style(rule.example_call(&config.register)).dim()
        );
    }
    Ok(())
}
