//! Translate command implementation.

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use iqsgen_codegen::read_qasm_file;

use super::common::{self, ConfigOverrides};

/// Execute the translate command.
pub fn execute(input: &str, output: Option<&str>, overrides: &ConfigOverrides) -> Result<()> {
    if !Path::new(input).exists() {
        anyhow::bail!("File not found: {input}");
    }

    let generator = common::build_generator(overrides)?;
    let output = common::output_path(output, &generator);

    println!(
        "{} Translating {} with template {}",
        style("→").cyan().bold(),
        style(input).green(),
        style(generator.config().template_path.display()).yellow()
    );

    let qasm = read_qasm_file(input).with_context(|| format!("Failed to read file: {input}"))?;
    let written = generator
        .translate_from_qasm(&qasm, &output)
        .with_context(|| format!("Failed to translate {input}"))?;

    common::print_saved(&written);
    Ok(())
}
