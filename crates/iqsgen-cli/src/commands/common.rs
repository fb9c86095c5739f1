//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use iqsgen_codegen::{Generator, GeneratorConfig};
use iqsgen_ir::Circuit;

/// Command-line flags that override the loaded configuration.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub config: Option<String>,
    pub template: Option<String>,
    pub register: Option<String>,
    pub optimization_level: Option<u8>,
}

/// Load the configuration (file, then environment) and apply flag overrides.
pub fn load_config(overrides: &ConfigOverrides) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load(overrides.config.as_deref().map(Path::new))
        .context("Failed to load configuration")?;

    if let Some(template) = &overrides.template {
        config.template_path = PathBuf::from(template);
    }
    if let Some(register) = &overrides.register {
        config.register.clone_from(register);
    }
    if let Some(level) = overrides.optimization_level {
        config.optimization_level = level;
    }

    config.validate().context("Invalid command-line option")?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Build a generator from the configuration and flags.
pub fn build_generator(overrides: &ConfigOverrides) -> Result<Generator> {
    let config = load_config(overrides)?;
    Ok(Generator::new(config)?)
}

/// Resolve the output file: the flag if given, else the configured path.
pub fn output_path(output: Option<&str>, generator: &Generator) -> PathBuf {
    output.map_or_else(|| generator.config().output_path.clone(), PathBuf::from)
}

/// Build one of the named example circuits.
pub fn build_circuit(kind: &str, num_qubits: u32) -> Result<Circuit> {
    let circuit = match kind.to_lowercase().as_str() {
        "bell" => Circuit::bell()?,
        "ghz" => Circuit::ghz(num_qubits)?,
        "qft" => Circuit::qft(num_qubits)?,
        other => anyhow::bail!("Unknown circuit: '{other}'. Available: bell, ghz, qft"),
    };
    Ok(circuit)
}

/// Print the confirmation line for a written program.
pub fn print_saved(path: &Path) {
    println!("{} Generation complete", style("✓").green().bold());
    println!("The string has been saved in the file '{}'.", path.display());
}
