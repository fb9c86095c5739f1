//! Circuit command implementation.

use anyhow::{Context, Result};
use console::style;

use super::common::{self, ConfigOverrides};

/// Execute the circuit command.
pub fn execute(
    kind: &str,
    num_qubits: u32,
    output: Option<&str>,
    emit_qasm: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<()> {
    let circuit = common::build_circuit(kind, num_qubits)?;
    let generator = common::build_generator(overrides)?;
    let output = common::output_path(output, &generator);

    println!(
        "{} Generating {} ({} qubits, depth {}) at optimization level {}",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.depth(),
        style(generator.config().optimization_level).yellow()
    );

    let written = match emit_qasm {
        Some(path) => generator.translate_from_circuit_saving_qasm(&circuit, &output, path),
        None => generator.translate_from_circuit(&circuit, &output),
    }
    .with_context(|| format!("Failed to generate program for '{}'", circuit.name()))?;

    if let Some(path) = emit_qasm {
        println!("  Lowered QASM: {}", style(path).green());
    }
    common::print_saved(&written);
    Ok(())
}
