//! One-call lowering from a circuit to Intel-QS flavoured OpenQASM 2.

use iqsgen_ir::Circuit;
use tracing::{debug, instrument};

use crate::emitter::emit_qasm2;
use crate::error::{CompileError, CompileResult};
use crate::manager::{MAX_OPTIMIZATION_LEVEL, PassManagerBuilder};
use crate::passes::OptimizationStats;
use crate::property::BasisGates;

/// Lower `circuit` into `basis` and render it as OpenQASM 2 text.
///
/// The circuit itself is left untouched; the passes work on a copy of its
/// DAG.
#[instrument(skip(circuit, basis), fields(circuit = %circuit.name()))]
pub fn transpile(
    circuit: &Circuit,
    basis: &BasisGates,
    optimization_level: u8,
) -> CompileResult<String> {
    if optimization_level > MAX_OPTIMIZATION_LEVEL {
        return Err(CompileError::InvalidConfiguration(format!(
            "optimization level {optimization_level} is above the maximum of {MAX_OPTIMIZATION_LEVEL}"
        )));
    }

    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(optimization_level)
        .with_basis(basis.clone())
        .build();

    let mut dag = circuit.dag().clone();
    pm.run(&mut dag, &mut props)?;

    if let Some(stats) = props.get::<OptimizationStats>() {
        debug!(
            cancelled = stats.cancelled,
            merged = stats.merged,
            "Optimization summary"
        );
    }

    emit_qasm2(&dag)
}
