//! Final basis check.

use iqsgen_ir::CircuitDag;
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Analysis pass that fails if any operation is still outside the basis.
///
/// Runs last so a bad rewrite in an earlier pass surfaces as a compile
/// error instead of a line the translator later rejects.
pub struct VerifyBasis;

impl Pass for VerifyBasis {
    fn name(&self) -> &'static str {
        "VerifyBasis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        if let Some(inst) = dag
            .topological_ops()
            .find(|inst| !basis.contains(inst.name()))
        {
            return Err(CompileError::GateNotInBasis(inst.name().to_string()));
        }

        debug!("All {} operations are in the target basis", dag.num_ops());
        Ok(())
    }

    fn should_run(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }
}
