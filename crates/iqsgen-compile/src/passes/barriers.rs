//! Barrier removal.

use iqsgen_ir::{CircuitDag, Instruction};
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Drops every barrier from the circuit.
///
/// Barriers only constrain scheduling; the Intel-QS register has no
/// counterpart for them.
pub struct RemoveBarriers;

impl Pass for RemoveBarriers {
    fn name(&self) -> &'static str {
        "RemoveBarriers"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, _properties: &mut PropertySet) -> CompileResult<()> {
        let mut new_dag = dag.empty_like();
        let mut removed = 0usize;

        for inst in dag.topological_ops() {
            if inst.is_barrier() {
                removed += 1;
                continue;
            }
            new_dag.apply(inst.clone())?;
        }

        debug!("Removed {removed} barriers");
        *dag = new_dag;
        Ok(())
    }

    fn should_run(&self, dag: &CircuitDag, _properties: &PropertySet) -> bool {
        dag.topological_ops().any(Instruction::is_barrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqsgen_ir::{Axis, Circuit, QubitId, StandardGate};

    #[test]
    fn test_barriers_removed_gates_kept() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .apply(StandardGate::H, [QubitId(0)])
            .unwrap()
            .barrier_all()
            .unwrap()
            .apply(StandardGate::ControlledPauli(Axis::X), [QubitId(0), QubitId(1)])
            .unwrap();
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new();

        assert!(RemoveBarriers.should_run(&dag, &props));
        RemoveBarriers.run(&mut dag, &mut props).unwrap();

        let names: Vec<_> = dag
            .topological_ops()
            .map(|inst| inst.name().to_string())
            .collect();
        assert_eq!(names, vec!["h", "cx"]);
        assert!(!RemoveBarriers.should_run(&dag, &props));
    }
}
