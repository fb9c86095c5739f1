//! Peephole optimization passes.

use std::f64::consts::PI;

use iqsgen_ir::{Angle, CircuitDag, Instruction, QubitId, StandardGate};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

use super::EPSILON;

/// Counters left in the [`PropertySet`] by the optimization passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationStats {
    /// Gates removed by inverse-pair cancellation.
    pub cancelled: usize,
    /// Rotations folded into a neighbour or dropped as identity.
    pub merged: usize,
}

impl OptimizationStats {
    fn record(properties: &mut PropertySet, update: impl FnOnce(&mut Self)) {
        if let Some(stats) = properties.get_mut::<Self>() {
            update(stats);
        } else {
            let mut stats = Self::default();
            update(&mut stats);
            properties.insert(stats);
        }
    }
}

/// A linear rewrite buffer that tracks, per qubit, the stack of surviving
/// operations on that wire.
///
/// An operation is "adjacent" to the incoming one when it sits on top of
/// the stack of every qubit the incoming one touches.
struct WireWindow {
    ops: Vec<Option<Instruction>>,
    stacks: FxHashMap<QubitId, Vec<usize>>,
}

impl WireWindow {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            stacks: FxHashMap::default(),
        }
    }

    /// Index of the operation directly preceding `inst` on all its wires.
    fn adjacent(&self, inst: &Instruction) -> Option<usize> {
        let mut tops = inst
            .qubits
            .iter()
            .map(|q| self.stacks.get(q).and_then(|s| s.last().copied()));
        let first = tops.next()??;
        tops.all(|t| t == Some(first)).then_some(first)
    }

    fn push(&mut self, inst: Instruction) {
        let index = self.ops.len();
        for &q in &inst.qubits {
            self.stacks.entry(q).or_default().push(index);
        }
        self.ops.push(Some(inst));
    }

    /// Drop the operation at `index`, which must be adjacent.
    fn pop(&mut self, index: usize) {
        if let Some(inst) = self.ops[index].take() {
            for q in &inst.qubits {
                if let Some(stack) = self.stacks.get_mut(q) {
                    stack.pop();
                }
            }
        }
    }

    fn into_dag(self, template: &CircuitDag) -> CompileResult<CircuitDag> {
        let mut dag = template.empty_like();
        for inst in self.ops.into_iter().flatten() {
            dag.apply(inst)?;
        }
        Ok(dag)
    }
}

/// Removes adjacent pairs of identical self-inverse gates.
///
/// `h q[0]; h q[0];` and `cx q[0],q[1]; cx q[0],q[1];` vanish when nothing
/// else touches those wires in between. Removal cascades, so
/// `h; cx; cx; h` on the same wires disappears entirely.
pub struct CancelInverses;

impl Pass for CancelInverses {
    fn name(&self) -> &'static str {
        "CancelInverses"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let mut window = WireWindow::new();
        let mut cancelled = 0usize;

        for inst in dag.topological_ops() {
            let cancels = inst.standard_gate().is_some_and(StandardGate::is_self_inverse)
                && window
                    .adjacent(inst)
                    .is_some_and(|prev| window.ops[prev].as_ref() == Some(inst));

            match window.adjacent(inst) {
                Some(prev) if cancels => {
                    window.pop(prev);
                    cancelled += 2;
                }
                _ => window.push(inst.clone()),
            }
        }

        debug!("Cancelled {cancelled} gates");
        if cancelled > 0 {
            *dag = window.into_dag(dag)?;
        }
        OptimizationStats::record(properties, |s| s.cancelled += cancelled);
        Ok(())
    }
}

/// A rotation by a multiple of 4π is the identity, phase included.
fn is_identity_angle(theta: &Angle) -> bool {
    theta.value().is_some_and(|v| {
        let r = v.rem_euclid(4.0 * PI);
        r < EPSILON || 4.0 * PI - r < EPSILON
    })
}

/// Merges adjacent same-axis rotations on one qubit.
///
/// `rz(a) q; rz(b) q;` becomes `rz(a+b) q;`, and the result is dropped when
/// the summed angle is a multiple of 4π.
pub struct MergeRotations;

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "MergeRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let mut window = WireWindow::new();
        let mut merged = 0usize;

        for inst in dag.topological_ops() {
            let Some((axis, theta)) = inst.standard_gate().and_then(StandardGate::as_rotation) else {
                window.push(inst.clone());
                continue;
            };

            let previous = window.adjacent(inst).and_then(|prev| {
                let prev_gate = window.ops[prev].as_ref()?.standard_gate()?;
                match prev_gate.as_rotation() {
                    Some((prev_axis, prev_theta)) if prev_axis == axis => {
                        Some((prev, prev_theta.plus(theta)))
                    }
                    _ => None,
                }
            });

            match previous {
                Some((prev, sum)) => {
                    merged += 1;
                    window.pop(prev);
                    if is_identity_angle(&sum) {
                        merged += 1;
                    } else {
                        window.push(Instruction::gate(
                            StandardGate::Rotation(axis, sum),
                            inst.qubits.iter().copied(),
                        ));
                    }
                }
                None if is_identity_angle(theta) => merged += 1,
                None => window.push(inst.clone()),
            }
        }

        debug!("Merged {merged} rotations");
        if merged > 0 {
            *dag = window.into_dag(dag)?;
        }
        OptimizationStats::record(properties, |s| s.merged += merged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqsgen_ir::{Axis, Circuit};

    fn names(dag: &CircuitDag) -> Vec<String> {
        dag.topological_ops()
            .map(|inst| inst.name().to_string())
            .collect()
    }

    fn dag_of(qubits: u32, gates: &[(StandardGate, &[u32])]) -> CircuitDag {
        let mut circuit = Circuit::with_size("test", qubits);
        for (gate, operands) in gates {
            circuit
                .apply(gate.clone(), operands.iter().copied().map(QubitId))
                .unwrap();
        }
        circuit.into_dag()
    }

    const CX: StandardGate = StandardGate::ControlledPauli(Axis::X);

    fn rot(axis: Axis, radians: f64) -> StandardGate {
        StandardGate::Rotation(axis, Angle::constant(radians))
    }

    #[test]
    fn test_cancel_adjacent_hadamards() {
        let mut dag = dag_of(
            1,
            &[
                (StandardGate::H, &[0]),
                (StandardGate::H, &[0]),
                (StandardGate::Pauli(Axis::X), &[0]),
            ],
        );
        let mut props = PropertySet::new();

        CancelInverses.run(&mut dag, &mut props).unwrap();
        assert_eq!(names(&dag), vec!["x"]);
        assert_eq!(props.get::<OptimizationStats>().unwrap().cancelled, 2);
    }

    #[test]
    fn test_cancel_cascades() {
        let mut dag = dag_of(
            2,
            &[
                (StandardGate::H, &[1]),
                (CX, &[0, 1]),
                (CX, &[0, 1]),
                (StandardGate::H, &[1]),
            ],
        );

        CancelInverses.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(dag.num_ops(), 0);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_no_cancel_with_interleaved_gate() {
        let mut dag = dag_of(
            2,
            &[(CX, &[0, 1]), (StandardGate::Pauli(Axis::X), &[1]), (CX, &[0, 1])],
        );

        CancelInverses.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(names(&dag), vec!["cx", "x", "cx"]);
    }

    #[test]
    fn test_no_cancel_reversed_cx() {
        let mut dag = dag_of(2, &[(CX, &[0, 1]), (CX, &[1, 0])]);

        CancelInverses.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(dag.num_ops(), 2);
    }

    #[test]
    fn test_rotations_are_not_cancelled() {
        let mut dag = dag_of(1, &[(rot(Axis::X, 0.3), &[0]), (rot(Axis::X, 0.3), &[0])]);

        CancelInverses.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(dag.num_ops(), 2);
    }

    #[test]
    fn test_gates_on_other_wires_do_not_block() {
        let mut dag = dag_of(
            2,
            &[
                (StandardGate::Pauli(Axis::Z), &[0]),
                (StandardGate::H, &[1]),
                (StandardGate::Pauli(Axis::Z), &[0]),
            ],
        );

        CancelInverses.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(names(&dag), vec!["h"]);
    }

    #[test]
    fn test_merge_rotations() {
        let mut dag = dag_of(
            1,
            &[
                (rot(Axis::Z, 0.25), &[0]),
                (rot(Axis::Z, 0.5), &[0]),
                (rot(Axis::X, 0.1), &[0]),
            ],
        );
        let mut props = PropertySet::new();

        MergeRotations.run(&mut dag, &mut props).unwrap();
        let gates: Vec<_> = dag
            .topological_ops()
            .filter_map(|inst| inst.standard_gate().cloned())
            .collect();
        assert_eq!(gates, vec![rot(Axis::Z, 0.75), rot(Axis::X, 0.1)]);
        assert_eq!(props.get::<OptimizationStats>().unwrap().merged, 1);
    }

    #[test]
    fn test_merge_keeps_symbols() {
        let theta = StandardGate::Rotation(Axis::Y, Angle::symbol("theta"));
        let mut dag = dag_of(1, &[(theta, &[0]), (rot(Axis::Y, 0.5), &[0])]);

        MergeRotations.run(&mut dag, &mut PropertySet::new()).unwrap();
        let merged = dag.topological_ops().next().unwrap().standard_gate().cloned();
        assert_eq!(
            merged,
            Some(StandardGate::Rotation(
                Axis::Y,
                Angle::symbol("theta") + Angle::constant(0.5)
            ))
        );
    }

    #[test]
    fn test_merge_to_identity_drops_gate() {
        let mut dag = dag_of(1, &[(rot(Axis::Y, 3.0 * PI), &[0]), (rot(Axis::Y, PI), &[0])]);

        MergeRotations.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(dag.num_ops(), 0);
    }

    #[test]
    fn test_two_pi_rotation_is_kept() {
        let mut dag = dag_of(1, &[(rot(Axis::Z, PI), &[0]), (rot(Axis::Z, PI), &[0])]);

        MergeRotations.run(&mut dag, &mut PropertySet::new()).unwrap();
        assert_eq!(names(&dag), vec!["rz"]);
    }

    #[test]
    fn test_stats_accumulate_across_runs() {
        let mut props = PropertySet::new();
        for _ in 0..2 {
            let x = StandardGate::Pauli(Axis::X);
            let mut dag = dag_of(1, &[(x.clone(), &[0]), (x, &[0])]);
            CancelInverses.run(&mut dag, &mut props).unwrap();
        }
        assert_eq!(props.get::<OptimizationStats>().unwrap().cancelled, 4);
    }
}
