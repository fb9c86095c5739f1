//! Basis translation to the Intel-QS gate set.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use iqsgen_ir::{Angle, Axis, CircuitDag, Instruction, Operation, QubitId, StandardGate};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Nested decompositions never go deeper than `cswap -> ccx -> basis`.
const MAX_EXPANSION_DEPTH: usize = 4;

/// Basis translation pass.
///
/// Rewrites every gate outside the target basis into Intel-QS basis gates
/// (`rx ry rz x y z h cx cy cz`). Decompositions are exact up to a global
/// phase. Gates already in the basis pass through untouched, so a wider
/// basis keeps more of the input circuit.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, dag: &mut CircuitDag, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        // Rebuild instead of substituting in place so replacements land at
        // the original position on every wire.
        let mut new_dag = dag.empty_like();
        let mut translated = 0usize;

        for inst in dag.topological_ops() {
            if inst.is_barrier() || basis.contains(inst.name()) {
                new_dag.apply(inst.clone())?;
                continue;
            }
            translated += 1;
            for replacement in lower(inst, basis, 0)? {
                new_dag.apply(replacement)?;
            }
        }

        debug!("Translated {translated} gates into the target basis");
        *dag = new_dag;
        Ok(())
    }

    fn should_run(&self, _dag: &CircuitDag, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }
}

/// Expand `instruction` until every gate it produces is in `basis`.
fn lower(
    instruction: &Instruction,
    basis: &BasisGates,
    depth: usize,
) -> CompileResult<Vec<Instruction>> {
    if instruction.is_barrier() || basis.contains(instruction.name()) {
        return Ok(vec![instruction.clone()]);
    }
    if depth > MAX_EXPANSION_DEPTH {
        return Err(CompileError::PassFailed {
            name: "BasisTranslation".into(),
            reason: format!(
                "decomposition of '{}' does not terminate",
                instruction.name()
            ),
        });
    }

    let steps = match &instruction.operation {
        Operation::Gate(gate) => decompose(gate, &instruction.qubits),
        Operation::Opaque(_) | Operation::Barrier => None,
    }
    .ok_or_else(|| CompileError::GateNotInBasis(instruction.name().to_string()))?;

    let mut lowered = Vec::with_capacity(steps.len());
    for step in &steps {
        lowered.extend(lower(step, basis, depth + 1)?);
    }
    Ok(lowered)
}

fn h(qubit: QubitId) -> Instruction {
    Instruction::gate(StandardGate::H, [qubit])
}

fn cx(control: QubitId, target: QubitId) -> Instruction {
    Instruction::gate(StandardGate::ControlledPauli(Axis::X), [control, target])
}

fn rotate(axis: Axis, theta: Angle, qubit: QubitId) -> Instruction {
    Instruction::gate(StandardGate::Rotation(axis, theta), [qubit])
}

fn rz(theta: Angle, qubit: QubitId) -> Instruction {
    rotate(Axis::Z, theta, qubit)
}

fn fixed(radians: f64) -> Angle {
    Angle::constant(radians)
}

/// Controlled rotation about `axis`: the Y and Z cases conjugate the
/// target rotation by CX, X is Y turned by Rz(±π/2).
fn controlled_rotation(axis: Axis, theta: &Angle, c: QubitId, t: QubitId) -> Vec<Instruction> {
    let conjugated = |axis| {
        vec![
            rotate(axis, theta.scaled(0.5), t),
            cx(c, t),
            rotate(axis, theta.scaled(-0.5), t),
            cx(c, t),
        ]
    };
    match axis {
        Axis::X => {
            let mut steps = vec![rz(fixed(FRAC_PI_2), t)];
            steps.extend(conjugated(Axis::Y));
            steps.push(rz(fixed(-FRAC_PI_2), t));
            steps
        }
        Axis::Y | Axis::Z => conjugated(axis),
    }
}

/// exp(-iθ/2 · P⊗P): rotate both qubits so P becomes Z, then CX·Rz(θ)·CX.
fn ising(axis: Axis, theta: &Angle, a: QubitId, b: QubitId) -> Vec<Instruction> {
    let (into_z, out_of_z): (Vec<Instruction>, Vec<Instruction>) = match axis {
        Axis::X => (vec![h(a), h(b)], vec![h(a), h(b)]),
        Axis::Y => (
            vec![rotate(Axis::X, fixed(FRAC_PI_2), a), rotate(Axis::X, fixed(FRAC_PI_2), b)],
            vec![rotate(Axis::X, fixed(-FRAC_PI_2), a), rotate(Axis::X, fixed(-FRAC_PI_2), b)],
        ),
        Axis::Z => (vec![], vec![]),
    };
    let mut steps = into_z;
    steps.extend([cx(a, b), rz(theta.clone(), b), cx(a, b)]);
    steps.extend(out_of_z);
    steps
}

/// Toffoli with T/T† replaced by Rz(±π/4).
fn toffoli(a: QubitId, b: QubitId, c: QubitId) -> Vec<Instruction> {
    let t = |q| rz(fixed(FRAC_PI_4), q);
    let tdg = |q| rz(fixed(-FRAC_PI_4), q);
    vec![
        h(c),
        cx(b, c),
        tdg(c),
        cx(a, c),
        t(c),
        cx(b, c),
        tdg(c),
        cx(a, c),
        t(b),
        t(c),
        h(c),
        cx(a, b),
        t(a),
        tdg(b),
        cx(a, b),
    ]
}

/// One decomposition step for `gate`, or `None` if no rule applies.
///
/// Native gates have no rule: reaching one here means the caller's basis
/// lacks it.
fn decompose(gate: &StandardGate, qubits: &[QubitId]) -> Option<Vec<Instruction>> {
    if gate.is_native() {
        return None;
    }
    let q0 = *qubits.first()?;
    let q1 = || qubits.get(1).copied();

    let steps = match gate {
        StandardGate::I => vec![],

        StandardGate::S => vec![rz(fixed(FRAC_PI_2), q0)],
        StandardGate::Sdg => vec![rz(fixed(-FRAC_PI_2), q0)],
        StandardGate::T => vec![rz(fixed(FRAC_PI_4), q0)],
        StandardGate::Tdg => vec![rz(fixed(-FRAC_PI_4), q0)],
        StandardGate::Phase(lambda) => vec![rz(lambda.clone(), q0)],

        StandardGate::SX => vec![rotate(Axis::X, fixed(FRAC_PI_2), q0)],
        StandardGate::SXdg => vec![rotate(Axis::X, fixed(-FRAC_PI_2), q0)],

        // Applied right to left: Rz(λ) first.
        StandardGate::U(theta, phi, lambda) => vec![
            rz(lambda.clone(), q0),
            rotate(Axis::Y, theta.clone(), q0),
            rz(phi.clone(), q0),
        ],

        StandardGate::PRX(theta, phi) => vec![
            rz(phi.scaled(-1.0), q0),
            rotate(Axis::X, theta.clone(), q0),
            rz(phi.clone(), q0),
        ],

        StandardGate::CH => {
            let t = q1()?;
            vec![
                rotate(Axis::Y, fixed(FRAC_PI_4), t),
                cx(q0, t),
                rotate(Axis::Y, fixed(-FRAC_PI_4), t),
            ]
        }

        StandardGate::Swap => {
            let q1 = q1()?;
            vec![cx(q0, q1), cx(q1, q0), cx(q0, q1)]
        }

        StandardGate::ISwap => {
            let q1 = q1()?;
            vec![
                rz(fixed(FRAC_PI_2), q0),
                rz(fixed(FRAC_PI_2), q1),
                h(q0),
                cx(q0, q1),
                cx(q1, q0),
                h(q1),
            ]
        }

        StandardGate::ControlledRotation(axis, theta) => {
            controlled_rotation(*axis, theta, q0, q1()?)
        }

        StandardGate::ControlledPhase(lambda) => {
            let t = q1()?;
            vec![
                rz(lambda.scaled(0.5), q0),
                cx(q0, t),
                rz(lambda.scaled(-0.5), t),
                cx(q0, t),
                rz(lambda.scaled(0.5), t),
            ]
        }

        StandardGate::Ising(axis, theta) => ising(*axis, theta, q0, q1()?),

        StandardGate::CCX => toffoli(q0, q1()?, *qubits.get(2)?),

        StandardGate::CSwap => {
            let (b, c) = (q1()?, *qubits.get(2)?);
            vec![
                cx(c, b),
                Instruction::gate(StandardGate::CCX, [q0, b, c]),
                cx(c, b),
            ]
        }

        StandardGate::Pauli(_)
        | StandardGate::H
        | StandardGate::Rotation(..)
        | StandardGate::ControlledPauli(_) => return None,
    };

    Some(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqsgen_ir::Circuit;

    fn lowered(circuit: Circuit) -> CircuitDag {
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new().with_basis(BasisGates::intel_qs());
        BasisTranslation.run(&mut dag, &mut props).unwrap();
        dag
    }

    fn lowered_names(circuit: Circuit) -> Vec<String> {
        lowered(circuit)
            .topological_ops()
            .map(|inst| inst.name().to_string())
            .collect()
    }

    fn circuit_with(qubits: u32, gates: Vec<(StandardGate, Vec<u32>)>) -> Circuit {
        let mut circuit = Circuit::with_size("test", qubits);
        for (gate, operands) in gates {
            circuit
                .apply(gate, operands.into_iter().map(QubitId))
                .unwrap();
        }
        circuit
    }

    #[test]
    fn test_basis_gates_pass_through() {
        assert_eq!(lowered_names(Circuit::bell().unwrap()), vec!["h", "cx"]);
    }

    #[test]
    fn test_missing_basis() {
        let mut dag = Circuit::bell().unwrap().into_dag();
        let mut props = PropertySet::new();
        assert!(!BasisTranslation.should_run(&dag, &props));
        assert!(matches!(
            BasisTranslation.run(&mut dag, &mut props),
            Err(CompileError::MissingBasisGates)
        ));
    }

    #[test]
    fn test_identity_disappears() {
        let circuit = circuit_with(
            1,
            vec![(StandardGate::I, vec![0]), (StandardGate::Pauli(Axis::X), vec![0])],
        );
        assert_eq!(lowered_names(circuit), vec!["x"]);
    }

    #[test]
    fn test_u_gate_order() {
        let u = StandardGate::U(fixed(0.1), fixed(0.2), fixed(0.3));
        let dag = lowered(circuit_with(1, vec![(u, vec![0])]));

        let gates: Vec<_> = dag
            .topological_ops()
            .filter_map(|inst| inst.standard_gate().cloned())
            .collect();
        assert_eq!(
            gates,
            vec![
                StandardGate::Rotation(Axis::Z, fixed(0.3)),
                StandardGate::Rotation(Axis::Y, fixed(0.1)),
                StandardGate::Rotation(Axis::Z, fixed(0.2)),
            ]
        );
    }

    #[test]
    fn test_swap_is_three_cx() {
        let dag = lowered(circuit_with(2, vec![(StandardGate::Swap, vec![0, 1])]));
        let qubits: Vec<_> = dag.topological_ops().map(|inst| inst.qubits.clone()).collect();
        assert_eq!(
            qubits,
            vec![
                vec![QubitId(0), QubitId(1)],
                vec![QubitId(1), QubitId(0)],
                vec![QubitId(0), QubitId(1)],
            ]
        );
    }

    #[test]
    fn test_cswap_expands_through_toffoli() {
        let names = lowered_names(circuit_with(3, vec![(StandardGate::CSwap, vec![0, 1, 2])]));
        // cx + 15-gate Toffoli + cx
        assert_eq!(names.len(), 17);
        assert!(names.iter().all(|n| BasisGates::intel_qs().contains(n)));
    }

    #[test]
    fn test_translation_keeps_position() {
        let circuit = circuit_with(
            2,
            vec![
                (StandardGate::S, vec![0]),
                (StandardGate::ControlledPauli(Axis::X), vec![0, 1]),
                (StandardGate::T, vec![1]),
            ],
        );
        assert_eq!(lowered_names(circuit), vec!["rz", "cx", "rz"]);
    }

    #[test]
    fn test_symbolic_angles_are_halved_not_dropped() {
        let theta = Angle::symbol("theta");
        let circuit = circuit_with(
            2,
            vec![(StandardGate::ControlledRotation(Axis::Z, theta.clone()), vec![0, 1])],
        );
        let angles: Vec<_> = lowered(circuit)
            .topological_ops()
            .filter_map(|inst| inst.standard_gate()?.as_rotation().map(|(_, a)| a.clone()))
            .collect();
        assert_eq!(angles, vec![theta.scaled(0.5), theta.scaled(-0.5)]);
    }

    #[test]
    fn test_opaque_gate_rejected() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.opaque("oracle", [QubitId(0), QubitId(1)]).unwrap();
        let mut dag = circuit.into_dag();
        let mut props = PropertySet::new().with_basis(BasisGates::intel_qs());

        match BasisTranslation.run(&mut dag, &mut props) {
            Err(CompileError::GateNotInBasis(name)) => assert_eq!(name, "oracle"),
            other => panic!("Expected GateNotInBasis, got {other:?}"),
        }
    }

    #[test]
    fn test_narrow_basis_without_rule() {
        let mut dag = circuit_with(1, vec![(StandardGate::H, vec![0])]).into_dag();
        let mut props = PropertySet::new().with_basis(BasisGates::new(["rz", "cx"]));

        assert!(matches!(
            BasisTranslation.run(&mut dag, &mut props),
            Err(CompileError::GateNotInBasis(name)) if name == "h"
        ));
    }

    #[test]
    fn test_every_standard_gate_lowers() {
        let theta = || fixed(0.7);
        let mut gates = vec![
            (StandardGate::I, vec![0]),
            (StandardGate::H, vec![0]),
            (StandardGate::S, vec![0]),
            (StandardGate::Sdg, vec![0]),
            (StandardGate::T, vec![0]),
            (StandardGate::Tdg, vec![0]),
            (StandardGate::SX, vec![0]),
            (StandardGate::SXdg, vec![0]),
            (StandardGate::Phase(theta()), vec![0]),
            (StandardGate::U(theta(), theta(), theta()), vec![0]),
            (StandardGate::PRX(theta(), theta()), vec![0]),
            (StandardGate::CH, vec![0, 1]),
            (StandardGate::Swap, vec![0, 1]),
            (StandardGate::ISwap, vec![0, 1]),
            (StandardGate::ControlledPhase(theta()), vec![0, 1]),
            (StandardGate::CCX, vec![0, 1, 2]),
            (StandardGate::CSwap, vec![0, 1, 2]),
        ];
        for axis in Axis::ALL {
            gates.push((StandardGate::Pauli(axis), vec![0]));
            gates.push((StandardGate::Rotation(axis, theta()), vec![0]));
            gates.push((StandardGate::ControlledPauli(axis), vec![0, 1]));
            gates.push((StandardGate::ControlledRotation(axis, theta()), vec![0, 1]));
            gates.push((StandardGate::Ising(axis, theta()), vec![0, 1]));
        }

        let basis = BasisGates::intel_qs();
        for name in lowered_names(circuit_with(3, gates)) {
            assert!(basis.contains(&name), "{name} left in lowered circuit");
        }
    }
}
