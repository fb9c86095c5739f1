//! Circuits over a single flat qubit register.

use std::f64::consts::PI;

use crate::angle::Angle;
use crate::dag::CircuitDag;
use crate::error::IrResult;
use crate::gate::{Axis, StandardGate};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A named circuit whose qubits are `q[0]` to `q[n-1]`.
///
/// [`apply`](Self::apply) returns `IrResult<&mut Self>`, so building chains
/// with `?`.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    num_qubits: u32,
    dag: CircuitDag,
}

impl Circuit {
    /// A circuit with `num_qubits` qubits and no operations.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut dag = CircuitDag::new();
        for index in 0..num_qubits {
            dag.add_qubit(QubitId(index));
        }
        Self {
            name: name.into(),
            num_qubits,
            dag,
        }
    }

    /// Grow the register by one qubit and return it.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        self.dag.add_qubit(id);
        id
    }

    /// Append a built-in gate on `qubits`, in operand order.
    pub fn apply(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Append a gate known only by name.
    pub fn opaque(
        &mut self,
        name: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::opaque(name, qubits))?;
        Ok(self)
    }

    /// Append a barrier across every qubit.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::barrier((0..self.num_qubits).map(QubitId)))?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.dag.num_qubits()
    }

    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    pub fn into_dag(self) -> CircuitDag {
        self.dag
    }

    /// `h q[0]; cx q[0],q[1];`
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        circuit
            .apply(StandardGate::H, [QubitId(0)])?
            .apply(StandardGate::ControlledPauli(Axis::X), [QubitId(0), QubitId(1)])?;
        Ok(circuit)
    }

    /// Hadamard on `q[0]`, then a CNOT ladder down the register.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.apply(StandardGate::H, [QubitId(0)])?;
        for i in 1..n {
            circuit.apply(
                StandardGate::ControlledPauli(Axis::X),
                [QubitId(i - 1), QubitId(i)],
            )?;
        }
        Ok(circuit)
    }

    /// Quantum Fourier transform, final qubit reversal included.
    ///
    /// Qubit `i` gets a Hadamard followed by `cp(π/2^(j-i))` controlled by
    /// each later qubit `j`.
    pub fn qft(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("qft", n);
        for i in 0..n {
            circuit.apply(StandardGate::H, [QubitId(i)])?;
            for j in (i + 1)..n {
                circuit.apply(
                    StandardGate::ControlledPhase(qft_angle(j - i)),
                    [QubitId(j), QubitId(i)],
                )?;
            }
        }
        for i in 0..n / 2 {
            circuit.apply(StandardGate::Swap, [QubitId(i), QubitId(n - 1 - i)])?;
        }
        Ok(circuit)
    }
}

/// π / 2^distance, exact for any distance a `u32` register allows.
fn qft_angle(distance: u32) -> Angle {
    Angle::constant(PI / f64::from(distance).exp2())
}
