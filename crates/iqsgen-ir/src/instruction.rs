//! Operations placed on qubits.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// What an [`Instruction`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A built-in gate.
    Gate(StandardGate),
    /// A gate known only by name. Lowering has no rule for it.
    Opaque(String),
    /// Scheduling hint with no effect on the state.
    Barrier,
}

/// An operation and the qubits it acts on, in operand order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub operation: Operation,
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            operation: Operation::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    pub fn opaque(name: impl Into<String>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            operation: Operation::Opaque(name.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            operation: Operation::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// The OpenQASM name of the operation.
    pub fn name(&self) -> &str {
        match &self.operation {
            Operation::Gate(gate) => gate.name(),
            Operation::Opaque(name) => name,
            Operation::Barrier => "barrier",
        }
    }

    /// The built-in gate, if this is one.
    pub fn standard_gate(&self) -> Option<&StandardGate> {
        match &self.operation {
            Operation::Gate(gate) => Some(gate),
            Operation::Opaque(_) | Operation::Barrier => None,
        }
    }

    pub fn is_barrier(&self) -> bool {
        matches!(self.operation, Operation::Barrier)
    }

    /// Required operand count; opaque gates and barriers take any number.
    pub(crate) fn fixed_arity(&self) -> Option<usize> {
        self.standard_gate().map(StandardGate::arity)
    }
}
