//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Why an instruction could not be added to a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand is not a qubit of the circuit.
    #[error("'{operation}' on {qubit}: the circuit has no such qubit")]
    UnknownQubit { operation: String, qubit: QubitId },

    /// A gate was given the wrong number of operands.
    #[error("'{operation}' acts on {expected} qubits, got {got}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        got: usize,
    },

    /// The same qubit appears twice among an instruction's operands.
    #[error("'{operation}' uses {qubit} more than once")]
    DuplicateQubit { operation: String, qubit: QubitId },

    /// The dependency graph no longer matches the wires.
    #[error("Inconsistent circuit graph: {0}")]
    InvalidDag(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
