//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur while lowering a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] iqsgen_ir::IrError),

    /// Missing basis gates.
    #[error("Missing basis gates for translation")]
    MissingBasisGates,

    /// Gate not in target basis and no decomposition is known.
    #[error("Gate '{0}' not in target basis")]
    GateNotInBasis(String),

    /// A gate parameter still refers to an unbound symbol.
    #[error("Parameter '{0}' is unbound")]
    UnboundParameter(String),

    /// A gate parameter evaluates to NaN or infinity.
    #[error("Parameter '{0}' does not evaluate to a finite angle")]
    NonFiniteParameter(String),

    /// Pass execution failed.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Name of the failing pass.
        name: String,
        /// Why it failed.
        reason: String,
    },

    /// Invalid pass configuration.
    #[error("Invalid pass configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
