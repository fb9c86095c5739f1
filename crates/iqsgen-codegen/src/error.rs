//! Error types for the code generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while turning QASM text into an Intel-QS program.
///
/// Every error aborts the translation in progress; no partial output is
/// ever written.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodegenError {
    /// The qubit register declaration is missing or unreadable.
    #[error("Line {line}: expected a 'qreg q[<N>];' declaration, found '{text}'")]
    MalformedHeader {
        /// 1-based line number of the expected declaration.
        line: usize,
        /// The offending source line (empty if the source is too short).
        text: String,
    },

    /// The gate is not one of the supported Intel-QS gates.
    #[error("Line {line}: unrecognized gate '{gate}' in '{text}'")]
    UnrecognizedGate {
        /// 1-based source line number.
        line: usize,
        /// Gate name as written.
        gate: String,
        /// The offending instruction.
        text: String,
    },

    /// The operand list or angle of an instruction cannot be used.
    #[error("Line {line}: {reason} in '{text}'")]
    MalformedOperand {
        /// 1-based source line number.
        line: usize,
        /// What is wrong with the operands.
        reason: String,
        /// The offending instruction.
        text: String,
    },

    /// The angle expression refers to an identifier other than `pi`.
    #[error("Line {line}: unsupported symbol '{symbol}' in angle of '{text}'")]
    UnsupportedAngle {
        /// 1-based source line number.
        line: usize,
        /// The unsupported identifier or character.
        symbol: String,
        /// The offending instruction.
        text: String,
    },

    /// The program template cannot be used.
    #[error("Cannot load template '{}': {reason}", path.display())]
    TemplateLoad {
        /// Where the template was looked up.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid generator configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Lowering a circuit to QASM failed.
    #[error("Compilation error: {0}")]
    Compile(#[from] iqsgen_compile::CompileError),
}

impl CodegenError {
    /// Source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedHeader { line, .. }
            | Self::UnrecognizedGate { line, .. }
            | Self::MalformedOperand { line, .. }
            | Self::UnsupportedAngle { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;
