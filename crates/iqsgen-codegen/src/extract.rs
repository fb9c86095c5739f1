//! Splitting QASM source text into a header and gate instructions.

use crate::error::{CodegenError, CodegenResult};
use crate::translate::Instruction;

/// Line holding the `qreg` declaration, 1-based.
pub const HEADER_LINE: usize = 3;

/// The declared qubit count plus the instructions that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitDescriptor {
    qubit_count: u32,
    instructions: Vec<Instruction>,
}

impl CircuitDescriptor {
    /// Number of qubits declared by the `qreg` line.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Instructions in source order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_parts(self) -> (u32, Vec<Instruction>) {
        (self.qubit_count, self.instructions)
    }
}

/// Read the qubit count from line 3 and collect every later non-blank line.
///
/// ```rust
/// use iqsgen_codegen::extract;
///
/// let source = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\nh q[0];\n\ncx q[0],q[1];\n";
/// let descriptor = extract(source).unwrap();
/// assert_eq!(descriptor.qubit_count(), 2);
/// assert_eq!(descriptor.instructions()[1].line(), 6);
/// ```
pub fn extract(source: &str) -> CodegenResult<CircuitDescriptor> {
    let header = source.lines().nth(HEADER_LINE - 1).unwrap_or_default();
    let qubit_count = parse_qreg(header).ok_or_else(|| CodegenError::MalformedHeader {
        line: HEADER_LINE,
        text: header.to_string(),
    })?;

    let instructions = source
        .lines()
        .enumerate()
        .skip(HEADER_LINE)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| Instruction::new(idx + 1, line))
        .collect();

    Ok(CircuitDescriptor {
        qubit_count,
        instructions,
    })
}

/// Parse `qreg <name>[<N>]` anywhere on the line.
fn parse_qreg(line: &str) -> Option<u32> {
    let start = line.find("qreg")?;
    if start > 0 && !line[..start].ends_with(char::is_whitespace) {
        return None;
    }

    let decl = &line[start + "qreg".len()..];
    if !decl.starts_with(char::is_whitespace) {
        return None;
    }

    let (name, rest) = decl.split_once('[')?;
    if !crate::config::is_cpp_identifier(name.trim()) {
        return None;
    }
    let (size, _) = rest.split_once(']')?;
    size.trim().parse().ok()
}
