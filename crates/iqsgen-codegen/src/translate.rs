//! Translation of single QASM gate lines into Intel-QS calls.
//!
//! An instruction such as `rx(pi/2) q[0];` is split into its gate name,
//! optional angle expression and operand list. The gate name is looked up
//! in [`GATE_TABLE`](crate::gate_table::GATE_TABLE) and the matching
//! emission rule renders the call, e.g. `psi.ApplyRotationX(0, M_PI/2);`.

use std::fmt;

use crate::error::{CodegenError, CodegenResult};
use crate::gate_table::{self, GateRule};

/// One source line holding a single gate application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    line: usize,
    text: String,
}

impl Instruction {
    /// Create an instruction read from 1-based source line `line`.
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    /// 1-based line number in the source text.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The instruction as written.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.text)
    }
}

/// One rendered Intel-QS call, e.g. `psi.ApplyHadamard(3);`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslatedCall(String);

impl TranslatedCall {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TranslatedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TranslatedCall {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Translates instructions against a fixed register and pi constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    register: String,
    pi_constant: String,
}

impl Translator {
    /// Create a translator emitting calls on `register`, substituting
    /// `pi_constant` for `pi` in angles.
    pub fn new(register: impl Into<String>, pi_constant: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            pi_constant: pi_constant.into(),
        }
    }

    pub fn register(&self) -> &str {
        &self.register
    }

    pub fn pi_constant(&self) -> &str {
        &self.pi_constant
    }

    /// Translate one instruction.
    pub fn translate(&self, instruction: &Instruction) -> CodegenResult<TranslatedCall> {
        let (gate, rest) = split_gate_name(instruction.text());

        let rule = gate_table::lookup(gate).ok_or_else(|| CodegenError::UnrecognizedGate {
            line: instruction.line(),
            gate: gate.to_string(),
            text: instruction.text().to_string(),
        })?;

        let (angle_expr, operands) = split_angle(instruction, rest)?;

        let angle = match (rule.family.takes_angle(), angle_expr) {
            (true, Some(expr)) => self.substitute_angle(instruction, expr)?,
            (true, None) => {
                return Err(malformed(
                    instruction,
                    format!("rotation '{}' requires an angle", rule.name),
                ));
            }
            (false, Some(_)) => {
                return Err(malformed(
                    instruction,
                    format!("gate '{}' does not take an angle", rule.name),
                ));
            }
            (false, None) => String::new(),
        };

        let qubits = parse_operands(instruction, rule, operands)?;

        Ok(TranslatedCall(
            rule.emission.render(&self.register, &qubits, &angle),
        ))
    }

    /// Copy the angle expression, replacing the identifier `pi`.
    fn substitute_angle(&self, instruction: &Instruction, expr: &str) -> CodegenResult<String> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(malformed(instruction, "empty angle expression"));
        }

        let mut out = String::with_capacity(expr.len() + self.pi_constant.len());
        let mut rest = expr;

        while let Some(c) = rest.chars().next() {
            if c.is_ascii_digit() || c == '.' {
                let len = number_len(rest);
                out.push_str(&rest[..len]);
                rest = &rest[len..];
            } else if c.is_ascii_alphabetic() || c == '_' {
                let len = rest
                    .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                    .unwrap_or(rest.len());
                let ident = &rest[..len];
                if ident != "pi" {
                    return Err(unsupported(instruction, ident));
                }
                out.push_str(&self.pi_constant);
                rest = &rest[len..];
            } else if matches!(c, '+' | '-' | '*' | '/' | '(' | ')') || c.is_whitespace() {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            } else {
                return Err(unsupported(instruction, &c.to_string()));
            }
        }

        Ok(out)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new("psi", "M_PI")
    }
}

/// Translate `instruction` into a call on `register`, using `M_PI` for `pi`.
pub fn translate(instruction: &Instruction, register: &str) -> CodegenResult<TranslatedCall> {
    Translator::new(register, "M_PI").translate(instruction)
}

/// Split off the gate name; the rest starts at the angle or operands.
fn split_gate_name(text: &str) -> (&str, &str) {
    let text = text.trim();
    let name_end = text
        .find(|c: char| c == '(' || c == ';' || c.is_whitespace())
        .unwrap_or(text.len());
    text.split_at(name_end)
}

/// Split `(<angle>) <operands>` at the parenthesis matching the first `(`.
fn split_angle<'a>(
    instruction: &Instruction,
    rest: &'a str,
) -> CodegenResult<(Option<&'a str>, &'a str)> {
    let Some(inner) = rest.strip_prefix('(') else {
        return Ok((None, rest));
    };

    let mut depth = 1usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((Some(&inner[..i]), &inner[i + 1..]));
                }
            }
            _ => {}
        }
    }

    Err(malformed(instruction, "unbalanced parentheses in angle"))
}

fn parse_operands(
    instruction: &Instruction,
    rule: &GateRule,
    operands: &str,
) -> CodegenResult<Vec<u32>> {
    let compact: String = operands.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.strip_suffix(';').unwrap_or(&compact);

    if compact.is_empty() {
        return Err(malformed(instruction, "missing qubit operand"));
    }

    let qubits = compact
        .split(',')
        .map(|operand| parse_qubit(instruction, operand))
        .collect::<CodegenResult<Vec<_>>>()?;

    if qubits.len() != rule.arity {
        return Err(malformed(
            instruction,
            format!(
                "'{}' expects {} qubit operand(s), found {}",
                rule.name,
                rule.arity,
                qubits.len()
            ),
        ));
    }

    Ok(qubits)
}

/// Parse `<register>[<index>]`.
fn parse_qubit(instruction: &Instruction, operand: &str) -> CodegenResult<u32> {
    let Some((register, index)) = operand.split_once('[') else {
        return Err(malformed(
            instruction,
            format!("operand '{operand}' has no bracketed qubit index"),
        ));
    };
    if !crate::config::is_cpp_identifier(register) {
        return Err(malformed(
            instruction,
            format!("operand '{operand}' does not name a register"),
        ));
    }
    index
        .strip_suffix(']')
        .and_then(|index| index.parse::<u32>().ok())
        .ok_or_else(|| {
            malformed(
                instruction,
                format!("operand '{operand}' does not hold an unsigned qubit index"),
            )
        })
}

/// Length of the numeric literal at the start of `s`, exponent included.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits {
            i = j;
        }
    }
    i
}

fn malformed(instruction: &Instruction, reason: impl Into<String>) -> CodegenError {
    CodegenError::MalformedOperand {
        line: instruction.line(),
        reason: reason.into(),
        text: instruction.text().to_string(),
    }
}

fn unsupported(instruction: &Instruction, symbol: &str) -> CodegenError {
    CodegenError::UnsupportedAngle {
        line: instruction.line(),
        symbol: symbol.to_string(),
        text: instruction.text().to_string(),
    }
}
