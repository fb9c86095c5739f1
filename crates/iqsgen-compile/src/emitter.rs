//! OpenQASM 2 emitter for lowered circuits.
//!
//! The output is exactly the line format the Intel-QS translator reads:
//! the version line, the `qelib1.inc` include, the register declaration on
//! line 3, then one gate per line.

use std::f64::consts::PI;

use iqsgen_ir::{Angle, CircuitDag, Instruction, Operation, QubitId};

use crate::error::{CompileError, CompileResult};
use crate::passes::EPSILON;
use crate::property::BasisGates;

/// Denominators tried when rendering an angle as a fraction of pi.
const PI_DENOMINATORS: [i32; 6] = [1, 2, 3, 4, 6, 8];

/// Largest numerator rendered as `k*pi/d`.
const MAX_PI_NUMERATOR: f64 = 16.0;

/// Emit a lowered DAG as OpenQASM 2.0 source.
///
/// Every operation must be an Intel-QS basis gate with concrete angles.
pub fn emit_qasm2(dag: &CircuitDag) -> CompileResult<String> {
    let mut emitter = Qasm2Emitter::new();
    emitter.emit_dag(dag)?;
    Ok(emitter.output)
}

struct Qasm2Emitter {
    output: String,
    basis: BasisGates,
}

impl Qasm2Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            basis: BasisGates::intel_qs(),
        }
    }

    fn emit_dag(&mut self, dag: &CircuitDag) -> CompileResult<()> {
        let register_size = dag.qubits().map(|q| q.0 + 1).max().unwrap_or(0);

        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        self.writeln(&format!("qreg q[{register_size}];"));

        for instruction in dag.topological_ops() {
            self.emit_instruction(instruction)?;
        }
        Ok(())
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> CompileResult<()> {
        let gate = match &instruction.operation {
            Operation::Gate(gate) if self.basis.contains(gate.name()) => gate,
            _ => return Err(CompileError::GateNotInBasis(instruction.name().to_string())),
        };

        let qubits = emit_qubits(&instruction.qubits);
        let params = gate
            .angles()
            .into_iter()
            .map(emit_param)
            .collect::<CompileResult<Vec<_>>>()?;

        if params.is_empty() {
            self.writeln(&format!("{} {qubits};", gate.name()));
        } else {
            self.writeln(&format!("{}({}) {qubits};", gate.name(), params.join(",")));
        }
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(QubitId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn emit_param(param: &Angle) -> CompileResult<String> {
    if param.is_symbolic() {
        let names: Vec<_> = param.symbols().collect();
        return Err(CompileError::UnboundParameter(names.join(", ")));
    }
    let value = param
        .value()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CompileError::NonFiniteParameter(param.to_string()))?;
    Ok(format_angle(value))
}

/// Render an angle, preferring `k*pi/d` when it matches exactly.
#[allow(clippy::cast_possible_truncation)]
pub fn format_angle(value: f64) -> String {
    if value.abs() < EPSILON {
        return "0".into();
    }

    for d in PI_DENOMINATORS {
        let denominator = f64::from(d);
        let k = (value * denominator / PI).round();
        if k != 0.0
            && k.abs() <= MAX_PI_NUMERATOR
            && (value - k * PI / denominator).abs() < EPSILON
        {
            return pi_fraction(k as i32, d);
        }
    }

    format!("{value}")
}

fn pi_fraction(k: i32, d: i32) -> String {
    let numerator = match k {
        1 => "pi".to_string(),
        -1 => "-pi".to_string(),
        k => format!("{k}*pi"),
    };
    if d == 1 {
        numerator
    } else {
        format!("{numerator}/{d}")
    }
}
