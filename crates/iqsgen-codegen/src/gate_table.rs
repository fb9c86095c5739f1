//! The fixed dispatch table of supported gates.
//!
//! Each entry maps a QASM gate name to its family, operand count and the
//! Intel-QS `QubitRegister` method it becomes.

use std::fmt;

/// Pauli axis of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(letter)
    }
}

/// Classification of a supported gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateFamily {
    /// `x`, `y`, `z`, `h`.
    SingleQubit,
    /// `rx`, `ry`, `rz`: one qubit and an angle.
    Rotation,
    /// `cx`, `cy`, `cz`: control then target.
    ControlledPauli,
}

impl GateFamily {
    /// Whether gates of this family take an angle.
    pub fn takes_angle(self) -> bool {
        self == GateFamily::Rotation
    }
}

impl fmt::Display for GateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateFamily::SingleQubit => "single-qubit",
            GateFamily::Rotation => "rotation",
            GateFamily::ControlledPauli => "controlled-pauli",
        };
        f.write_str(name)
    }
}

/// The Intel-QS method a gate is emitted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emission {
    /// `ApplyPauli<Axis>(q)`
    Pauli(Axis),
    /// `ApplyHadamard(q)`
    Hadamard,
    /// `ApplyRotation<Axis>(q, angle)`
    Rotation(Axis),
    /// `ApplyCPauli<Axis>(control,target)`
    ControlledPauli(Axis),
}

impl Emission {
    /// Render the call against `register`.
    ///
    /// `qubits` must hold as many indices as the gate's arity and `angle`
    /// is only read for rotations.
    pub fn render(self, register: &str, qubits: &[u32], angle: &str) -> String {
        match (self, qubits) {
            (Emission::Pauli(axis), [q, ..]) => format!("{register}.ApplyPauli{axis}({q});"),
            (Emission::Hadamard, [q, ..]) => format!("{register}.ApplyHadamard({q});"),
            (Emission::Rotation(axis), [q, ..]) => {
                format!("{register}.ApplyRotation{axis}({q}, {angle});")
            }
            (Emission::ControlledPauli(axis), [c, t, ..]) => {
                format!("{register}.ApplyCPauli{axis}({c},{t});")
            }
            (emission, _) => format!("{register}.{}();", emission.method()),
        }
    }

    /// Name of the `QubitRegister` method.
    pub fn method(self) -> String {
        match self {
            Emission::Pauli(axis) => format!("ApplyPauli{axis}"),
            Emission::Hadamard => "ApplyHadamard".to_string(),
            Emission::Rotation(axis) => format!("ApplyRotation{axis}"),
            Emission::ControlledPauli(axis) => format!("ApplyCPauli{axis}"),
        }
    }
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRule {
    /// QASM gate name (case-sensitive).
    pub name: &'static str,
    pub family: GateFamily,
    /// Number of qubit operands.
    pub arity: usize,
    pub emission: Emission,
}

impl GateRule {
    const fn new(name: &'static str, family: GateFamily, arity: usize, emission: Emission) -> Self {
        Self {
            name,
            family,
            arity,
            emission,
        }
    }

    /// A sample call with placeholder operands, for listings.
    pub fn example_call(&self, register: &str) -> String {
        let qubits: Vec<u32> = (0..).take(self.arity).collect();
        self.emission.render(register, &qubits, "<angle>")
    }
}

/// Every gate the translator accepts.
#[rustfmt::skip]
pub static GATE_TABLE: [GateRule; 10] = [
    GateRule::new("rx", GateFamily::Rotation, 1, Emission::Rotation(Axis::X)),
    GateRule::new("ry", GateFamily::Rotation, 1, Emission::Rotation(Axis::Y)),
    GateRule::new("rz", GateFamily::Rotation, 1, Emission::Rotation(Axis::Z)),
    GateRule::new("cx", GateFamily::ControlledPauli, 2, Emission::ControlledPauli(Axis::X)),
    GateRule::new("cy", GateFamily::ControlledPauli, 2, Emission::ControlledPauli(Axis::Y)),
    GateRule::new("cz", GateFamily::ControlledPauli, 2, Emission::ControlledPauli(Axis::Z)),
    GateRule::new("x", GateFamily::SingleQubit, 1, Emission::Pauli(Axis::X)),
    GateRule::new("y", GateFamily::SingleQubit, 1, Emission::Pauli(Axis::Y)),
    GateRule::new("z", GateFamily::SingleQubit, 1, Emission::Pauli(Axis::Z)),
    GateRule::new("h", GateFamily::SingleQubit, 1, Emission::Hadamard),
];

/// Find the rule for a gate name.
pub fn lookup(name: &str) -> Option<&'static GateRule> {
    GATE_TABLE.iter().find(|rule| rule.name == name)
}
