//! The gate set a circuit can be built from.
//!
//! Gates that Intel-QS can apply directly (Paulis, Hadamard, axis rotations
//! and controlled Paulis) are grouped by [`Axis`], mirroring the `Apply*`
//! method families of `iqs::QubitRegister`. Everything else must be lowered
//! into those before code generation.

use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// Axis of a Pauli operator or rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes, in `x y z` order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];
}

/// A built-in gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// `x`, `y`, `z`.
    Pauli(Axis),
    /// `h`.
    H,
    /// `rx`, `ry`, `rz`.
    Rotation(Axis, Angle),
    /// `cx`, `cy`, `cz`: control first, target second.
    ControlledPauli(Axis),

    /// `id`.
    I,
    S,
    Sdg,
    T,
    Tdg,
    /// sqrt(X).
    SX,
    SXdg,
    /// `p(λ)`: diag(1, e^iλ).
    Phase(Angle),
    /// `u(θ, φ, λ)` = Rz(φ)·Ry(θ)·Rz(λ) up to phase.
    U(Angle, Angle, Angle),
    /// `prx(θ, φ)` = Rz(φ)·Rx(θ)·Rz(-φ).
    PRX(Angle, Angle),
    CH,
    Swap,
    ISwap,
    /// `crx`, `cry`, `crz`.
    ControlledRotation(Axis, Angle),
    /// `cp(λ)`.
    ControlledPhase(Angle),
    /// `rxx`, `ryy`, `rzz`: exp(-iθ/2 · P⊗P).
    Ising(Axis, Angle),
    /// Toffoli.
    CCX,
    /// Fredkin.
    CSwap,
}

impl StandardGate {
    /// The OpenQASM name.
    pub fn name(&self) -> &'static str {
        use Axis::{X, Y, Z};
        match self {
            Self::Pauli(X) => "x",
            Self::Pauli(Y) => "y",
            Self::Pauli(Z) => "z",
            Self::H => "h",
            Self::Rotation(X, _) => "rx",
            Self::Rotation(Y, _) => "ry",
            Self::Rotation(Z, _) => "rz",
            Self::ControlledPauli(X) => "cx",
            Self::ControlledPauli(Y) => "cy",
            Self::ControlledPauli(Z) => "cz",
            Self::I => "id",
            Self::S => "s",
            Self::Sdg => "sdg",
            Self::T => "t",
            Self::Tdg => "tdg",
            Self::SX => "sx",
            Self::SXdg => "sxdg",
            Self::Phase(_) => "p",
            Self::U(..) => "u",
            Self::PRX(..) => "prx",
            Self::CH => "ch",
            Self::Swap => "swap",
            Self::ISwap => "iswap",
            Self::ControlledRotation(X, _) => "crx",
            Self::ControlledRotation(Y, _) => "cry",
            Self::ControlledRotation(Z, _) => "crz",
            Self::ControlledPhase(_) => "cp",
            Self::Ising(X, _) => "rxx",
            Self::Ising(Y, _) => "ryy",
            Self::Ising(Z, _) => "rzz",
            Self::CCX => "ccx",
            Self::CSwap => "cswap",
        }
    }

    /// Number of qubits the gate acts on.
    pub fn arity(&self) -> usize {
        match self {
            Self::ControlledPauli(_)
            | Self::CH
            | Self::Swap
            | Self::ISwap
            | Self::ControlledRotation(..)
            | Self::ControlledPhase(_)
            | Self::Ising(..) => 2,
            Self::CCX | Self::CSwap => 3,
            _ => 1,
        }
    }

    /// The gate's angles in OpenQASM argument order.
    pub fn angles(&self) -> Vec<&Angle> {
        match self {
            Self::Rotation(_, a)
            | Self::Phase(a)
            | Self::ControlledRotation(_, a)
            | Self::ControlledPhase(a)
            | Self::Ising(_, a) => vec![a],
            Self::U(theta, phi, lambda) => vec![theta, phi, lambda],
            Self::PRX(theta, phi) => vec![theta, phi],
            _ => vec![],
        }
    }

    /// Whether `iqs::QubitRegister` has a method applying this gate as is.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            Self::Pauli(_) | Self::H | Self::Rotation(..) | Self::ControlledPauli(_)
        )
    }

    /// Whether two identical applications in a row are the identity.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            Self::Pauli(_)
                | Self::H
                | Self::ControlledPauli(_)
                | Self::I
                | Self::CH
                | Self::Swap
                | Self::CCX
                | Self::CSwap
        )
    }

    /// Axis and angle of a single-qubit rotation.
    pub fn as_rotation(&self) -> Option<(Axis, &Angle)> {
        match self {
            Self::Rotation(axis, angle) => Some((*axis, angle)),
            _ => None,
        }
    }
}
