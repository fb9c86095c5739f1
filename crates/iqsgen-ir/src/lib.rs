//! iqsgen circuit representation
//!
//! The in-memory circuit the generator accepts when it is asked for an
//! Intel-QS program from a circuit rather than from QASM text. The
//! lowering crate rewrites it into the ten gates `iqs::QubitRegister` can
//! apply directly, then prints it as QASM for the translator.
//!
//! - [`QubitId`]: a qubit of the circuit's single register
//! - [`Angle`]: a rotation angle, concrete or with named parameters
//! - [`StandardGate`]: the built-in gates; [`StandardGate::is_native`] marks the Intel-QS ones
//! - [`Instruction`]: a gate, opaque gate or barrier with its operands
//! - [`CircuitDag`]: operations linked along the wires they share
//! - [`Circuit`]: a named DAG with the `bell`, `ghz` and `qft` builders
//!
//! ```rust
//! use iqsgen_ir::{Angle, Axis, Circuit, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("rotations", 2);
//! circuit
//!     .apply(StandardGate::Rotation(Axis::X, Angle::pi() / 2.0), [QubitId(0)])?
//!     .apply(StandardGate::ControlledPauli(Axis::X), [QubitId(0), QubitId(1)])?;
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! # Ok::<(), iqsgen_ir::IrError>(())
//! ```

pub mod angle;
pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use angle::Angle;
pub use circuit::Circuit;
pub use dag::CircuitDag;
pub use error::{IrError, IrResult};
pub use gate::{Axis, StandardGate};
pub use instruction::{Instruction, Operation};
pub use qubit::QubitId;
