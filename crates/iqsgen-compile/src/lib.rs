//! iqsgen lowering framework
//!
//! This crate turns an arbitrary [`iqsgen_ir::Circuit`] into OpenQASM 2 text
//! that only uses the ten gates the Intel-QS code generator understands:
//! `rx ry rz x y z h cx cy cz`.
//!
//! # Architecture
//!
//! ```text
//! Circuit
//!    │
//!    ▼
//! PassManager ◄── PropertySet (basis gates, optimization stats)
//!    │
//!    ├── RemoveBarriers
//!    ├── BasisTranslation
//!    ├── MergeRotations   (level 2)
//!    ├── CancelInverses   (level ≥ 1)
//!    └── VerifyBasis
//!    │
//!    ▼
//! emit_qasm2 ──► "OPENQASM 2.0; ... qreg q[n]; h q[0]; ..."
//! ```
//!
//! # Example
//!
//! ```rust
//! use iqsgen_compile::{BasisGates, transpile};
//! use iqsgen_ir::{Axis, Circuit, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::with_size("swap_test", 2);
//! circuit
//!     .apply(StandardGate::Pauli(Axis::X), [QubitId(0)])?
//!     .apply(StandardGate::Swap, [QubitId(0), QubitId(1)])?;
//!
//! let qasm = transpile(&circuit, &BasisGates::intel_qs(), 1)?;
//! assert!(qasm.starts_with("OPENQASM 2.0;\n"));
//! assert!(!qasm.contains("swap"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to add a step to a [`PassManager`]:
//!
//! ```rust
//! use iqsgen_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use iqsgen_ir::CircuitDag;
//!
//! struct CountOps;
//!
//! impl Pass for CountOps {
//!     fn name(&self) -> &str { "count_ops" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, dag: &mut CircuitDag, props: &mut PropertySet) -> CompileResult<()> {
//!         props.insert(dag.num_ops());
//!         Ok(())
//!     }
//! }
//! ```

pub mod emitter;
pub mod error;
pub mod manager;
pub mod pass;
pub mod property;
pub mod transpile;

// Built-in passes
pub mod passes;

pub use emitter::{emit_qasm2, format_angle};
pub use error::{CompileError, CompileResult};
pub use manager::{MAX_OPTIMIZATION_LEVEL, PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use property::{BasisGates, PropertySet};
pub use transpile::transpile;
