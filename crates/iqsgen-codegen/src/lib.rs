//! Intel-QS program generator
//!
//! Turns OpenQASM 2 restricted to the gates `rx ry rz cx cy cz x y z h`
//! into a C++ program driving an `iqs::QubitRegister`.
//!
//! # Pipeline
//!
//! ```text
//! QASM text ──► extract ──► (qubit count, instructions)
//!                                     │
//!                         Translator (one call per line)
//!                                     │
//!                                     ▼
//! ProgramTemplate ──► assemble ──► C++ source ──► output file
//! ```
//!
//! Circuits built with [`iqsgen_ir`] enter through
//! [`Generator::translate_from_circuit`], which lowers them with
//! [`iqsgen_compile::transpile`] first.
//!
//! # Example
//!
//! ```rust
//! use iqsgen_codegen::{Generator, GeneratorConfig, ProgramTemplate};
//!
//! let generator = Generator::new(GeneratorConfig::default()).unwrap();
//! let template = ProgramTemplate::parse("int n = &&&\n&&&}\n", "&&&").unwrap();
//!
//! let qasm = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\nh q[0];\ncx q[0],q[1];\n";
//! let program = generator.generate(qasm, &template).unwrap();
//!
//! assert_eq!(
//!     program.source,
//!     "int n = 2;\n\n\npsi.ApplyHadamard(0);\npsi.ApplyCPauliX(0,1);\n}\n"
//! );
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod gate_table;
pub mod pipeline;
pub mod template;
pub mod translate;

pub use config::{ConfigError, GeneratorConfig};
pub use error::{CodegenError, CodegenResult};
pub use extract::{CircuitDescriptor, extract};
pub use gate_table::{Axis, Emission, GATE_TABLE, GateFamily, GateRule};
pub use pipeline::{GeneratedProgram, Generator, read_qasm_file, write_qasm_file};
pub use template::{DEFAULT_TEMPLATE_MARKER, ProgramTemplate, assemble};
pub use translate::{Instruction, TranslatedCall, Translator, translate};
