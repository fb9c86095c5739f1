//! The three-fragment C++ program template.
//!
//! A template file holds the program text split by a marker (`&&&` by
//! default) into exactly three fragments:
//!
//! ```text
//! <includes, main(), MPI setup> int num_qubits = &&&
//! <register allocation and initialisation>&&&
//! <final output and closing brace>
//! ```
//!
//! The qubit count lands right after the first fragment and the translated
//! calls right after the second.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CodegenError, CodegenResult};
use crate::translate::TranslatedCall;

/// Default fragment separator.
pub const DEFAULT_TEMPLATE_MARKER: &str = "&&&";

/// Separates the register setup from the first call.
const CALL_SEPARATOR: &str = "\n\n";

/// A program template split into its three fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramTemplate {
    declaration: String,
    preamble: String,
    epilogue: String,
}

impl ProgramTemplate {
    /// Read and split a template file.
    pub fn load(path: impl AsRef<Path>, marker: &str) -> CodegenResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CodegenError::TemplateLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let template = Self::split(&text, marker).map_err(|reason| CodegenError::TemplateLoad {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!(path = %path.display(), "Loaded program template");
        Ok(template)
    }

    /// Split template text that is already in memory.
    pub fn parse(text: &str, marker: &str) -> CodegenResult<Self> {
        Self::split(text, marker).map_err(|reason| CodegenError::TemplateLoad {
            path: PathBuf::from("<memory>"),
            reason,
        })
    }

    fn split(text: &str, marker: &str) -> Result<Self, String> {
        if marker.is_empty() {
            return Err("template marker is empty".to_string());
        }
        match text.split(marker).collect::<Vec<_>>().as_slice() {
            [declaration, preamble, epilogue] => Ok(Self {
                declaration: (*declaration).to_string(),
                preamble: (*preamble).to_string(),
                epilogue: (*epilogue).to_string(),
            }),
            fragments => Err(format!(
                "expected 3 fragments separated by '{marker}', found {}",
                fragments.len()
            )),
        }
    }

    /// Build the final program text.
    pub fn assemble(&self, qubit_count: u32, calls: &[TranslatedCall]) -> String {
        let calls_len: usize = calls.iter().map(|c| c.as_str().len() + 1).sum();
        let mut out = String::with_capacity(
            self.declaration.len() + self.preamble.len() + self.epilogue.len() + calls_len + 16,
        );

        out.push_str(&self.declaration);
        out.push_str(&qubit_count.to_string());
        out.push(';');

        out.push_str(&self.preamble);
        out.push_str(CALL_SEPARATOR);
        for call in calls {
            out.push_str(call.as_str());
            out.push('\n');
        }

        out.push_str(&self.epilogue);
        out
    }

    /// Fragment the qubit count is appended to.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// Fragment the calls are appended to.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn epilogue(&self) -> &str {
        &self.epilogue
    }

    /// Name of the `iqs::QubitRegister` the template allocates, if any.
    ///
    /// `iqs::QubitRegister<ComplexDP> psi(num_qubits);` declares `psi`.
    pub fn declared_register(&self) -> Option<&str> {
        [&self.declaration, &self.preamble]
            .into_iter()
            .find_map(|fragment| register_declared_in(fragment))
    }
}

fn register_declared_in(fragment: &str) -> Option<&str> {
    let (_, rest) = fragment.split_once("QubitRegister<")?;
    let (_, rest) = rest.split_once('>')?;
    let rest = rest.trim_start();
    let end = rest
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    (!name.is_empty() && rest[end..].trim_start().starts_with('(')).then_some(name)
}

/// Combine a qubit count and translated calls with `template`.
pub fn assemble(qubit_count: u32, calls: &[TranslatedCall], template: &ProgramTemplate) -> String {
    template.assemble(qubit_count, calls)
}
