//! End-to-end generation: QASM text or a circuit in, C++ file out.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use iqsgen_compile::{BasisGates, transpile};
use iqsgen_ir::Circuit;

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, CodegenResult};
use crate::extract::extract;
use crate::template::ProgramTemplate;
use crate::translate::{TranslatedCall, Translator};

/// A program assembled in memory, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    /// Qubit count read from the source header.
    pub qubit_count: u32,
    /// One call per source instruction, in source order.
    pub calls: Vec<TranslatedCall>,
    /// The complete C++ source.
    pub source: String,
}

/// Drives extraction, translation, assembly and output.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    translator: Translator,
}

impl Generator {
    /// Create a generator after validating `config`.
    pub fn new(config: GeneratorConfig) -> CodegenResult<Self> {
        config.validate()?;
        let translator = Translator::new(&config.register, &config.pi_constant);
        Ok(Self { config, translator })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Load the configured template.
    pub fn load_template(&self) -> CodegenResult<ProgramTemplate> {
        ProgramTemplate::load(&self.config.template_path, &self.config.template_marker)
    }

    /// Translate `source` and splice it into `template`.
    ///
    /// Stops at the first instruction that cannot be translated.
    pub fn generate(
        &self,
        source: &str,
        template: &ProgramTemplate,
    ) -> CodegenResult<GeneratedProgram> {
        let (qubit_count, instructions) = extract(source)?.into_parts();
        debug!(
            qubit_count,
            instructions = instructions.len(),
            "Extracted circuit"
        );

        let calls = instructions
            .iter()
            .map(|instruction| self.translator.translate(instruction))
            .collect::<CodegenResult<Vec<_>>>()?;

        let source = template.assemble(qubit_count, &calls);
        Ok(GeneratedProgram {
            qubit_count,
            calls,
            source,
        })
    }

    /// Translate QASM text and write the program to `output`.
    ///
    /// The template is loaded and the whole program generated before the
    /// output is touched, so a failure leaves no file behind.
    #[instrument(skip(self, qasm, output), fields(output = %output.as_ref().display()))]
    pub fn translate_from_qasm(
        &self,
        qasm: &str,
        output: impl AsRef<Path>,
    ) -> CodegenResult<PathBuf> {
        let output = output.as_ref();
        let template = self.load_template()?;
        if let Some(declared) = self.register_mismatch(&template) {
            warn!(
                declared,
                register = %self.config.register,
                "Calls target '{}' but the template declares '{}'",
                self.config.register,
                declared
            );
        }
        let program = self.generate(qasm, &template)?;

        write_atomically(output, &program.source)?;
        info!(
            calls = program.calls.len(),
            qubits = program.qubit_count,
            "The string has been saved in the file '{}'",
            output.display()
        );
        Ok(output.to_path_buf())
    }

    /// The register `template` declares, when it is not the one the calls
    /// are generated for.
    pub fn register_mismatch<'t>(&self, template: &'t ProgramTemplate) -> Option<&'t str> {
        template
            .declared_register()
            .filter(|declared| *declared != self.config.register)
    }

    /// Lower `circuit` to the Intel-QS basis as QASM text.
    pub fn circuit_to_qasm(&self, circuit: &Circuit) -> CodegenResult<String> {
        Ok(transpile(
            circuit,
            &BasisGates::intel_qs(),
            self.config.optimization_level,
        )?)
    }

    /// Lower `circuit` and write the program to `output`.
    #[instrument(skip(self, circuit, output), fields(circuit = %circuit.name()))]
    pub fn translate_from_circuit(
        &self,
        circuit: &Circuit,
        output: impl AsRef<Path>,
    ) -> CodegenResult<PathBuf> {
        let qasm = self.circuit_to_qasm(circuit)?;
        debug!(lines = qasm.lines().count(), "Lowered circuit");
        self.translate_from_qasm(&qasm, output)
    }

    /// Like [`translate_from_circuit`](Self::translate_from_circuit), and
    /// also save the lowered QASM to `qasm_output`.
    ///
    /// The QASM file is written only once the program has been saved, so a
    /// failed generation leaves neither file behind.
    #[instrument(skip(self, circuit, output, qasm_output), fields(circuit = %circuit.name()))]
    pub fn translate_from_circuit_saving_qasm(
        &self,
        circuit: &Circuit,
        output: impl AsRef<Path>,
        qasm_output: impl AsRef<Path>,
    ) -> CodegenResult<PathBuf> {
        let qasm = self.circuit_to_qasm(circuit)?;
        let written = self.translate_from_qasm(&qasm, output)?;
        write_qasm_file(qasm_output, &qasm)?;
        Ok(written)
    }
}

/// Save QASM text to `path`.
pub fn write_qasm_file(path: impl AsRef<Path>, qasm: &str) -> CodegenResult<()> {
    write_atomically(path.as_ref(), qasm)
}

/// Read QASM text from `path`.
pub fn read_qasm_file(path: impl AsRef<Path>) -> CodegenResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))
}

/// Write `contents` to a sibling temporary file, then rename it over `path`.
fn write_atomically(path: &Path, contents: &str) -> CodegenResult<()> {
    let file_name = path.file_name().ok_or_else(|| {
        CodegenError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    let tmp = path.with_file_name(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let written = write_file(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(CodegenError::io(path, e));
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    writer.get_ref().sync_all()
}
