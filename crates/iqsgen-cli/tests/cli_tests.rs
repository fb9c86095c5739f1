//! CLI command parsing and helper tests.
//!
//! The CLI is a binary crate, so argument parsing is checked on a mirrored
//! clap definition and the command helpers on the library calls they wrap.

// ============================================================================
// Circuit selection and configuration helpers
// ============================================================================

mod helpers {
    use std::fs;
    use std::path::{Path, PathBuf};

    use iqsgen_codegen::{Generator, GeneratorConfig};
    use iqsgen_ir::Circuit;

    /// Equivalent to commands::common::build_circuit
    fn build_circuit(kind: &str, num_qubits: u32) -> anyhow::Result<Circuit> {
        let circuit = match kind.to_lowercase().as_str() {
            "bell" => Circuit::bell()?,
            "ghz" => Circuit::ghz(num_qubits)?,
            "qft" => Circuit::qft(num_qubits)?,
            other => anyhow::bail!("Unknown circuit: '{other}'. Available: bell, ghz, qft"),
        };
        Ok(circuit)
    }

    #[test]
    fn test_build_known_circuits() {
        assert_eq!(build_circuit("bell", 7).unwrap().num_qubits(), 2);
        assert_eq!(build_circuit("GHZ", 5).unwrap().num_qubits(), 5);
        assert_eq!(build_circuit("qft", 4).unwrap().num_qubits(), 4);
    }

    #[test]
    fn test_unknown_circuit() {
        let err = build_circuit("grover", 3).unwrap_err().to_string();
        assert!(err.contains("Unknown circuit"));
    }

    #[test]
    fn test_config_file_with_flag_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iqsgen.yaml");
        fs::write(&path, "register: state\noutput_path: build/out.cpp\n").unwrap();

        let mut config = GeneratorConfig::from_file(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("build/out.cpp"));

        config.register = "reg".to_string();
        assert!(config.validate().is_ok());
        config.register = "9reg".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_translate_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("inicio.qasm");
        fs::write(&template_path, "int num_qubits = &&&\n&&&}\n").unwrap();
        let input = dir.path().join("bell.qasm");
        fs::write(
            &input,
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\nh q[0];\ncx q[0],q[1];\n",
        )
        .unwrap();

        let generator = Generator::new(GeneratorConfig {
            template_path,
            ..Default::default()
        })
        .unwrap();
        let output = dir.path().join("qasm.cpp");
        let qasm = iqsgen_codegen::read_qasm_file(&input).unwrap();
        generator.translate_from_qasm(&qasm, &output).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "int num_qubits = 2;\n\n\npsi.ApplyHadamard(0);\npsi.ApplyCPauliX(0,1);\n}\n"
        );
    }

    /// Equivalent to the generation step of commands::circuit::execute
    fn generate_circuit(
        generator: &Generator,
        circuit: &Circuit,
        output: &Path,
        emit_qasm: Option<&Path>,
    ) -> anyhow::Result<PathBuf> {
        let written = match emit_qasm {
            Some(path) => generator.translate_from_circuit_saving_qasm(circuit, output, path),
            None => generator.translate_from_circuit(circuit, output),
        }?;
        Ok(written)
    }

    #[test]
    fn test_emit_qasm_file() {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("inicio.qasm");
        fs::write(&template_path, "int num_qubits = &&&\n&&&}\n").unwrap();
        let generator = Generator::new(GeneratorConfig {
            template_path,
            ..Default::default()
        })
        .unwrap();

        let path = dir.path().join("ghz.qasm");
        let output = dir.path().join("ghz.cpp");
        let circuit = build_circuit("ghz", 3).unwrap();
        generate_circuit(&generator, &circuit, &output, Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().nth(2), Some("qreg q[3];"));
        assert!(output.exists());
    }

    #[test]
    fn test_emit_qasm_skipped_when_generation_fails() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(GeneratorConfig {
            template_path: dir.path().join("absent.qasm"),
            ..Default::default()
        })
        .unwrap();

        let path = dir.path().join("qft.qasm");
        let output = dir.path().join("qft.cpp");
        let circuit = build_circuit("qft", 3).unwrap();
        assert!(generate_circuit(&generator, &circuit, &output, Some(&path)).is_err());
        assert!(!path.exists());
        assert!(!output.exists());
    }

    #[test]
    fn test_gates_use_configured_register() {
        let config = GeneratorConfig {
            register: "state".to_string(),
            ..Default::default()
        };
        let calls: Vec<String> = iqsgen_codegen::GATE_TABLE
            .iter()
            .map(|rule| rule.example_call(&config.register))
            .collect();
        assert!(calls.iter().all(|call| call.starts_with("state.")));
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "iqsgen")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Translate {
            #[arg(short, long)]
            input: String,
            #[arg(short, long)]
            output: Option<String>,
            #[arg(long)]
            template: Option<String>,
            #[arg(long)]
            register: Option<String>,
            #[arg(long)]
            config: Option<String>,
        },
        Circuit {
            kind: String,
            #[arg(short = 'n', long, default_value = "3")]
            num_qubits: u32,
            #[arg(short, long)]
            output: Option<String>,
            #[arg(long)]
            optimization_level: Option<u8>,
            #[arg(long)]
            emit_qasm: Option<String>,
            #[arg(long)]
            template: Option<String>,
            #[arg(long)]
            register: Option<String>,
            #[arg(long)]
            config: Option<String>,
        },
        Gates {
            #[arg(long)]
            register: Option<String>,
            #[arg(long)]
            config: Option<String>,
        },
        Version,
    }

    // --- Translate command ---

    #[test]
    fn test_parse_translate_minimal() {
        let cli = TestCli::try_parse_from(["iqsgen", "translate", "-i", "bell.qasm"]).unwrap();
        match cli.command {
            TestCommands::Translate {
                input,
                output,
                template,
                register,
                config,
            } => {
                assert_eq!(input, "bell.qasm");
                assert!(output.is_none());
                assert!(template.is_none());
                assert!(register.is_none());
                assert!(config.is_none());
            }
            _ => panic!("Expected Translate command"),
        }
    }

    #[test]
    fn test_parse_translate_full() {
        let cli = TestCli::try_parse_from([
            "iqsgen",
            "translate",
            "--input",
            "bell.qasm",
            "-o",
            "bell.cpp",
            "--template",
            "templates/inicio.qasm",
            "--register",
            "state",
            "--config",
            "iqsgen.yaml",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Translate {
                output,
                template,
                register,
                config,
                ..
            } => {
                assert_eq!(output.as_deref(), Some("bell.cpp"));
                assert_eq!(template.as_deref(), Some("templates/inicio.qasm"));
                assert_eq!(register.as_deref(), Some("state"));
                assert_eq!(config.as_deref(), Some("iqsgen.yaml"));
            }
            _ => panic!("Expected Translate command"),
        }
    }

    #[test]
    fn test_parse_translate_requires_input() {
        assert!(TestCli::try_parse_from(["iqsgen", "translate"]).is_err());
    }

    // --- Circuit command ---

    #[test]
    fn test_parse_circuit_defaults() {
        let cli = TestCli::try_parse_from(["iqsgen", "circuit", "bell"]).unwrap();
        match cli.command {
            TestCommands::Circuit {
                kind,
                num_qubits,
                optimization_level,
                emit_qasm,
                ..
            } => {
                assert_eq!(kind, "bell");
                assert_eq!(num_qubits, 3);
                assert!(optimization_level.is_none());
                assert!(emit_qasm.is_none());
            }
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_parse_circuit_options() {
        let cli = TestCli::try_parse_from([
            "iqsgen",
            "circuit",
            "qft",
            "-n",
            "5",
            "--optimization-level",
            "2",
            "--emit-qasm",
            "qft.qasm",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Circuit {
                kind,
                num_qubits,
                optimization_level,
                emit_qasm,
                ..
            } => {
                assert_eq!(kind, "qft");
                assert_eq!(num_qubits, 5);
                assert_eq!(optimization_level, Some(2));
                assert_eq!(emit_qasm.as_deref(), Some("qft.qasm"));
            }
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_parse_circuit_rejects_bad_qubits() {
        assert!(TestCli::try_parse_from(["iqsgen", "circuit", "ghz", "-n", "-1"]).is_err());
        assert!(TestCli::try_parse_from(["iqsgen", "circuit"]).is_err());
    }

    // --- Other commands ---

    #[test]
    fn test_parse_gates_and_version() {
        let cli = TestCli::try_parse_from(["iqsgen", "gates"]).unwrap();
        assert!(matches!(
            cli.command,
            TestCommands::Gates {
                register: None,
                config: None
            }
        ));
        let cli = TestCli::try_parse_from(["iqsgen", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_parse_gates_register() {
        let cli = TestCli::try_parse_from(["iqsgen", "gates", "--register", "state"]).unwrap();
        match cli.command {
            TestCommands::Gates { register, config } => {
                assert_eq!(register.as_deref(), Some("state"));
                assert!(config.is_none());
            }
            _ => panic!("Expected Gates command"),
        }
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = TestCli::try_parse_from(["iqsgen", "gates", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = TestCli::try_parse_from(["iqsgen", "-v", "version"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["iqsgen", "compile"]).is_err());
    }
}
