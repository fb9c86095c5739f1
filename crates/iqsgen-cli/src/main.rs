//! iqsgen Command-Line Interface
//!
//! Generates Intel-QS C++ programs from OpenQASM 2 files or from the
//! built-in example circuits.
//!
//! ```text
//! iqsgen translate -i bell.qasm -o qasm.cpp
//! iqsgen circuit qft -n 4 --emit-qasm qft.qasm
//! iqsgen gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::ConfigOverrides;
use commands::{circuit, gates, translate, version};

/// iqsgen - OpenQASM 2 to Intel-QS program generator
#[derive(Parser)]
#[command(name = "iqsgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate an OpenQASM 2 file into an Intel-QS program
    Translate {
        /// Input QASM file
        #[arg(short, long)]
        input: String,

        /// Output C++ file (defaults to the configured output, qasm.cpp)
        #[arg(short, long)]
        output: Option<String>,

        /// Program template file
        #[arg(long)]
        template: Option<String>,

        /// Register variable name used in the calls
        #[arg(long)]
        register: Option<String>,

        /// YAML configuration file
        #[arg(long)]
        config: Option<String>,
    },

    /// Generate a program from a built-in circuit (bell, ghz, qft)
    Circuit {
        /// Circuit to build
        kind: String,

        /// Number of qubits (ghz and qft)
        #[arg(short = 'n', long, default_value = "3")]
        num_qubits: u32,

        /// Output C++ file (defaults to the configured output, qasm.cpp)
        #[arg(short, long)]
        output: Option<String>,

        /// Optimization level (0-2)
        #[arg(long)]
        optimization_level: Option<u8>,

        /// Also save the lowered OpenQASM 2 text to this file
        #[arg(long)]
        emit_qasm: Option<String>,

        /// Program template file
        #[arg(long)]
        template: Option<String>,

        /// Register variable name used in the calls
        #[arg(long)]
        register: Option<String>,

        /// YAML configuration file
        #[arg(long)]
        config: Option<String>,
    },

    /// List the supported gates and the calls they become
    Gates {
        /// Register variable name used in the calls
        #[arg(long)]
        register: Option<String>,

        /// YAML configuration file
        #[arg(long)]
        config: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Translate {
            input,
            output,
            template,
            register,
            config,
        } => {
            let overrides = ConfigOverrides {
                config,
                template,
                register,
                optimization_level: None,
            };
            translate::execute(&input, output.as_deref(), &overrides)
        }

        Commands::Circuit {
            kind,
            num_qubits,
            output,
            optimization_level,
            emit_qasm,
            template,
            register,
            config,
        } => {
            let overrides = ConfigOverrides {
                config,
                template,
                register,
                optimization_level,
            };
            circuit::execute(
                &kind,
                num_qubits,
                output.as_deref(),
                emit_qasm.as_deref(),
                &overrides,
            )
        }

        Commands::Gates { register, config } => {
            let overrides = ConfigOverrides {
                config,
                register,
                ..Default::default()
            };
            gates::execute(&overrides)
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
