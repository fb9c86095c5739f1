//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - OpenQASM 2 to Intel-QS program generator",
        style("iqsgen").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  iqsgen-ir       Circuit intermediate representation");
    println!("  iqsgen-compile  Lowering to the Intel-QS gate basis");
    println!("  iqsgen-codegen  QASM to C++ translation and program assembly");
    println!("  iqsgen-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
