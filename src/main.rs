//! Command-line front end: netlist and test vectors in, pass/fail out.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ttlsim::runner::Simulator;

/// Gate-level functional simulator for 74-series logic circuits.
#[derive(Parser, Debug)]
#[command(name = "ttlsim", version, about = "74-series gate-level functional simulator")]
struct Cli {
    /// Netlist path (`.net` for the KiCad s-expression export, anything
    /// else for the legacy JSON format).
    netlist: PathBuf,

    /// Test-vector file path.
    vectors: PathBuf,
}

fn main() -> ExitCode {
    clilog::init_stderr_color_debug();
    let cli = Cli::parse();

    let mut sim = Simulator::new();
    if let Err(e) = sim.load_netlist(&cli.netlist) {
        clilog::error!("failed to load netlist {}: {}", cli.netlist.display(), e);
        return ExitCode::FAILURE;
    }
    sim.log_circuit_info();

    if let Err(e) = sim.load_vectors(&cli.vectors) {
        clilog::error!("failed to load test vectors {}: {}", cli.vectors.display(), e);
        return ExitCode::FAILURE;
    }

    match sim.simulate() {
        Ok(summary) if summary.passed() => {
            clilog::info!("overall result: PASS");
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            clilog::warn!("overall result: FAIL ({} vector(s))", summary.failed_count());
            ExitCode::FAILURE
        }
        Err(e) => {
            clilog::error!("simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
