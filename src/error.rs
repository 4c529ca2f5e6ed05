//! Error types for circuit loading and simulation.
//!
//! Everything that can go wrong while building or driving a circuit is a
//! variant of [`SimError`]. Expected-output mismatches are deliberately not
//! here: they are recorded per comparison in the run report and never abort
//! a run.

use std::io;

/// Errors surfaced while loading a circuit or driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Part number not present in the 74-series catalog.
    #[error("unknown part number: {0}")]
    UnknownPart(String),

    /// An instance id was registered twice.
    #[error("duplicate instance id: {0}")]
    DuplicateInstance(String),

    /// A pin binding referenced an instance that was never added.
    #[error("unknown instance id: {0}")]
    UnknownInstance(String),

    /// A pin reference outside the DIP-14 range 1..=14.
    #[error("invalid pin number: {0}")]
    InvalidPin(String),

    /// Malformed netlist or test-vector file.
    #[error("{file}:{line}: {message}")]
    Parse {
        /// Path of the offending file, as given on the command line.
        file: String,
        /// 1-based line where parsing stopped.
        line: usize,
        /// What the parser expected or found.
        message: String,
    },

    /// Simulation was invoked before a netlist was successfully loaded.
    #[error("no circuit loaded; load a netlist before simulating")]
    NotReady,

    /// An I/O error while reading an input file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
