//! Gate-level functional simulation of 74-series logic circuits.
//!
//! A circuit is described by a netlist (KiCad s-expression export or the
//! legacy flat JSON format) naming instances of catalog parts and the
//! signals bound to their pins. Test vectors drive the circuit inputs and
//! declare the output levels they expect; the simulator propagates each
//! vector to a fixed point and reports per-vector pass/fail.
//!
//! ## This crate notably consists of:
//! - **[`logic`]**: the ternary `LOW`/`HIGH`/`FLOATING` signal algebra.
//! - **[`part`]**: the part catalog with its pin-role tables.
//! - **[`ic`]**: the behavioral model of each catalog part, including the
//!   clocked 74HC74 flip-flop.
//! - **[`circuit`]**: the signal/instance graph and the fixed-point
//!   propagation engine.
//! - **[`netlist`] and [`vectors`]**: the file formats feeding the core.
//! - **[`runner`]**: the stimulus runner and the [`Simulator`] facade.

#![warn(missing_docs)]

pub mod circuit;
pub mod error;
pub mod ic;
pub mod logic;
pub mod netlist;
pub mod part;
pub mod runner;
pub mod vectors;

pub use circuit::Circuit;
pub use error::SimError;
pub use logic::LogicLevel;
pub use part::{Part, Pin};
pub use runner::Simulator;
pub use vectors::TestVector;
