//! Behavioral models for the 74-series catalog parts.
//!
//! This module notably consists of:
//! - **[`Ic`]**: the uniform contract every catalog part exposes
//!   (pin access, power, delay metadata).
//! - **[`IcModel`]**: the closed set of part models the simulator
//!   dispatches over.
//! - The five quad-gate models and the hex inverter in [`gates`], and the
//!   stateful dual D flip-flop in [`dff`].
//!
//! Models own their pin state as a flat `[LogicLevel; 14]` array. Writing
//! an input pin while powered re-evaluates every output of the package, so
//! the propagation engine observes fresh outputs immediately after each
//! drive.

use enum_dispatch::enum_dispatch;

use crate::logic::LogicLevel;
use crate::part::{Part, Pin};

pub use dff::DualDff;
pub use gates::{HexInverter, QuadAnd, QuadNand, QuadNor, QuadOr, QuadXor};

mod dff;
mod gates;

/// The uniform contract every catalog part exposes.
#[enum_dispatch]
pub trait Ic {
    /// The catalog part this model implements.
    fn part(&self) -> Part;

    /// Stores `level` at `pin`. If `pin` is an input per the part's role
    /// table and power is on, every output pin is re-evaluated.
    fn set_pin(&mut self, pin: Pin, level: LogicLevel);

    /// Reads the stored level at `pin`; pins never written read `Floating`.
    fn get_pin(&self, pin: Pin) -> LogicLevel;

    /// Toggles power. Power-on forces VCC high and GND low, then
    /// re-evaluates outputs; power-off floats every declared output pin
    /// while inputs retain their last stored level.
    fn set_power(&mut self, on: bool);

    /// Whether the package is powered.
    fn is_powered(&self) -> bool;

    /// Typical propagation delay in nanoseconds (observability metadata).
    fn propagation_delay(&self) -> u32 {
        self.part().propagation_delay_ns()
    }
}

/// All supported catalog part models.
#[enum_dispatch(Ic)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum IcModel {
    QuadAnd,
    QuadOr,
    QuadNand,
    QuadNor,
    QuadXor,
    HexInverter,
    DualDff,
}
