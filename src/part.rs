//! The 74-series part catalog: part numbers, pin maps, roles, and delays.
//!
//! This module is the authoritative description of the packages the
//! simulator understands. The propagation engine consults [`Part::pin_role`]
//! to decide which pins to drive and which to sample; the behavioral models
//! in [`crate::ic`] enforce the same table internally.

use std::fmt;
use std::str::FromStr;

use crate::error::SimError;
use crate::ic::{DualDff, HexInverter, IcModel, QuadAnd, QuadNand, QuadNor, QuadOr, QuadXor};

/// Number of pins on every catalog package (DIP-14).
pub const PIN_COUNT: usize = 14;

/// Pin array index of the VCC pin, shared by every catalog part.
pub(crate) const VCC_INDEX: usize = 13;
/// Pin array index of the GND pin, shared by every catalog part.
pub(crate) const GND_INDEX: usize = 6;

/// A validated DIP-14 pin number (1..=14).
///
/// Constructing a `Pin` is the only place pin ranges are checked; past this
/// boundary an invalid pin is unrepresentable, so the behavioral models
/// index their pin arrays infallibly.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Pin(u8);

impl Pin {
    /// Creates a pin from a 1-based pin number.
    pub fn new(number: u8) -> Result<Self, SimError> {
        match number {
            1..=14 => Ok(Self(number)),
            _ => Err(SimError::InvalidPin(number.to_string())),
        }
    }

    /// The 1-based pin number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// The 0-based index into a per-IC pin array.
    pub(crate) fn index(self) -> usize {
        usize::from(self.0) - 1
    }

    /// Iterates every DIP-14 pin in package order.
    pub fn all() -> impl Iterator<Item = Pin> {
        (1..=14).map(Pin)
    }
}

impl FromStr for Pin {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| SimError::InvalidPin(s.trim().to_string()))
            .and_then(Pin::new)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The electrical role of a pin on its package.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PinRole {
    /// Accepts a level from the bound signal.
    Input,
    /// Drives a level onto the bound signal.
    Output,
    /// VCC or GND; fixed by power, never driven or sampled.
    Power,
}

/// The fixed catalog of supported 74-series parts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Part {
    /// 74HC00 quad 2-input NAND.
    Hc00,
    /// 74HC02 quad 2-input NOR.
    Hc02,
    /// 74HC04 hex inverter.
    Hc04,
    /// 74HC08 quad 2-input AND.
    Hc08,
    /// 74HC32 quad 2-input OR.
    Hc32,
    /// 74HC74 dual positive-edge D flip-flop with async preset/clear.
    Hc74,
    /// 74HC86 quad 2-input XOR.
    Hc86,
}

impl Part {
    /// Every part in the catalog.
    pub const ALL: [Part; 7] = [
        Part::Hc00,
        Part::Hc02,
        Part::Hc04,
        Part::Hc08,
        Part::Hc32,
        Part::Hc74,
        Part::Hc86,
    ];

    /// The canonical part number string.
    pub fn part_number(self) -> &'static str {
        match self {
            Part::Hc00 => "74HC00",
            Part::Hc02 => "74HC02",
            Part::Hc04 => "74HC04",
            Part::Hc08 => "74HC08",
            Part::Hc32 => "74HC32",
            Part::Hc74 => "74HC74",
            Part::Hc86 => "74HC86",
        }
    }

    /// Typical propagation delay in nanoseconds. Metadata only: the engine
    /// resolves to a fixed point without modeling delay.
    pub fn propagation_delay_ns(self) -> u32 {
        match self {
            Part::Hc74 => 15,
            _ => 8,
        }
    }

    /// The role of `pin` on this package.
    ///
    /// All catalog parts put VCC on 14 and GND on 7. The quad gates share
    /// outputs on 3/6/8/11, except the 74HC02 whose gates are mirrored
    /// (outputs on 1/4/10/13). The 74HC04 drives the even pins; the 74HC74
    /// drives Q/Q̅ on 5/6 and 8/9.
    pub fn pin_role(self, pin: Pin) -> PinRole {
        match (self, pin.number()) {
            (_, 7 | 14) => PinRole::Power,
            (Part::Hc02, 1 | 4 | 10 | 13) => PinRole::Output,
            (Part::Hc02, _) => PinRole::Input,
            (Part::Hc04, 2 | 4 | 6 | 8 | 10 | 12) => PinRole::Output,
            (Part::Hc04, _) => PinRole::Input,
            (Part::Hc74, 5 | 6 | 8 | 9) => PinRole::Output,
            (Part::Hc74, _) => PinRole::Input,
            (_, 3 | 6 | 8 | 11) => PinRole::Output,
            _ => PinRole::Input,
        }
    }

    /// Builds a freshly powered behavioral model of this part.
    pub fn model(self) -> IcModel {
        match self {
            Part::Hc00 => QuadNand::new().into(),
            Part::Hc02 => QuadNor::new().into(),
            Part::Hc04 => HexInverter::new().into(),
            Part::Hc08 => QuadAnd::new().into(),
            Part::Hc32 => QuadOr::new().into(),
            Part::Hc74 => DualDff::new().into(),
            Part::Hc86 => QuadXor::new().into(),
        }
    }
}

impl FromStr for Part {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Part::ALL
            .into_iter()
            .find(|p| p.part_number() == s)
            .ok_or_else(|| SimError::UnknownPart(s.to_string()))
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.part_number())
    }
}
