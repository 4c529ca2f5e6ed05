//! Combinational catalog parts: the quad 2-input gates and the hex inverter.

use crate::ic::Ic;
use crate::logic::LogicLevel;
use crate::part::{GND_INDEX, PIN_COUNT, Part, Pin, PinRole, VCC_INDEX};

/// (a, b, y) pin triples shared by the 74HC00/08/32/86 packages.
const QUAD_GATES: [(usize, usize, usize); 4] = [
    (idx(1), idx(2), idx(3)),
    (idx(4), idx(5), idx(6)),
    (idx(9), idx(10), idx(8)),
    (idx(12), idx(13), idx(11)),
];

/// The 74HC02 mirrors each gate: inputs sit outboard of the output.
const QUAD_GATES_02: [(usize, usize, usize); 4] = [
    (idx(2), idx(3), idx(1)),
    (idx(5), idx(6), idx(4)),
    (idx(8), idx(9), idx(10)),
    (idx(11), idx(12), idx(13)),
];

/// (a, y) pin pairs of the 74HC04 inverters.
const INVERTERS: [(usize, usize); 6] = [
    (idx(1), idx(2)),
    (idx(3), idx(4)),
    (idx(5), idx(6)),
    (idx(9), idx(8)),
    (idx(11), idx(10)),
    (idx(13), idx(12)),
];

const fn idx(pin: u8) -> usize {
    pin as usize - 1
}

macro_rules! quad_gates {
    ($($(#[$m:meta])? $Id:ident: $part:expr, $table:expr, $f:expr, $invert:literal),*$(,)?) => {
        $(
            $(#[$m])?
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $Id {
                pins: [LogicLevel; PIN_COUNT],
                powered: bool
            }
            impl $Id {
                /// Creates a powered model with every gate pin floating.
                pub fn new() -> Self {
                    let mut ic = Self {
                        pins: [LogicLevel::Floating; PIN_COUNT],
                        powered: false
                    };
                    ic.set_power(true);
                    ic
                }

                fn evaluate(&mut self) {
                    for (a, b, y) in $table {
                        let value = $f(self.pins[a], self.pins[b]);
                        self.pins[y] = if $invert { !value } else { value };
                    }
                }
            }
            impl Default for $Id {
                fn default() -> Self {
                    Self::new()
                }
            }
            impl Ic for $Id {
                fn part(&self) -> Part {
                    $part
                }
                fn set_pin(&mut self, pin: Pin, level: LogicLevel) {
                    self.pins[pin.index()] = level;
                    if self.powered && self.part().pin_role(pin) == PinRole::Input {
                        self.evaluate();
                    }
                }
                fn get_pin(&self, pin: Pin) -> LogicLevel {
                    self.pins[pin.index()]
                }
                fn set_power(&mut self, on: bool) {
                    self.powered = on;
                    match on {
                        true => {
                            self.pins[VCC_INDEX] = LogicLevel::High;
                            self.pins[GND_INDEX] = LogicLevel::Low;
                            self.evaluate();
                        }
                        false => {
                            for pin in Pin::all() {
                                if self.part().pin_role(pin) == PinRole::Output {
                                    self.pins[pin.index()] = LogicLevel::Floating;
                                }
                            }
                        }
                    }
                }
                fn is_powered(&self) -> bool {
                    self.powered
                }
            }
        )*
    }
}

quad_gates! {
    /// A 74HC08 quad 2-input AND package.
    QuadAnd:  Part::Hc08, QUAD_GATES,    |a, b| a & b, false,
    /// A 74HC32 quad 2-input OR package.
    QuadOr:   Part::Hc32, QUAD_GATES,    |a, b| a | b, false,
    /// A 74HC00 quad 2-input NAND package.
    QuadNand: Part::Hc00, QUAD_GATES,    |a, b| a & b, true,
    /// A 74HC02 quad 2-input NOR package.
    QuadNor:  Part::Hc02, QUAD_GATES_02, |a, b| a | b, true,
    /// A 74HC86 quad 2-input XOR package.
    QuadXor:  Part::Hc86, QUAD_GATES,    |a, b| a ^ b, false,
}

/// A 74HC04 hex inverter package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexInverter {
    pins: [LogicLevel; PIN_COUNT],
    powered: bool,
}

impl HexInverter {
    /// Creates a powered model with every gate pin floating.
    pub fn new() -> Self {
        let mut ic = Self {
            pins: [LogicLevel::Floating; PIN_COUNT],
            powered: false,
        };
        ic.set_power(true);
        ic
    }

    fn evaluate(&mut self) {
        for (a, y) in INVERTERS {
            self.pins[y] = !self.pins[a];
        }
    }
}

impl Default for HexInverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Ic for HexInverter {
    fn part(&self) -> Part {
        Part::Hc04
    }

    fn set_pin(&mut self, pin: Pin, level: LogicLevel) {
        self.pins[pin.index()] = level;
        if self.powered && self.part().pin_role(pin) == PinRole::Input {
            self.evaluate();
        }
    }

    fn get_pin(&self, pin: Pin) -> LogicLevel {
        self.pins[pin.index()]
    }

    fn set_power(&mut self, on: bool) {
        self.powered = on;
        match on {
            true => {
                self.pins[VCC_INDEX] = LogicLevel::High;
                self.pins[GND_INDEX] = LogicLevel::Low;
                self.evaluate();
            }
            false => {
                for pin in Pin::all() {
                    if self.part().pin_role(pin) == PinRole::Output {
                        self.pins[pin.index()] = LogicLevel::Floating;
                    }
                }
            }
        }
    }

    fn is_powered(&self) -> bool {
        self.powered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::LogicLevel::{Floating, High, Low};

    fn pin(n: u8) -> Pin {
        Pin::new(n).unwrap()
    }

    /// Drives gate 1 of a standard-pinout quad gate and reads pin 3.
    fn gate1<G: Ic>(gate: &mut G, a: LogicLevel, b: LogicLevel) -> LogicLevel {
        gate.set_pin(pin(1), a);
        gate.set_pin(pin(2), b);
        gate.get_pin(pin(3))
    }

    #[test]
    fn and_gate_truth_table() {
        let mut ic = QuadAnd::new();
        assert_eq!(gate1(&mut ic, Low, Low), Low);
        assert_eq!(gate1(&mut ic, Low, High), Low);
        assert_eq!(gate1(&mut ic, High, Low), Low);
        assert_eq!(gate1(&mut ic, High, High), High);
    }

    #[test]
    fn or_gate_truth_table() {
        let mut ic = QuadOr::new();
        assert_eq!(gate1(&mut ic, Low, Low), Low);
        assert_eq!(gate1(&mut ic, High, Low), High);
        assert_eq!(gate1(&mut ic, High, High), High);
    }

    #[test]
    fn nand_gate_truth_table() {
        let mut ic = QuadNand::new();
        assert_eq!(gate1(&mut ic, Low, Low), High);
        assert_eq!(gate1(&mut ic, High, Low), High);
        assert_eq!(gate1(&mut ic, High, High), Low);
    }

    #[test]
    fn xor_gate_truth_table() {
        let mut ic = QuadXor::new();
        assert_eq!(gate1(&mut ic, Low, Low), Low);
        assert_eq!(gate1(&mut ic, High, Low), High);
        assert_eq!(gate1(&mut ic, High, High), Low);
    }

    #[test]
    fn nor_uses_mirrored_pinout() {
        let mut ic = QuadNor::new();
        // Gate 1 of the 74HC02 reads pins 2/3 and drives pin 1.
        ic.set_pin(pin(2), Low);
        ic.set_pin(pin(3), Low);
        assert_eq!(ic.get_pin(pin(1)), High);
        ic.set_pin(pin(3), High);
        assert_eq!(ic.get_pin(pin(1)), Low);
    }

    #[test]
    fn floating_input_floats_the_gate_output() {
        let mut ic = QuadAnd::new();
        assert_eq!(gate1(&mut ic, High, Floating), Floating);
        let mut ic = QuadNand::new();
        assert_eq!(gate1(&mut ic, Floating, Low), Floating);
    }

    #[test]
    fn gates_are_independent() {
        let mut ic = QuadAnd::new();
        ic.set_pin(pin(1), High);
        ic.set_pin(pin(2), High);
        // Gate 4 inputs untouched; only gate 1 drives.
        assert_eq!(ic.get_pin(pin(3)), High);
        assert_eq!(ic.get_pin(pin(11)), Floating);
    }

    #[test]
    fn inverter_chain_pins() {
        let mut ic = HexInverter::new();
        ic.set_pin(pin(1), Low);
        assert_eq!(ic.get_pin(pin(2)), High);
        ic.set_pin(pin(1), High);
        assert_eq!(ic.get_pin(pin(2)), Low);
        ic.set_pin(pin(13), Floating);
        assert_eq!(ic.get_pin(pin(12)), Floating);
    }

    #[test]
    fn power_off_floats_outputs_and_keeps_inputs() {
        let mut ic = QuadAnd::new();
        ic.set_pin(pin(1), High);
        ic.set_pin(pin(2), High);
        ic.set_power(false);
        assert_eq!(ic.get_pin(pin(3)), Floating);
        assert_eq!(ic.get_pin(pin(1)), High);

        // Inputs are stored but not evaluated while off.
        ic.set_pin(pin(2), Low);
        assert_eq!(ic.get_pin(pin(3)), Floating);
    }

    #[test]
    fn power_on_recomputes_from_current_inputs() {
        let mut ic = QuadAnd::new();
        ic.set_pin(pin(1), High);
        ic.set_pin(pin(2), High);
        ic.set_power(false);
        ic.set_pin(pin(2), Low);
        ic.set_power(true);
        assert_eq!(ic.get_pin(pin(3)), Low);
        assert_eq!(ic.get_pin(pin(14)), High);
        assert_eq!(ic.get_pin(pin(7)), Low);
    }
}
