//! The 74HC74 dual positive-edge D flip-flop with asynchronous preset/clear.

use crate::ic::Ic;
use crate::logic::LogicLevel;
use crate::part::{GND_INDEX, PIN_COUNT, Part, Pin, PinRole, VCC_INDEX};

// Per-flop pin indices; the second flop mirrors the first across the package.
const CLR_N: [usize; 2] = [idx(1), idx(13)];
const D: [usize; 2] = [idx(2), idx(12)];
const CLK: [usize; 2] = [idx(3), idx(11)];
const PRE_N: [usize; 2] = [idx(4), idx(10)];
const Q: [usize; 2] = [idx(5), idx(9)];
const Q_N: [usize; 2] = [idx(6), idx(8)];

const fn idx(pin: u8) -> usize {
    pin as usize - 1
}

/// A 74HC74 dual D flip-flop package.
///
/// The only stateful catalog part: each flop stores its Q level and the
/// CLK level seen at the previous evaluation, so a rising edge is
/// recognized across successive pin writes. The asynchronous preset and
/// clear inputs are active-low and dominate the clock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DualDff {
    pins: [LogicLevel; PIN_COUNT],
    powered: bool,
    q: [LogicLevel; 2],
    prev_clk: [LogicLevel; 2],
}

impl DualDff {
    /// Creates a powered model with both flops reset low.
    pub fn new() -> Self {
        let mut ic = Self {
            pins: [LogicLevel::Floating; PIN_COUNT],
            powered: false,
            q: [LogicLevel::Low; 2],
            prev_clk: [LogicLevel::Low; 2],
        };
        // Active-low async controls rest inactive, so an unassigned flop
        // is free-running.
        for flop in 0..2 {
            ic.pins[PRE_N[flop]] = LogicLevel::High;
            ic.pins[CLR_N[flop]] = LogicLevel::High;
        }
        ic.set_power(true);
        ic
    }

    fn evaluate(&mut self) {
        for flop in 0..2 {
            let pre_n = self.pins[PRE_N[flop]];
            let clr_n = self.pins[CLR_N[flop]];
            let d = self.pins[D[flop]];
            let clk = self.pins[CLK[flop]];

            match (pre_n, clr_n) {
                // Asynchronous controls dominate the clock.
                (LogicLevel::Low, LogicLevel::High) => self.q[flop] = LogicLevel::High,
                (LogicLevel::High, LogicLevel::Low) => self.q[flop] = LogicLevel::Low,
                // Both asserted is electrically undefined; the stored state
                // is kept and no edge is observed.
                (LogicLevel::Low, LogicLevel::Low) => {}
                _ => {
                    let rising =
                        self.prev_clk[flop] == LogicLevel::Low && clk == LogicLevel::High;
                    if rising && d != LogicLevel::Floating {
                        self.q[flop] = d;
                    }
                }
            }

            self.prev_clk[flop] = clk;
            self.pins[Q[flop]] = self.q[flop];
            self.pins[Q_N[flop]] = !self.q[flop];
        }
    }
}

impl Default for DualDff {
    fn default() -> Self {
        Self::new()
    }
}

impl Ic for DualDff {
    fn part(&self) -> Part {
        Part::Hc74
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
                // Re-drives Q/Q̅ from the stored state the package kept
                // through the outage.
                self.evaluate();
            }
            false => {
                for flop in 0..2 {
                    self.pins[Q[flop]] = LogicLevel::Floating;
                    self.pins[Q_N[flop]] = LogicLevel::Floating;
                }
            }
        }
    }

    fn is_powered(&self) -> bool {
        self.powered
    }
}
