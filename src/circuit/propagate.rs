//! The fixed-point propagation engine.
//!
//! Each pass has two phases over the whole circuit: a *drive* phase writes
//! every bound input pin from its signal (each write re-evaluates the IC),
//! then a *sample* phase reads every declared output pin back onto its
//! signal. Passes repeat until no signal changes level or the pass cap is
//! reached, so multi-stage combinational logic settles one stage per pass.

use slotmap::SecondaryMap;

use crate::circuit::Circuit;
use crate::ic::Ic;
use crate::logic::LogicLevel;
use crate::part::{Pin, PinRole};

impl Circuit {
    /// Runs drive/sample passes until the signal state reaches a fixed
    /// point or the pass cap is hit.
    ///
    /// Power pins are fixed by [`Circuit::set_power`] and are neither
    /// driven nor sampled. Outputs reading `Floating` (e.g. an unpowered
    /// package) leave their signal untouched. When two outputs share a
    /// signal, the last one sampled wins; contention is not detected.
    pub fn propagate(&mut self) {
        for pass in 1..=self.max_iterations {
            let before: SecondaryMap<_, _> = self
                .signals
                .iter()
                .map(|(key, signal)| (key, signal.level))
                .collect();

            // Drive phase: push signal levels into every bound input pin,
            // letting each package re-evaluate.
            for instance in self.instances.values_mut() {
                for pin in Pin::all() {
                    let Some(key) = instance.pins[pin.index()] else {
                        continue;
                    };
                    if instance.part.pin_role(pin) != PinRole::Input {
                        continue;
                    }
                    instance.model.set_pin(pin, self.signals[key].level);
                }
            }

            // Sample phase: pull every driven output back onto its signal.
            for instance in self.instances.values() {
                for pin in Pin::all() {
                    let Some(key) = instance.pins[pin.index()] else {
                        continue;
                    };
                    if instance.part.pin_role(pin) != PinRole::Output {
                        continue;
                    }
                    let level = instance.model.get_pin(pin);
                    if level != LogicLevel::Floating {
                        self.signals[key].level = level;
                    }
                }
            }

            let settled = self
                .signals
                .iter()
                .all(|(key, signal)| before[key] == signal.level);
            if settled {
                clilog::debug!("propagation settled after {} pass(es)", pass);
                return;
            }
        }
        clilog::warn!(
            "propagation did not settle within {} passes",
            self.max_iterations
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{GND, VCC};
    use crate::logic::LogicLevel::{Floating, High, Low};

    /// U1=74HC86, U2=74HC08, A and B feeding pin 1/2 of both.
    fn half_adder() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.create_signal("a", true, false);
        circuit.create_signal("b", true, false);
        circuit.create_signal("sum", false, true);
        circuit.create_signal("cout", false, true);
        circuit.add_component("U1", "74HC86", "DIP-14").unwrap();
        circuit.add_component("U2", "74HC08", "DIP-14").unwrap();
        for id in ["U1", "U2"] {
            circuit.connect(id, "1", "a").unwrap();
            circuit.connect(id, "2", "b").unwrap();
        }
        circuit.connect("U1", "3", "sum").unwrap();
        circuit.connect("U2", "3", "cout").unwrap();
        circuit
    }

    fn run(circuit: &mut Circuit, inputs: &[(&str, LogicLevel)]) {
        circuit.reset();
        for &(name, level) in inputs {
            circuit.set_signal(name, level);
        }
        circuit.propagate();
    }

    #[test]
    fn half_adder_truth_table() {
        let mut circuit = half_adder();
        for (a, b, sum, cout) in [
            (Low, Low, Low, Low),
            (Low, High, High, Low),
            (High, Low, High, Low),
            (High, High, Low, High),
        ] {
            run(&mut circuit, &[("a", a), ("b", b)]);
            assert_eq!(circuit.get_signal("sum"), sum, "a={a} b={b}");
            assert_eq!(circuit.get_signal("cout"), cout, "a={a} b={b}");
        }
    }

    #[test]
    fn propagate_is_idempotent() {
        let mut circuit = half_adder();
        run(&mut circuit, &[("a", High), ("b", Low)]);
        let before: Vec<_> = circuit.signals().map(|s| (s.name().to_string(), s.level())).collect();
        circuit.propagate();
        let after: Vec<_> = circuit.signals().map(|s| (s.name().to_string(), s.level())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rails_survive_propagation() {
        let mut circuit = half_adder();
        for _ in 0..3 {
            run(&mut circuit, &[("a", High), ("b", High)]);
            assert_eq!(circuit.get_signal(VCC), High);
            assert_eq!(circuit.get_signal(GND), Low);
        }
    }

    /// Three 74HC04 stages in series: y = !!!x.
    fn inverter_chain() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.create_signal("x", true, false);
        circuit.create_signal("y", false, true);
        circuit.add_component("U1", "74HC04", "DIP-14").unwrap();
        circuit.connect("U1", "1", "x").unwrap();
        circuit.connect("U1", "2", "n1").unwrap();
        circuit.connect("U1", "3", "n1").unwrap();
        circuit.connect("U1", "4", "n2").unwrap();
        circuit.connect("U1", "5", "n2").unwrap();
        circuit.connect("U1", "6", "y").unwrap();
        circuit
    }

    #[test]
    fn inverter_chain_propagates_through_stages() {
        let mut circuit = inverter_chain();
        run(&mut circuit, &[("x", Low)]);
        assert_eq!(circuit.get_signal("y"), High);
        run(&mut circuit, &[("x", High)]);
        assert_eq!(circuit.get_signal("y"), Low);
    }

    #[test]
    fn floating_input_propagates_through_all_stages() {
        let mut circuit = inverter_chain();
        run(&mut circuit, &[("x", Floating)]);
        assert_eq!(circuit.get_signal("n1"), Floating);
        assert_eq!(circuit.get_signal("n2"), Floating);
        assert_eq!(circuit.get_signal("y"), Floating);
    }

    #[test]
    fn iteration_cap_is_configurable() {
        let mut circuit = inverter_chain();
        assert_eq!(circuit.max_iterations(), 8);
        // One pass cannot settle a three-stage chain.
        circuit.set_max_iterations(1);
        run(&mut circuit, &[("x", Low)]);
        assert_eq!(circuit.get_signal("y"), Floating);
        circuit.set_max_iterations(8);
        run(&mut circuit, &[("x", Low)]);
        assert_eq!(circuit.get_signal("y"), High);
    }

    #[test]
    fn unpowered_outputs_do_not_drive_signals() {
        let mut circuit = half_adder();
        circuit.set_power(false);
        run(&mut circuit, &[("a", High), ("b", High)]);
        assert_eq!(circuit.get_signal("sum"), Floating);
        assert_eq!(circuit.get_signal("cout"), Floating);
    }
}
