//! The circuit graph: named signals, component instances, pin bindings.
//!
//! A [`Circuit`] exclusively owns its signals and instances in slotmaps,
//! with name maps for lookup. Pin assignments store the signal key rather
//! than a reference, which keeps the drive/sample phases of
//! [`Circuit::propagate`] free of borrow gymnastics.

pub mod propagate;

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::SimError;
use crate::ic::{Ic, IcModel};
use crate::logic::LogicLevel;
use crate::part::{PIN_COUNT, Part, Pin};

new_key_type! {
    /// Key for signals (wires) owned by a [`Circuit`].
    pub struct SignalKey;
    /// Key for component instances owned by a [`Circuit`].
    pub struct InstanceKey;
}

/// Reserved name of the high power rail.
pub const VCC: &str = "VCC";
/// Reserved name of the ground rail.
pub const GND: &str = "GND";

/// Default pass cap for the propagation engine. Well-formed combinational
/// circuits settle within their logic depth; this bounds feedback loops.
pub const DEFAULT_MAX_ITERATIONS: usize = 8;

/// A named wire carrying one ternary level.
#[derive(Debug)]
pub struct Signal {
    name: String,
    level: LogicLevel,
    is_input: bool,
    is_output: bool,
}

impl Signal {
    fn new(name: &str, is_input: bool, is_output: bool) -> Self {
        Self {
            name: name.to_string(),
            level: LogicLevel::Floating,
            is_input,
            is_output,
        }
    }

    /// The signal's unique name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current level on the wire.
    pub fn level(&self) -> LogicLevel {
        self.level
    }

    /// Whether the signal is a circuit input.
    pub fn is_input(&self) -> bool {
        self.is_input
    }

    /// Whether the signal is a circuit output.
    pub fn is_output(&self) -> bool {
        self.is_output
    }

    /// A signal is internal iff it is neither an input nor an output.
    pub fn is_internal(&self) -> bool {
        !self.is_input && !self.is_output
    }
}

/// A placed catalog part: pin bindings plus the owned behavioral model.
#[derive(Debug)]
pub struct Instance {
    id: String,
    part: Part,
    package: String,
    pins: [Option<SignalKey>; PIN_COUNT],
    model: IcModel,
}

impl Instance {
    /// The unique instance id (e.g. `U1`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The catalog part of this instance.
    pub fn part(&self) -> Part {
        self.part
    }

    /// The informational package tag (e.g. `DIP-14`).
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The signal bound to `pin`, if any.
    pub fn signal_at(&self, pin: Pin) -> Option<SignalKey> {
        self.pins[pin.index()]
    }

    /// The behavioral model, for direct pin inspection.
    pub fn model(&self) -> &IcModel {
        &self.model
    }
}

/// A loaded circuit: signals, instances, and the propagation settings.
#[derive(Debug)]
pub struct Circuit {
    signals: SlotMap<SignalKey, Signal>,
    instances: SlotMap<InstanceKey, Instance>,
    signal_names: HashMap<String, SignalKey>,
    instance_ids: HashMap<String, InstanceKey>,
    max_iterations: usize,
}

impl Circuit {
    /// Constructs an empty circuit. The `VCC` and `GND` rails always exist
    /// and hold high/low from the start.
    pub fn new() -> Self {
        let mut circuit = Self {
            signals: SlotMap::with_key(),
            instances: SlotMap::with_key(),
            signal_names: HashMap::new(),
            instance_ids: HashMap::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        };
        circuit.create_signal(VCC, false, false);
        circuit.create_signal(GND, false, false);
        circuit.reset();
        circuit
    }

    /// Creates a signal if `name` is not yet known and returns its key.
    /// The first creation wins; repeats return the existing key with the
    /// direction flags untouched.
    pub fn create_signal(&mut self, name: &str, is_input: bool, is_output: bool) -> SignalKey {
        if let Some(&key) = self.signal_names.get(name) {
            return key;
        }
        let key = self.signals.insert(Signal::new(name, is_input, is_output));
        self.signal_names.insert(name.to_string(), key);
        key
    }

    /// Flags an existing signal as a circuit input.
    pub fn mark_input(&mut self, name: &str) {
        if let Some(&key) = self.signal_names.get(name) {
            self.signals[key].is_input = true;
        }
    }

    /// Flags an existing signal as a circuit output.
    pub fn mark_output(&mut self, name: &str) {
        if let Some(&key) = self.signal_names.get(name) {
            self.signals[key].is_output = true;
        }
    }

    /// Places an instance of `part_number` under the unique id `id`.
    pub fn add_component(
        &mut self,
        id: &str,
        part_number: &str,
        package: &str,
    ) -> Result<InstanceKey, SimError> {
        let part: Part = part_number.parse()?;
        if self.instance_ids.contains_key(id) {
            return Err(SimError::DuplicateInstance(id.to_string()));
        }
        let key = self.instances.insert(Instance {
            id: id.to_string(),
            part,
            package: package.to_string(),
            pins: [None; PIN_COUNT],
            model: part.model(),
        });
        self.instance_ids.insert(id.to_string(), key);
        clilog::debug!("added {} ({}, {} ns)", id, part, part.propagation_delay_ns());
        Ok(key)
    }

    /// Binds `pin` (netlist text) of instance `id` to `signal`, creating
    /// the signal as internal if it is not yet known.
    pub fn connect(&mut self, id: &str, pin: &str, signal: &str) -> Result<(), SimError> {
        let Some(&instance) = self.instance_ids.get(id) else {
            return Err(SimError::UnknownInstance(id.to_string()));
        };
        let pin: Pin = pin.parse()?;
        let key = self.create_signal(signal, false, false);
        self.instances[instance].pins[pin.index()] = Some(key);
        Ok(())
    }

    /// Sets the level of a named wire. Unknown names are ignored, matching
    /// the tolerance of the stimulus format.
    pub fn set_signal(&mut self, name: &str, level: LogicLevel) {
        match self.signal_names.get(name) {
            Some(&key) => self.signals[key].level = level,
            None => clilog::debug!("set_signal: no signal named `{}`", name),
        }
    }

    /// Reads the level of a named wire; unknown names read `Floating`.
    pub fn get_signal(&self, name: &str) -> LogicLevel {
        self.signal_names
            .get(name)
            .map(|&key| self.signals[key].level)
            .unwrap_or(LogicLevel::Floating)
    }

    /// Looks up a signal by name.
    pub fn signal(&self, name: &str) -> Option<&Signal> {
        self.signal_names.get(name).map(|&key| &self.signals[key])
    }

    /// Looks up an instance by id.
    pub fn instance(&self, id: &str) -> Option<&Instance> {
        self.instance_ids.get(id).map(|&key| &self.instances[key])
    }

    /// Iterates every signal in the circuit.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    /// Iterates every instance in the circuit.
    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    /// Number of signals, rails included.
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Number of placed instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// The propagation pass cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Overrides the propagation pass cap. Deep feedback networks may need
    /// more than the default 8 passes to settle.
    pub fn set_max_iterations(&mut self, cap: usize) {
        self.max_iterations = cap;
    }

    /// Floats every signal and re-forces the power rails. Run between test
    /// vectors; IC-internal state (stored flip-flop levels) survives.
    pub fn reset(&mut self) {
        for signal in self.signals.values_mut() {
            signal.level = LogicLevel::Floating;
        }
        if let Some(&key) = self.signal_names.get(VCC) {
            self.signals[key].level = LogicLevel::High;
        }
        if let Some(&key) = self.signal_names.get(GND) {
            self.signals[key].level = LogicLevel::Low;
        }
    }

    /// Powers every instance on or off.
    pub fn set_power(&mut self, on: bool) {
        for instance in self.instances.values_mut() {
            instance.model.set_power(on);
        }
    }

    /// Re-checks the load-time invariants over the finished graph: every
    /// instance's part number is in the catalog, and every assigned pin
    /// lies in 1..=14.
    ///
    /// [`Circuit::add_component`] and [`Circuit::connect`] already reject
    /// violations eagerly, so a circuit assembled through them always
    /// passes; the pass remains the final gate after a netlist load.
    pub fn validate(&self) -> Result<(), SimError> {
        for instance in self.instances.values() {
            // Catalog membership, re-derived from the part number text.
            instance.part.part_number().parse::<Part>()?;
            // Pin range, re-derived from the assignment slots.
            for (slot, assignment) in instance.pins.iter().enumerate() {
                if assignment.is_some() {
                    Pin::new(slot as u8 + 1)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}
