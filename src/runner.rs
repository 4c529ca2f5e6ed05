//! Applies test vectors to a circuit and collects pass/fail reports.
//!
//! A vector run is: reset the circuit, drive the inputs in file order,
//! propagate to a fixed point once, then compare every expected output.
//! Mismatches are recorded per comparison and never abort the run; the
//! run-level verdict is the conjunction of all vector verdicts.

use std::path::Path;

use serde::Serialize;

use crate::circuit::Circuit;
use crate::error::SimError;
use crate::logic::LogicLevel;
use crate::netlist;
use crate::vectors::{self, TestVector};

/// One expected-output comparison.
#[derive(Debug, Clone, Serialize)]
pub struct SignalCheck {
    /// Name of the checked signal.
    pub signal: String,
    /// Level the vector declared.
    pub expected: LogicLevel,
    /// Level observed after propagation.
    pub actual: LogicLevel,
}

impl SignalCheck {
    /// Whether observed matched expected.
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// The outcome of one vector.
#[derive(Debug, Clone, Serialize)]
pub struct VectorOutcome {
    /// The vector's description.
    pub description: String,
    /// All expected-output comparisons, in vector order.
    pub checks: Vec<SignalCheck>,
}

impl VectorOutcome {
    /// A vector passes iff every expected output matched.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(SignalCheck::passed)
    }
}

/// The cumulative result of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Per-vector outcomes, in run order.
    pub outcomes: Vec<VectorOutcome>,
}

impl RunSummary {
    /// The run passes iff every vector passed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(VectorOutcome::passed)
    }

    /// Number of vectors that passed.
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of vectors that failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }
}

/// Applies one vector and reports the comparisons.
pub fn apply_vector(circuit: &mut Circuit, vector: &TestVector) -> VectorOutcome {
    circuit.reset();
    for (name, level) in &vector.inputs {
        circuit.set_signal(name, *level);
    }
    circuit.propagate();

    let checks = vector
        .expected
        .iter()
        .map(|(name, expected)| SignalCheck {
            signal: name.clone(),
            expected: *expected,
            actual: circuit.get_signal(name),
        })
        .collect();
    VectorOutcome {
        description: vector.description.clone(),
        checks,
    }
}

/// Runs every vector in order, logging each comparison.
pub fn run(circuit: &mut Circuit, vectors: &[TestVector]) -> RunSummary {
    let mut summary = RunSummary::default();
    for (i, vector) in vectors.iter().enumerate() {
        clilog::info!("vector {} [{}]", i + 1, vector.description);
        let outcome = apply_vector(circuit, vector);
        for check in &outcome.checks {
            match check.passed() {
                true => clilog::info!("  {}: {} [pass]", check.signal, check.actual),
                false => clilog::warn!(
                    "  {}: expected {}, got {} [FAIL]",
                    check.signal,
                    check.expected,
                    check.actual
                ),
            }
        }
        summary.outcomes.push(outcome);
    }
    clilog::info!(
        "{}/{} vector(s) passed",
        summary.passed_count(),
        summary.outcomes.len()
    );
    summary
}

/// Top-level facade tying the netlist, the vectors, and the runner
/// together for the CLI.
#[derive(Debug, Default)]
pub struct Simulator {
    circuit: Option<Circuit>,
    vectors: Vec<TestVector>,
}

impl Simulator {
    /// Creates a simulator with no circuit loaded.
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads and validates a netlist, replacing any prior circuit.
    pub fn load_netlist(&mut self, path: &Path) -> Result<(), SimError> {
        self.circuit = Some(netlist::load(path)?);
        Ok(())
    }

    /// Loads test vectors, classifying directions against the loaded
    /// circuit. Fails `NotReady` before a netlist load.
    pub fn load_vectors(&mut self, path: &Path) -> Result<(), SimError> {
        let circuit = self.circuit.as_ref().ok_or(SimError::NotReady)?;
        let mut loaded = vectors::load(path, circuit)?;
        clilog::info!("loaded {} test vector(s)", loaded.len());
        self.vectors.append(&mut loaded);
        Ok(())
    }

    /// Appends a vector built in code.
    pub fn add_vector(&mut self, vector: TestVector) {
        self.vectors.push(vector);
    }

    /// Drops all loaded vectors.
    pub fn clear_vectors(&mut self) {
        self.vectors.clear();
    }

    /// The loaded circuit, if any.
    pub fn circuit(&self) -> Option<&Circuit> {
        self.circuit.as_ref()
    }

    /// Runs every loaded vector. Fails `NotReady` before a netlist load.
    pub fn simulate(&mut self) -> Result<RunSummary, SimError> {
        let circuit = self.circuit.as_mut().ok_or(SimError::NotReady)?;
        Ok(run(circuit, &self.vectors))
    }

    /// Logs a structural summary of the loaded circuit.
    pub fn log_circuit_info(&self) {
        let Some(circuit) = &self.circuit else {
            return;
        };
        clilog::info!(
            "circuit: {} signal(s), {} component(s)",
            circuit.signal_count(),
            circuit.instance_count()
        );
        for signal in circuit.signals() {
            let direction = match (signal.is_input(), signal.is_output()) {
                (true, true) => "input/output",
                (true, false) => "input",
                (false, true) => "output",
                (false, false) => "internal",
            };
            clilog::debug!("  signal {} ({})", signal.name(), direction);
        }
        for instance in circuit.instances() {
            clilog::debug!(
                "  {} = {} [{}] ({} ns)",
                instance.id(),
                instance.part(),
                instance.package(),
                instance.part().propagation_delay_ns()
            );
        }
    }

    /// Snapshot of every signal level, for state dumps.
    pub fn circuit_state(&self) -> Vec<(String, LogicLevel)> {
        self.circuit
            .iter()
            .flat_map(|c| c.signals())
            .map(|s| (s.name().to_string(), s.level()))
            .collect()
    }
}
