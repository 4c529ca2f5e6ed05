//! Test-vector files: parsing and signal-direction classification.
//!
//! The format is line-oriented: `[description]` opens a vector and
//! `signal = value` lines add assignments to it. Whether an assignment is a
//! stimulus or an expectation comes from the netlist's signal directions,
//! with a name-based heuristic as fallback for bare legacy files.

use std::path::Path;

use crate::circuit::Circuit;
use crate::error::SimError;
use crate::logic::LogicLevel;

/// A single stimulus: ordered input assignments and expected outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestVector {
    /// Human-readable description from the `[…]` header.
    pub description: String,
    /// Input assignments, applied in file order.
    pub inputs: Vec<(String, LogicLevel)>,
    /// Expected output levels, compared after propagation.
    pub expected: Vec<(String, LogicLevel)>,
}

impl TestVector {
    /// Creates an empty vector with the given description.
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Appends an input assignment.
    pub fn drive(&mut self, signal: &str, level: LogicLevel) {
        self.inputs.push((signal.to_string(), level));
    }

    /// Appends an expected output.
    pub fn expect(&mut self, signal: &str, level: LogicLevel) {
        self.expected.push((signal.to_string(), level));
    }
}

/// How a test-vector assignment is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Input,
    Output,
}

/// Loads vectors from `path`, classifying each assignment against the
/// circuit's declared signal directions.
pub fn load(path: &Path, circuit: &Circuit) -> Result<Vec<TestVector>, SimError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text, &path.display().to_string(), circuit)
}

/// Parses test-vector text. Blank lines and `#` comments are ignored;
/// assignments whose direction cannot be determined are dropped with a
/// debug note.
pub fn parse(text: &str, file: &str, circuit: &Circuit) -> Result<Vec<TestVector>, SimError> {
    let error = |line: usize, message: String| SimError::Parse {
        file: file.to_string(),
        line,
        message,
    };

    let mut vectors = Vec::new();
    let mut current: Option<TestVector> = None;
    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(description) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            vectors.extend(current.replace(TestVector::new(description)));
            continue;
        }
        let Some(vector) = current.as_mut() else {
            return Err(error(
                number + 1,
                format!("assignment before any [vector] header: `{line}`"),
            ));
        };
        let Some((name, value)) = line.split_once('=') else {
            return Err(error(
                number + 1,
                format!("expected `signal = value`, got `{line}`"),
            ));
        };
        let name = name.trim();
        let level = LogicLevel::parse(value.trim());
        match direction_of(name, circuit) {
            Some(Direction::Input) => vector.drive(name, level),
            Some(Direction::Output) => vector.expect(name, level),
            None => clilog::debug!("ignoring `{}`: direction unknown", name),
        }
    }
    vectors.extend(current);
    Ok(vectors)
}

/// Netlist direction wins; the heuristic only covers unknown signals.
fn direction_of(name: &str, circuit: &Circuit) -> Option<Direction> {
    if let Some(signal) = circuit.signal(name) {
        if signal.is_input() {
            return Some(Direction::Input);
        }
        if signal.is_output() {
            return Some(Direction::Output);
        }
    }
    heuristic(name)
}

/// Name-based fallback classification. Input rules win when both match.
fn heuristic(name: &str) -> Option<Direction> {
    let input = name.contains("_in")
        || matches!(name, "a" | "b" | "cin" | "sel")
        || name.starts_with("a_")
        || name.starts_with("b_");
    if input {
        return Some(Direction::Input);
    }
    let output = matches!(name, "cout" | "sum" | "y" | "out")
        || name.ends_with("_out")
        || name.ends_with("_sel")
        || name.starts_with("sum_");
    output.then_some(Direction::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::LogicLevel::{Floating, High, Low};

    fn bare_circuit() -> Circuit {
        Circuit::new()
    }

    #[test]
    fn parses_vectors_comments_and_blanks() {
        let text = "
# half adder exhaustive
[both high]
a = 1
b = 1
sum  =  0
cout = 1

[both low]
a = 0
b = 0
sum = 0
cout = 0
";
        let vectors = parse(text, "t.vec", &bare_circuit()).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].description, "both high");
        assert_eq!(
            vectors[0].inputs,
            vec![("a".to_string(), High), ("b".to_string(), High)]
        );
        assert_eq!(
            vectors[0].expected,
            vec![("sum".to_string(), Low), ("cout".to_string(), High)]
        );
        assert_eq!(vectors[1].description, "both low");
    }

    #[test]
    fn level_spellings() {
        let text = "[v]\na = HIGH\nb = low\ncin = Z\n";
        let vectors = parse(text, "t.vec", &bare_circuit()).unwrap();
        assert_eq!(
            vectors[0].inputs,
            vec![
                ("a".to_string(), High),
                ("b".to_string(), Low),
                ("cin".to_string(), Floating)
            ]
        );
    }

    #[test]
    fn netlist_direction_beats_heuristic() {
        let mut circuit = Circuit::new();
        // `sum` would heuristically be an output; the netlist says input.
        circuit.create_signal("sum", true, false);
        let vectors = parse("[v]\nsum = 1\n", "t.vec", &circuit).unwrap();
        assert_eq!(vectors[0].inputs.len(), 1);
        assert!(vectors[0].expected.is_empty());
    }

    #[test]
    fn heuristic_classification() {
        for name in ["a", "b", "cin", "sel", "clk_in", "a_hi", "b_0", "data_in"] {
            assert_eq!(heuristic(name), Some(Direction::Input), "{name}");
        }
        for name in ["cout", "sum", "y", "out", "q_out", "mux_sel", "sum_1"] {
            assert_eq!(heuristic(name), Some(Direction::Output), "{name}");
        }
        for name in ["clk", "d", "q", "node7"] {
            assert_eq!(heuristic(name), None, "{name}");
        }
    }

    #[test]
    fn unclassifiable_assignments_are_dropped() {
        let vectors = parse("[v]\nmystery = 1\na = 0\n", "t.vec", &bare_circuit()).unwrap();
        assert_eq!(vectors[0].inputs.len(), 1);
        assert!(vectors[0].expected.is_empty());
    }

    #[test]
    fn assignment_outside_a_vector_is_an_error() {
        let err = parse("a = 1\n", "t.vec", &bare_circuit()).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 1, .. }));
    }

    #[test]
    fn junk_line_is_an_error() {
        let err = parse("[v]\nnot an assignment\n", "t.vec", &bare_circuit()).unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 2, .. }));
    }

    #[test]
    fn trailing_vector_is_kept() {
        let vectors = parse("[only]\na = 1\n", "t.vec", &bare_circuit()).unwrap();
        assert_eq!(vectors.len(), 1);
    }
}
