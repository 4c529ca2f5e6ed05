//! Parser for the legacy flat JSON netlist format.
//!
//! The recognized keys are `module_name`, `inputs`, `outputs`, and
//! `ic_instances`; anything else is ignored. The documents are small and
//! flat, so they deserialize straight into typed structs.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::circuit::Circuit;
use crate::error::SimError;

/// A legacy netlist document.
#[derive(Debug, Deserialize)]
struct NetlistDoc {
    #[serde(default)]
    module_name: String,
    #[serde(default)]
    inputs: Vec<PortDecl>,
    #[serde(default)]
    outputs: Vec<PortDecl>,
    #[serde(default)]
    ic_instances: Vec<IcDecl>,
}

#[derive(Debug, Deserialize)]
struct PortDecl {
    name: String,
}

#[derive(Debug, Deserialize)]
struct IcDecl {
    instance_id: String,
    part_number: String,
    #[serde(default = "default_package")]
    package: String,
    /// Pin number (as text) to signal name. A BTreeMap keeps binding order
    /// deterministic.
    #[serde(default)]
    pin_assignments: BTreeMap<String, String>,
}

fn default_package() -> String {
    "DIP-14".to_string()
}

/// Parses the legacy dialect into a circuit.
pub fn parse(text: &str, file: &str) -> Result<Circuit, SimError> {
    let doc: NetlistDoc = serde_json::from_str(text).map_err(|e| SimError::Parse {
        file: file.to_string(),
        line: e.line(),
        message: e.to_string(),
    })?;

    let mut circuit = Circuit::new();
    // Marking after creation keeps a port listed under both `inputs` and
    // `outputs` (a pass-through) carrying both flags, as in the KiCad
    // dialect.
    for port in &doc.inputs {
        circuit.create_signal(&port.name, false, false);
        circuit.mark_input(&port.name);
    }
    for port in &doc.outputs {
        circuit.create_signal(&port.name, false, false);
        circuit.mark_output(&port.name);
    }
    for ic in &doc.ic_instances {
        circuit.add_component(&ic.instance_id, &ic.part_number, &ic.package)?;
        for (pin, signal) in &ic.pin_assignments {
            circuit.connect(&ic.instance_id, pin, signal)?;
        }
    }
    clilog::debug!("legacy netlist module `{}`", doc.module_name);
    Ok(circuit)
}
