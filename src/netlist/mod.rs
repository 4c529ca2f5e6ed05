//! Netlist loading: dialect detection and circuit construction.
//!
//! Two dialects are understood: the KiCad s-expression export (selected by
//! the `.net` extension) and the legacy flat JSON format (anything else).
//! Both produce a validated [`Circuit`] through the same graph operations,
//! so the simulation core never sees the textual form.

pub mod kicad;
pub mod legacy;

use std::path::Path;

use crate::circuit::Circuit;
use crate::error::SimError;

/// Loads a netlist, choosing the dialect by file extension.
pub fn load(path: &Path) -> Result<Circuit, SimError> {
    let text = std::fs::read_to_string(path)?;
    let file = path.display().to_string();
    let circuit = match path.extension().is_some_and(|ext| ext == "net") {
        true => kicad::parse(&text, &file)?,
        false => legacy::parse(&text, &file)?,
    };
    circuit.validate()?;
    clilog::info!(
        "loaded {}: {} signal(s), {} component(s)",
        file,
        circuit.signal_count(),
        circuit.instance_count()
    );
    Ok(circuit)
}
