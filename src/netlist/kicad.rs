//! Parser for the KiCad s-expression netlist export.
//!
//! Only the `(components …)` and `(nets …)` blocks are consumed. Component
//! entries whose `value` begins with `74` become IC instances; connector
//! refs stay uninstantiated, but `JIN_*`/`JOUT_*` nodes classify the nets
//! they touch as circuit inputs/outputs.

use crate::circuit::Circuit;
use crate::error::SimError;

/// One node of an s-expression tree, tagged with its source line.
#[derive(Debug, PartialEq, Eq)]
struct Sexp {
    line: usize,
    kind: SexpKind,
}

#[derive(Debug, PartialEq, Eq)]
enum SexpKind {
    Atom(String),
    List(Vec<Sexp>),
}

impl Sexp {
    fn as_atom(&self) -> Option<&str> {
        match &self.kind {
            SexpKind::Atom(text) => Some(text),
            SexpKind::List(_) => None,
        }
    }

    /// The head atom of a list form, e.g. `comp` in `(comp …)`.
    fn head(&self) -> Option<&str> {
        match &self.kind {
            SexpKind::List(items) => items.first()?.as_atom(),
            SexpKind::Atom(_) => None,
        }
    }

    /// The forms following the head of a list; empty for atoms.
    fn tail(&self) -> &[Sexp] {
        match &self.kind {
            SexpKind::List(items) if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    /// The first child form with the given head.
    fn child(&self, head: &str) -> Option<&Sexp> {
        self.tail().iter().find(|form| form.head() == Some(head))
    }

    /// The single atom argument of a `(head arg)` child form.
    fn child_atom(&self, head: &str) -> Option<&str> {
        self.child(head)?.tail().first()?.as_atom()
    }
}

/// A character-level s-expression reader tracking line numbers.
struct Reader<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    file: &'a str,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str, file: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            file,
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> SimError {
        SimError::Parse {
            file: self.file.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
    }

    /// Reads one complete form: a list, a quoted string, or a bare atom.
    fn read(&mut self) -> Result<Sexp, SimError> {
        self.skip_whitespace();
        let line = self.line;
        match self.chars.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('(') => {
                self.bump();
                let mut items = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.chars.peek() {
                        None => return Err(self.error("unclosed list")),
                        Some(')') => {
                            self.bump();
                            break;
                        }
                        Some(_) => items.push(self.read()?),
                    }
                }
                Ok(Sexp {
                    line,
                    kind: SexpKind::List(items),
                })
            }
            Some(')') => Err(self.error("unexpected `)`")),
            Some('"') => {
                self.bump();
                let mut text = String::new();
                loop {
                    match self.bump() {
                        None => return Err(self.error("unterminated string")),
                        Some('"') => break,
                        Some('\\') => match self.bump() {
                            None => return Err(self.error("unterminated string")),
                            Some(escaped) => text.push(escaped),
                        },
                        Some(c) => text.push(c),
                    }
                }
                Ok(Sexp {
                    line,
                    kind: SexpKind::Atom(text),
                })
            }
            Some(_) => {
                let mut text = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                        break;
                    }
                    text.push(c);
                    self.bump();
                }
                Ok(Sexp {
                    line,
                    kind: SexpKind::Atom(text),
                })
            }
        }
    }
}

fn parse_error(file: &str, form: &Sexp, message: impl Into<String>) -> SimError {
    SimError::Parse {
        file: file.to_string(),
        line: form.line,
        message: message.into(),
    }
}

/// Parses the KiCad dialect into a circuit.
pub fn parse(text: &str, file: &str) -> Result<Circuit, SimError> {
    let mut reader = Reader::new(text, file);
    let doc = reader.read()?;
    if doc.head().is_none() {
        return Err(parse_error(file, &doc, "expected a netlist form"));
    }

    let mut circuit = Circuit::new();
    if let Some(components) = doc.child("components") {
        read_components(&mut circuit, components, file)?;
    }
    if let Some(nets) = doc.child("nets") {
        read_nets(&mut circuit, nets, file)?;
    }
    Ok(circuit)
}

/// Instantiates the 74-series entries of a `(components …)` block.
fn read_components(circuit: &mut Circuit, components: &Sexp, file: &str) -> Result<(), SimError> {
    for comp in components.tail() {
        if comp.head() != Some("comp") {
            continue;
        }
        let Some(reference) = comp.child_atom("ref") else {
            return Err(parse_error(file, comp, "component entry without (ref …)"));
        };
        let Some(value) = comp.child_atom("value") else {
            return Err(parse_error(file, comp, "component entry without (value …)"));
        };
        // Connectors and passives stay uninstantiated; their nodes only
        // classify net directions below.
        if !value.starts_with("74") {
            clilog::debug!("skipping non-IC component {} ({})", reference, value);
            continue;
        }
        let package = comp.child_atom("footprint").unwrap_or("DIP-14");
        circuit.add_component(reference, value, package)?;
    }
    Ok(())
}

/// Binds the nodes of a `(nets …)` block and classifies signal directions
/// from `JIN_`/`JOUT_` connector references.
fn read_nets(circuit: &mut Circuit, nets: &Sexp, file: &str) -> Result<(), SimError> {
    for net in nets.tail() {
        if net.head() != Some("net") {
            continue;
        }
        let Some(name) = net.child_atom("name") else {
            return Err(parse_error(file, net, "net entry without (name …)"));
        };
        let name = name.to_string();
        circuit.create_signal(&name, false, false);

        for node in net.tail() {
            if node.head() != Some("node") {
                continue;
            }
            let Some(reference) = node.child_atom("ref") else {
                return Err(parse_error(file, node, "net node without (ref …)"));
            };
            let Some(pin) = node.child_atom("pin") else {
                return Err(parse_error(file, node, "net node without (pin …)"));
            };

            if reference.starts_with("JIN_") {
                circuit.mark_input(&name);
            } else if reference.starts_with("JOUT_") {
                circuit.mark_output(&name);
            }

            // Bind only pins of instantiated ICs; connector nodes have no
            // package behind them.
            if circuit.instance(reference).is_some() {
                circuit.connect(reference, pin, &name)?;
            }
        }
    }
    Ok(())
}
