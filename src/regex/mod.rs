pub mod ast;
pub mod error;
pub mod graph;
pub mod parser;
pub mod serialize;

pub use ast::{Alternative, Atom, Charset, Element, Multiplicity, Range, Sequence, Simple};
pub use error::{ParseError, StructuralError, SyntaxErrorKind};
pub use graph::{Digraph, Edge, Graph, Node, NodeId, export};
pub use parser::{ParseOptions, parse_regex, parse_regex_with};
pub use serialize::{multiplicity_text, serialize};

/// Outcome of parsing a pattern and serializing it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub tree: Alternative,
    pub canonical: String,
}

impl RoundTrip {
    pub fn matches(&self, pattern: &str) -> bool {
        self.canonical == pattern
    }
}

pub fn roundtrip(pattern: &str, options: &ParseOptions) -> Result<RoundTrip, ParseError> {
    let tree = parse_regex_with(pattern, options)?;
    let canonical = serialize(&tree);
    Ok(RoundTrip { tree, canonical })
}
