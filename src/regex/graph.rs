use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write};

use crate::regex::ast::{Alternative, Atom, Charset, Element, Multiplicity, Sequence, Simple};
use crate::regex::serialize::{Escaped, escape_str_into};

pub type Attributes = BTreeMap<&'static str, String>;

/// Node ids are handed out per export, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub attrs: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edge {
    Children {
        parent: NodeId,
        children: Vec<NodeId>,
    },
    // self-loop marking repetition, labelled with the quantifier text
    Repeat {
        node: NodeId,
        label: String,
        greedy: bool,
    },
}

/// Directed graph for one pattern. Children are emitted before their parent,
/// so `root` is always the last node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub label: String,
    pub root: NodeId,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

pub fn export(tree: &Alternative, label: &str) -> Graph {
    let mut exporter = Exporter::default();
    let root = exporter.alternative(tree);
    Graph {
        label: label.to_string(),
        root,
        nodes: exporter.nodes,
        edges: exporter.edges,
    }
}

fn boxed() -> Attributes {
    Attributes::from([("shape", "box".to_string())])
}

fn diamond() -> Attributes {
    Attributes::from([
        ("shape", "diamond".to_string()),
        ("style", "rounded,".to_string()),
    ])
}

fn record() -> Attributes {
    Attributes::from([("shape", "Mrecord".to_string())])
}

fn special() -> Attributes {
    Attributes::from([
        ("shape", "box".to_string()),
        ("style", "filled,".to_string()),
        ("fillcolor", "gray".to_string()),
        ("fontsize", "10".to_string()),
    ])
}

fn literal() -> Attributes {
    let mut attrs = boxed();
    attrs.insert("fontname", "Courier".to_string());
    attrs
}

fn quoted(text: &str) -> String {
    let quote = if text.chars().count() == 1 { '\'' } else { '"' };
    format!("{quote}{}{quote}", Escaped(text))
}

#[derive(Default)]
struct Exporter {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Exporter {
    fn emit_node(&mut self, caption: &str, mult: Multiplicity, mut attrs: Attributes) -> NodeId {
        let id = NodeId(self.nodes.len());
        let quantifier = mult.to_string();

        attrs
            .entry("fontname")
            .or_insert_with(|| "Times,italic".to_string());
        if mult.min() == 0 {
            attrs.entry("style").or_default().push_str("dotted,");
        }

        self.nodes.push(Node {
            id,
            label: format!("{caption}{quantifier}"),
            attrs,
        });

        if mult.repeating() {
            self.edges.push(Edge::Repeat {
                node: id,
                label: quantifier,
                greedy: mult.greedy(),
            });
        }
        id
    }

    fn emit_children(&mut self, parent: NodeId, children: Vec<NodeId>) {
        if !children.is_empty() {
            self.edges.push(Edge::Children { parent, children });
        }
    }

    fn empty(&mut self) -> NodeId {
        self.emit_node("empty", Multiplicity::once(), special())
    }

    fn alternative(&mut self, a: &Alternative) -> NodeId {
        match a.branches.as_slice() {
            [] => self.empty(),
            [branch] => self.sequence(branch),
            branches => {
                let children = branches.iter().map(|branch| self.sequence(branch)).collect();
                let node = self.emit_node("alternative", Multiplicity::once(), diamond());
                self.emit_children(node, children);
                node
            }
        }
    }

    fn sequence(&mut self, s: &Sequence) -> NodeId {
        match s.atoms.as_slice() {
            [] => self.empty(),
            [atom] => self.atom(atom),
            atoms => {
                let children = atoms.iter().map(|atom| self.atom(atom)).collect();
                let node = self.emit_node("sequence", Multiplicity::once(), record());
                self.emit_children(node, children);
                node
            }
        }
    }

    // No separate atom node: the quantifier decorates the simple node itself.
    fn atom(&mut self, atom: &Atom) -> NodeId {
        let mult = atom.mult;
        match &atom.expr {
            Simple::StartOfMatch => self.emit_node("start-of-match", mult, special()),
            Simple::EndOfMatch => self.emit_node("end-of-match", mult, special()),
            Simple::AnyChar => self.emit_node("any", mult, special()),
            Simple::Literal(text) => self.emit_node(&quoted(text), mult, literal()),
            Simple::Charset(set) => self.charset(set, mult),
            Simple::Group(root) => {
                let child = self.alternative(root);
                let node = self.emit_node("group", mult, Attributes::new());
                self.emit_children(node, vec![child]);
                node
            }
        }
    }

    fn charset(&mut self, set: &Charset, mult: Multiplicity) -> NodeId {
        let children = set
            .elements
            .iter()
            .map(|element| {
                let caption = match element {
                    Element::Char(c) => quoted(&c.to_string()),
                    Element::Range(range) => format!(
                        "'{}…{}'",
                        Escaped(&range.from().to_string()),
                        Escaped(&range.till().to_string())
                    ),
                };
                self.emit_node(&caption, Multiplicity::once(), literal())
            })
            .collect();

        let (caption, color) = if set.negated {
            ("negated-charset", "red")
        } else {
            ("charset", "blue")
        };
        let node = self.emit_node(caption, mult, Attributes::from([("fontcolor", color.to_string())]));
        self.emit_children(node, children);
        node
    }
}

struct DotId(usize, NodeId);

impl Display for DotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "node{}_{}", self.0, self.1.index())
    }
}

impl Graph {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Writes this graph as a dashed `cluster_regex<cluster>` subgraph. The
    /// cluster number keeps node ids unique when several graphs share one
    /// digraph.
    pub fn write_dot<W: Write>(&self, out: &mut W, cluster: usize) -> fmt::Result {
        writeln!(out, "subgraph cluster_regex{cluster} {{")?;
        writeln!(out, "style=\"dashed\";")?;
        writeln!(out, "node[fontname=\"times,italic\"];")?;
        out.write_str("label=\"")?;
        escape_str_into(out, &self.label, true)?;
        out.write_str("\";\n\n")?;

        for node in &self.nodes {
            let mut attrs: BTreeMap<&str, &str> =
                node.attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
            attrs.insert("label", &node.label);

            write!(out, "{}[", DotId(cluster, node.id))?;
            for (key, value) in attrs {
                escape_str_into(out, key, true)?;
                out.write_str("=\"")?;
                escape_str_into(out, value, true)?;
                out.write_str("\",")?;
            }
            out.write_str("];\n")?;
        }

        for edge in &self.edges {
            match edge {
                Edge::Children { parent, children } => {
                    write!(out, "{} -> {{", DotId(cluster, *parent))?;
                    for child in children {
                        write!(out, "{}; ", DotId(cluster, *child))?;
                    }
                    out.write_str("}\n")?;
                }
                Edge::Repeat {
                    node,
                    label,
                    greedy,
                } => {
                    let id = DotId(cluster, *node);
                    write!(out, "{id} -> {id} [label=\"")?;
                    escape_str_into(out, label, true)?;
                    let style = if *greedy {
                        ",color=red,arrowhead=dot"
                    } else {
                        ",color=blue,arrowhead=odot"
                    };
                    writeln!(out, "\"{style}];")?;
                }
            }
        }

        out.write_str("}\n")
    }
}

/// A top-level `digraph` holding one cluster per exported pattern.
#[derive(Debug, Clone, Default)]
pub struct Digraph {
    name: String,
    graphs: Vec<Graph>,
}

impl Digraph {
    pub fn new(name: impl Into<String>) -> Self {
        Digraph {
            name: name.into(),
            graphs: Vec::new(),
        }
    }

    pub fn push(&mut self, graph: Graph) {
        self.graphs.push(graph);
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl Display for Digraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", self.name)?;
        for (i, graph) in self.graphs.iter().enumerate() {
            graph.write_dot(f, i + 1)?;
        }
        writeln!(f, "}}")
    }
}
