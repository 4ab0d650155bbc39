use std::collections::BTreeSet;

use crate::regex::error::StructuralError;

/// Repetition bounds of an atom. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    min: u32,
    max: Option<u32>,
    greedy: bool,
}

impl Multiplicity {
    pub fn new(min: u32, max: Option<u32>) -> Result<Self, StructuralError> {
        match max {
            Some(max) if max < min => Err(StructuralError::InvertedBounds { min, max }),
            _ => Ok(Multiplicity {
                min,
                max,
                greedy: true,
            }),
        }
    }

    pub fn once() -> Self {
        Multiplicity {
            min: 1,
            max: Some(1),
            greedy: true,
        }
    }

    pub fn optional() -> Self {
        Multiplicity {
            min: 0,
            max: Some(1),
            greedy: true,
        }
    }

    pub fn at_least(min: u32) -> Self {
        Multiplicity {
            min,
            max: None,
            greedy: true,
        }
    }

    pub fn exactly(n: u32) -> Self {
        Multiplicity {
            min: n,
            max: Some(n),
            greedy: true,
        }
    }

    pub fn non_greedy(self) -> Self {
        Multiplicity {
            greedy: false,
            ..self
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }

    pub fn greedy(&self) -> bool {
        self.greedy
    }

    pub fn unbounded(&self) -> bool {
        self.max.is_none()
    }

    pub fn repeating(&self) -> bool {
        self.max.is_none_or(|max| max > 1)
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Multiplicity::once()
    }
}

/// Inclusive character range inside a charset; `from <= till` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    from: char,
    till: char,
}

impl Range {
    pub fn new(from: char, till: char) -> Result<Self, StructuralError> {
        if from > till {
            return Err(StructuralError::InvertedRange { from, till });
        }
        Ok(Range { from, till })
    }

    pub fn from(&self) -> char {
        self.from
    }

    pub fn till(&self) -> char {
        self.till
    }
}

// Ordering puts loose chars before ranges, which is what the canonical
// charset text relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Char(char),   // a
    Range(Range), // a-z
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charset {
    pub negated: bool, // [^...]
    pub elements: BTreeSet<Element>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simple {
    StartOfMatch,            // ^
    EndOfMatch,              // $
    AnyChar,                 // .
    Charset(Charset),        // [...]
    Literal(String),         // run of plain characters
    Group(Box<Alternative>), // (...)
}

impl Simple {
    pub fn literal(text: impl Into<String>) -> Self {
        Simple::Literal(text.into())
    }

    pub fn group(root: Alternative) -> Self {
        Simple::Group(Box::new(root))
    }
}

/// A simple expression together with its quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub expr: Simple,
    pub mult: Multiplicity,
}

impl Atom {
    pub fn new(expr: Simple, mult: Multiplicity) -> Self {
        Atom { expr, mult }
    }

    pub fn once(expr: Simple) -> Self {
        Atom::new(expr, Multiplicity::once())
    }
}

/// Concatenation: atoms matched one after another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    pub atoms: Vec<Atom>,
}

impl Sequence {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Sequence { atoms }
    }
}

/// `|`-separated branches; also the parse result, so the stored shape is
/// always `Alternative -> Sequence -> Atom`. Branch order is kept for
/// canonical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alternative {
    pub branches: Vec<Sequence>,
}

impl Alternative {
    pub fn new(branches: Vec<Sequence>) -> Self {
        Alternative { branches }
    }
}
