use std::fmt::{self, Display, Formatter, Write};

use crate::regex::ast::{Alternative, Atom, Charset, Element, Multiplicity, Range, Sequence, Simple};

/// Canonical pattern text for a tree. Metacharacters inside literals and
/// charsets are written unescaped, so such trees do not read back the same.
pub fn serialize(tree: &Alternative) -> String {
    tree.to_string()
}

/// Quantifier suffix text: empty for exactly-once.
pub fn multiplicity_text(m: &Multiplicity) -> String {
    m.to_string()
}

pub fn escape_into<W: Write>(out: &mut W, c: char, escape_dquote: bool) -> fmt::Result {
    match c {
        '\\' => out.write_str("\\\\"),
        '\n' => out.write_str("\\n"),
        '\t' => out.write_str("\\t"),
        '\r' => out.write_str("\\r"),
        '\u{8}' => out.write_str("\\b"),
        '\0' => out.write_str("\\0"),
        '"' if escape_dquote => out.write_str("\\\""),
        c => out.write_char(c),
    }
}

pub fn escape_str_into<W: Write>(out: &mut W, s: &str, escape_dquote: bool) -> fmt::Result {
    s.chars().try_for_each(|c| escape_into(out, c, escape_dquote))
}

/// Escaped text for use in `format!`.
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        escape_str_into(f, self.0, false)
    }
}

impl Display for Multiplicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let min = self.min();
        match self.max() {
            None if min == 0 => f.write_str("*")?,
            None if min == 1 => f.write_str("+")?,
            None => write!(f, "{{{min},}}")?,
            Some(1) if min == 1 => {}
            Some(max) if max == min => write!(f, "{{{min}}}")?,
            Some(1) if min == 0 => f.write_str("?")?,
            Some(max) if min == 0 => write!(f, "{{,{max}}}")?,
            Some(max) => write!(f, "{{{min},{max}}}")?,
        }

        if self.repeating() && !self.greedy() {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        escape_into(f, self.from(), false)?;
        f.write_char('-')?;
        escape_into(f, self.till(), false)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Element::Char(c) => escape_into(f, *c, false),
            Element::Range(range) => range.fmt(f),
        }
    }
}

impl Display for Charset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        if self.negated {
            f.write_char('^')?;
        }
        for element in &self.elements {
            element.fmt(f)?;
        }
        f.write_char(']')
    }
}

impl Display for Simple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Simple::StartOfMatch => f.write_char('^'),
            Simple::EndOfMatch => f.write_char('$'),
            Simple::AnyChar => f.write_char('.'),
            Simple::Charset(set) => set.fmt(f),
            Simple::Literal(s) => escape_str_into(f, s, false),
            Simple::Group(root) => write!(f, "({root})"),
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.expr, self.mult)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.atoms.iter().try_for_each(|atom| atom.fmt(f))
    }
}

impl Display for Alternative {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                f.write_char('|')?;
            }
            branch.fmt(f)?;
        }
        Ok(())
    }
}
