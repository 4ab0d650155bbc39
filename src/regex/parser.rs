use std::collections::BTreeSet;

use crate::regex::ast::{Alternative, Atom, Charset, Element, Multiplicity, Range, Sequence, Simple};
use crate::regex::error::{ParseError, StructuralError, SyntaxErrorKind};

/*
 * Grammar, highest precedence last:
 *
 * alternative  ::= sequence ('|' sequence)*
 * sequence     ::= atom*
 * atom         ::= simple quantifier?
 * simple       ::= '(' alternative ')' | charset | '.' | '^' | '$' | literal
 * charset      ::= '[' '^'? (char '-' char | char)* ']'
 * quantifier   ::= '?' | '{' N '}'
 *                | ('+' | '*' | '{' N ',}' | '{' N ',' M '}' | '{,' M '}') '?'?
 * literal      ::= run of plain chars, none directly followed by a quantifier
 *                | single plain char (the one the quantifier binds to)
 */

// A plain char directly followed by one of these is cut out of the literal run.
const QUANTIFIER_OPENERS: [char; 4] = ['{', '?', '+', '*'];

// Never a plain literal; '\' starts an escape instead. '[' opens a charset
// only at the start of a simple expression and is plain text inside a run.
const META_CHARS: [char; 11] = ['\\', '+', '*', '?', '.', '^', '$', '|', '{', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested groups.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { max_depth: 256 }
    }
}

pub fn parse_regex(pattern: &str) -> Result<Alternative, ParseError> {
    parse_regex_with(pattern, &ParseOptions::default())
}

/// Parses the whole pattern. Input left over after the longest valid prefix is
/// an error, never a partial tree.
pub fn parse_regex_with(pattern: &str, options: &ParseOptions) -> Result<Alternative, ParseError> {
    let mut parser = Parser {
        input: pattern,
        pos: 0,
        depth: 0,
        max_depth: options.max_depth,
    };

    let root = parser.parse_alternative()?;
    if parser.pos < pattern.len() {
        return Err(ParseError::TrailingInput {
            offset: parser.pos,
            fragment: parser.rest(parser.pos),
        });
    }
    Ok(root)
}

enum Bounds {
    Exact(u32),
    Range(u32, Option<u32>),
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn rest(&self, offset: usize) -> String {
        self.input[offset..].to_string()
    }

    fn syntax_error(&self, offset: usize, kind: SyntaxErrorKind) -> ParseError {
        ParseError::Syntax {
            offset,
            kind,
            fragment: self.rest(offset),
        }
    }

    fn structural_error(&self, offset: usize, source: StructuralError) -> ParseError {
        ParseError::Structural {
            offset,
            source,
            fragment: self.rest(offset),
        }
    }

    fn parse_alternative(&mut self) -> Result<Alternative, ParseError> {
        let mut branches = vec![self.parse_sequence()?];
        while self.eat('|') {
            branches.push(self.parse_sequence()?);
        }
        Ok(Alternative::new(branches))
    }

    fn parse_sequence(&mut self) -> Result<Sequence, ParseError> {
        let mut atoms = Vec::new();
        while let Some(expr) = self.parse_simple()? {
            let mult = self.parse_quantifier()?;
            atoms.push(Atom::new(expr, mult));
        }
        Ok(Sequence::new(atoms))
    }

    fn parse_simple(&mut self) -> Result<Option<Simple>, ParseError> {
        let simple = match self.peek() {
            None => return Ok(None),
            Some('(') => self.parse_group()?,
            Some('[') => Simple::Charset(self.parse_charset()?),
            Some('.') => {
                self.bump();
                Simple::AnyChar
            }
            Some('^') => {
                self.bump();
                Simple::StartOfMatch
            }
            Some('$') => {
                self.bump();
                Simple::EndOfMatch
            }
            Some(c) if c != '\\' && META_CHARS.contains(&c) => return Ok(None),
            Some(_) => Simple::Literal(self.parse_literal()?),
        };
        Ok(Some(simple))
    }

    fn parse_group(&mut self) -> Result<Simple, ParseError> {
        let start = self.pos;
        if self.depth >= self.max_depth {
            return Err(self.syntax_error(
                start,
                SyntaxErrorKind::NestingTooDeep {
                    limit: self.max_depth,
                },
            ));
        }

        self.bump(); // '('
        self.depth += 1;
        let root = self.parse_alternative()?;
        self.depth -= 1;

        if !self.eat(')') {
            return Err(self.syntax_error(self.pos, SyntaxErrorKind::UnclosedGroup));
        }
        Ok(Simple::group(root))
    }

    fn parse_charset(&mut self) -> Result<Charset, ParseError> {
        self.bump(); // '['
        let negated = self.eat('^');
        let mut elements = BTreeSet::new();

        loop {
            match self.peek() {
                None => return Err(self.syntax_error(self.pos, SyntaxErrorKind::UnterminatedCharset)),
                Some(']') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    elements.insert(self.parse_charset_element()?);
                }
            }
        }

        Ok(Charset { negated, elements })
    }

    // `a-z` becomes a range only when something other than ']' follows the
    // dash; otherwise the dash is read again as a plain element.
    fn parse_charset_element(&mut self) -> Result<Element, ParseError> {
        let start = self.pos;
        let from = self.parse_charset_char()?;
        let before_dash = self.pos;

        if self.eat('-') && !matches!(self.peek(), None | Some(']')) {
            let till = self.parse_charset_char()?;
            let range = Range::new(from, till).map_err(|e| self.structural_error(start, e))?;
            return Ok(Element::Range(range));
        }

        self.pos = before_dash;
        Ok(Element::Char(from))
    }

    fn parse_charset_char(&mut self) -> Result<char, ParseError> {
        match self.peek() {
            Some('\\') => self.parse_escape(),
            Some(c) => {
                self.bump();
                Ok(c)
            }
            None => Err(self.syntax_error(self.pos, SyntaxErrorKind::UnterminatedCharset)),
        }
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let start = self.pos;
        self.bump(); // '\'
        self.bump()
            .ok_or_else(|| self.syntax_error(start, SyntaxErrorKind::DanglingEscape))
    }

    fn parse_literal_char(&mut self) -> Result<Option<char>, ParseError> {
        match self.peek() {
            Some('\\') => self.parse_escape().map(Some),
            Some(c) if !META_CHARS.contains(&c) => {
                self.bump();
                Ok(Some(c))
            }
            _ => Ok(None),
        }
    }

    fn parse_literal(&mut self) -> Result<String, ParseError> {
        let mut run = String::new();

        loop {
            let start = self.pos;
            let Some(c) = self.parse_literal_char()? else {
                break;
            };

            if self.peek().is_some_and(|next| QUANTIFIER_OPENERS.contains(&next)) {
                // The quantifier binds to this char alone.
                if run.is_empty() {
                    run.push(c);
                } else {
                    self.pos = start;
                }
                break;
            }
            run.push(c);
        }

        Ok(run)
    }

    fn parse_quantifier(&mut self) -> Result<Multiplicity, ParseError> {
        let start = self.pos;
        let mult = match self.peek() {
            Some('?') => {
                self.bump();
                return Ok(Multiplicity::optional());
            }
            Some('+') => {
                self.bump();
                Multiplicity::at_least(1)
            }
            Some('*') => {
                self.bump();
                Multiplicity::at_least(0)
            }
            Some('{') => match self.parse_bounds(start)? {
                Bounds::Exact(n) => return Ok(Multiplicity::exactly(n)),
                Bounds::Range(min, max) => {
                    Multiplicity::new(min, max).map_err(|e| self.structural_error(start, e))?
                }
            },
            _ => return Ok(Multiplicity::once()),
        };

        // Only the repeating forms take a non-greedy marker.
        Ok(if self.eat('?') { mult.non_greedy() } else { mult })
    }

    fn parse_bounds(&mut self, start: usize) -> Result<Bounds, ParseError> {
        self.bump(); // '{'
        let min = self.parse_number();
        let bounds = match (min, self.eat(',')) {
            (Some(n), false) => Some(Bounds::Exact(n)),
            (Some(n), true) if self.peek() == Some('}') => Some(Bounds::Range(n, None)),
            (Some(n), true) => self.parse_number().map(|m| Bounds::Range(n, Some(m))),
            (None, true) => self.parse_number().map(|m| Bounds::Range(0, Some(m))),
            (None, false) => None,
        };

        match bounds {
            Some(bounds) if self.eat('}') => Ok(bounds),
            _ => Err(self.syntax_error(start, SyntaxErrorKind::MalformedQuantifier)),
        }
    }

    fn parse_number(&mut self) -> Option<u32> {
        let digits = self.input[self.pos..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        let n = self.input[self.pos..self.pos + digits].parse().ok()?;
        self.pos += digits;
        Some(n)
    }
}
