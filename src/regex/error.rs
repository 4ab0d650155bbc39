use thiserror::Error;

/// Invariant violations of AST values, raised by the validating constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("range '{from}'-'{till}' is out of order")]
    InvertedRange { from: char, till: char },
    #[error("quantifier bounds {{{min},{max}}} are out of order")]
    InvertedBounds { min: u32, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("unterminated charset, expected ']'")]
    UnterminatedCharset,
    #[error("dangling escape, expected a character after '\\'")]
    DanglingEscape,
    #[error("malformed quantifier")]
    MalformedQuantifier,
    #[error("unclosed group, expected ')'")]
    UnclosedGroup,
    #[error("nesting deeper than {limit} groups")]
    NestingTooDeep { limit: usize },
}

/// Why a pattern was rejected. `offset` is a byte offset into the pattern and
/// `fragment` is the input left from there on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error at offset {offset}: {kind} at '{fragment}'")]
    Syntax {
        offset: usize,
        kind: SyntaxErrorKind,
        fragment: String,
    },
    #[error("trailing unparsed input at offset {offset}: '{fragment}'")]
    TrailingInput { offset: usize, fragment: String },
    #[error("invalid structure at offset {offset}: {source} at '{fragment}'")]
    Structural {
        offset: usize,
        source: StructuralError,
        fragment: String,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. }
            | ParseError::TrailingInput { offset, .. }
            | ParseError::Structural { offset, .. } => *offset,
        }
    }

    pub fn fragment(&self) -> &str {
        match self {
            ParseError::Syntax { fragment, .. }
            | ParseError::TrailingInput { fragment, .. }
            | ParseError::Structural { fragment, .. } => fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_offset_and_fragment() {
        let err = ParseError::Syntax {
            offset: 4,
            kind: SyntaxErrorKind::UnterminatedCharset,
            fragment: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "syntax error at offset 4: unterminated charset, expected ']' at ''"
        );

        let err = ParseError::Structural {
            offset: 1,
            source: StructuralError::InvertedBounds { min: 3, max: 1 },
            fragment: "{3,1}".to_string(),
        };
        assert_eq!(err.offset(), 1);
        assert_eq!(err.fragment(), "{3,1}");
        assert_eq!(
            err.to_string(),
            "invalid structure at offset 1: quantifier bounds {3,1} are out of order at '{3,1}'"
        );
    }
}
