use std::io;
use std::io::IsTerminal;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Graphviz digraph, one cluster per pattern
    Dot,
    /// Canonical pattern text, one per line
    Canonical,
    /// Debug dump of the syntax tree
    Ast,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "regex-tree", version, about = "Parse regex patterns into syntax trees")]
pub struct Config {
    /// Patterns to parse; read one per line from stdin when omitted
    pub patterns: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Dot)]
    pub format: Format,

    /// Exit with status 1 when a pattern does not survive the round trip
    #[arg(long)]
    pub check: bool,

    /// Maximum group nesting depth
    #[arg(long, value_name = "N", default_value_t = 256)]
    pub max_depth: usize,

    /// Colour diagnostics on stderr
    #[arg(long, value_enum, default_value_t = ColorWhen::Never)]
    pub color: ColorWhen,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

pub fn resolve_use_color(color: &ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stderr().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["regex-tree", "a+b"]);
        assert_eq!(cfg.patterns, vec!["a+b"]);
        assert_eq!(cfg.format, Format::Dot);
        assert_eq!(cfg.max_depth, 256);
        assert_eq!(cfg.color, ColorWhen::Never);
        assert!(!cfg.check && !cfg.debug);
    }

    #[test]
    fn options() {
        let cfg = Config::parse_from([
            "regex-tree",
            "--format",
            "canonical",
            "--check",
            "--max-depth",
            "8",
            "--color",
            "always",
        ]);
        assert!(cfg.patterns.is_empty());
        assert_eq!(cfg.format, Format::Canonical);
        assert_eq!(cfg.max_depth, 8);
        assert!(cfg.check);
        assert!(resolve_use_color(&cfg.color));
    }
}
