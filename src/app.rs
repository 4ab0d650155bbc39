use std::io::{self, Read, Write};

use anyhow::{Context, Result};

use crate::cli::{Config, Format, resolve_use_color};
use crate::output::{Level, prefix};
use crate::regex::{Digraph, ParseOptions, export, roundtrip};

/// Exit codes: 0 = all patterns parsed (and round-tripped under `--check`),
/// 1 = round-trip mismatch under `--check`, 2 = a pattern failed to parse.
pub fn run(cfg: Config) -> Result<i32> {
    let patterns = if cfg.patterns.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("reading patterns from stdin")?;
        buffer
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        cfg.patterns.clone()
    };

    let stdout = io::stdout();
    let stderr = io::stderr();
    process(&cfg, &patterns, &mut stdout.lock(), &mut stderr.lock())
}

pub fn process<W: Write, E: Write>(
    cfg: &Config,
    patterns: &[String],
    out: &mut W,
    err: &mut E,
) -> Result<i32> {
    let use_color = resolve_use_color(&cfg.color);
    let options = ParseOptions {
        max_depth: cfg.max_depth,
    };

    if cfg.debug {
        writeln!(err, "debug: {} patterns to parse", patterns.len())?;
    }

    let mut digraph = Digraph::new("common");
    let mut parse_failed = false;
    let mut mismatched = false;

    for pattern in patterns {
        let result = match roundtrip(pattern, &options) {
            Ok(result) => result,
            Err(e) => {
                parse_failed = true;
                writeln!(err, "{} '{pattern}': {e}", prefix(Level::Error, use_color))?;
                continue;
            }
        };

        if !result.matches(pattern) {
            mismatched = true;
            writeln!(
                err,
                "{} '{pattern}' -> '{}'",
                prefix(Level::Warning, use_color),
                result.canonical
            )?;
        }

        match cfg.format {
            Format::Dot => {
                let graph = export(&result.tree, pattern);
                if cfg.debug {
                    writeln!(
                        err,
                        "debug: '{pattern}': {} nodes, {} edges",
                        graph.nodes.len(),
                        graph.edges.len()
                    )?;
                }
                digraph.push(graph);
            }
            Format::Canonical => writeln!(out, "{}", result.canonical)?,
            Format::Ast => writeln!(out, "{:#?}", result.tree)?,
        }
    }

    if cfg.format == Format::Dot && !digraph.is_empty() {
        write!(out, "{digraph}")?;
    }
    out.flush()?;

    Ok(if parse_failed {
        2
    } else if cfg.check && mismatched {
        1
    } else {
        0
    })
}
