use std::process;

use clap::Parser;

use regex_tree::app;
use regex_tree::cli::Config;

// Usage: regex-tree [--format dot|canonical|ast] [PATTERN]...
fn main() {
    let cfg = Config::parse();
    match app::run(cfg) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
