//! astq — query Rust syntax trees with CSS selectors.
//!
//! Typical usage:
//!
//! ```text
//! cat src/lib.rs | astq 'function_item > identifier'
//! ```

mod cli;
mod replace;

use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use astq_selectors::{parse_query, Queryable};
use astq_tree::parse_source;

use crate::cli::{Args, Format};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("astq: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("cannot read source from stdin")?;

    let query = parse_query(&args.query)?;
    let tree = parse_source(source.as_str())?;
    let matches = (&tree).query_all(&query);
    debug!(matches = matches.len(), "query evaluated");

    if args.command.is_empty() {
        print_matches(&source, &matches, args.format)?;
    } else {
        let rewritten = replace::rewrite(&source, &matches, &args.command)?;
        print!("{rewritten}");
    }
    Ok(())
}

fn print_matches(
    source: &str,
    matches: &[astq_tree::NodeRef<'_>],
    format: Format,
) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for matched in matches {
        match format {
            Format::Text => writeln!(out, "{}", &source[matched.pos()..matched.end()])?,
            Format::Pos => writeln!(out, "{},{}", matched.pos(), matched.end())?,
        }
    }
    Ok(())
}
