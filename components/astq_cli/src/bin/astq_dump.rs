//! astq-dump — print the wrapped syntax tree of Rust source as JSON.
//!
//! Reads source from standard input and emits one JSON document with the
//! fields `type`, `pos`, `end` and `children` per node.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use astq_tree::parse_source;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("astq-dump: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("cannot read source from stdin")?;
    let tree = parse_source(source.as_str())?;
    let json = serde_json::to_string(&tree.root()).context("cannot serialize tree")?;
    println!("{json}");
    Ok(())
}
