//! Command-line surface for astq.

use clap::{Parser, ValueEnum};

/// Output shape for filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Print the matched source text, one match per line.
    Text,
    /// Print `<pos>,<end>` byte offsets, one match per line.
    Pos,
}

/// Query Rust syntax trees with CSS selectors.
///
/// Reads Rust source from standard input and prints every node matching
/// the selector. With a trailing command, each matched region is piped
/// through it and the rewritten document is printed once instead.
#[derive(Debug, Parser)]
#[command(
    name = "astq",
    version,
    about = "Query Rust syntax trees with CSS selectors. Reads source from stdin.",
    after_help = "Examples:\n  cat src/lib.rs | astq 'function_item > identifier'\n  cat src/lib.rs | astq --format pos 'struct_item:has(field_declaration)'\n  cat src/lib.rs | astq 'function_item[name=\"main\"]' rustfmt"
)]
pub struct Args {
    /// Selector query, e.g. `source_file > function_item`.
    pub query: String,

    /// Output format for filter mode.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Replacement command and its arguments; presence switches to
    /// replace mode.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
