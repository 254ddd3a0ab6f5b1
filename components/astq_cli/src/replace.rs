//! Replace mode: pipe matched regions through a child command and splice
//! its output back into the document.

use std::cmp::Reverse;
use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use astq_tree::NodeRef;
use astq_types::ChildProcessError;
use tracing::debug;

/// Rewrites `source` by feeding every matched region to `command` and
/// substituting the command's standard output. Unmatched regions pass
/// through verbatim.
///
/// Matches are spliced outermost-first in document order, whatever order
/// the query produced them (a comma-separated query unions its selectors
/// by first producer, not by position). A match nested inside an
/// already-replaced range is skipped, so splicing stays a single
/// left-to-right pass.
pub fn rewrite(source: &str, matches: &[NodeRef<'_>], command: &[String]) -> Result<String> {
    let mut ordered: Vec<NodeRef<'_>> = matches.to_vec();
    ordered.sort_by_key(|matched| (matched.pos(), Reverse(matched.end())));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for matched in ordered {
        if matched.pos() < cursor {
            debug!(pos = matched.pos(), "skipping nested match");
            continue;
        }
        output.push_str(&source[cursor..matched.pos()]);
        let replacement = pipe_through(command, &source[matched.pos()..matched.end()])?;
        output.push_str(&replacement);
        cursor = matched.end();
    }
    output.push_str(&source[cursor..]);
    Ok(output)
}

fn pipe_through(command: &[String], input: &str) -> Result<String> {
    let (program, args) = command
        .split_first()
        .context("replace command is empty")?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("cannot spawn `{program}`"))?;
    let mut stdin = child.stdin.take().context("child stdin unavailable")?;
    if let Err(err) = stdin.write_all(input.as_bytes()) {
        // A child that exits without reading closes the pipe; its exit
        // status carries the actual diagnosis.
        if err.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(anyhow::Error::from(err).context("cannot write to child stdin"));
        }
    }
    drop(stdin);
    let output = child
        .wait_with_output()
        .context("cannot collect child output")?;
    if !output.status.success() {
        let err = ChildProcessError {
            command: command.join(" "),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        };
        return Err(err.into());
    }
    String::from_utf8(output.stdout).context("child produced non-UTF-8 output")
}
