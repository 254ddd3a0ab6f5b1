//! Forward-descent selector evaluation over wrapped trees.
//!
//! A selector chain `S0 S1 … Sk` is evaluated by walking the tree once,
//! carrying the index of the link each branch is trying to satisfy. The
//! depth of the last matched link travels along so child combinators can
//! prune any branch that has descended more than one level past it; this
//! keeps evaluation linear in `nodes × chain length` instead of
//! re-anchoring every candidate from scratch.

use crate::predicates::is_match;
use crate::query::{Combinator, Query, Selector, SimpleSelector};
use astq_tree::{NodeId, NodeRef, Tree};
use std::collections::HashSet;
use std::ops::ControlFlow;

/// Types that can be queried with a parsed [`Query`].
///
/// `'t` is the lifetime of the queried tree; every reported match borrows
/// from it, not from the receiver.
pub trait Queryable<'t> {
    /// The first match in document order.
    ///
    /// Equivalent to the head of [`query_all`](Queryable::query_all),
    /// without materializing the full result list.
    fn query_first(&self, query: &Query) -> Option<NodeRef<'t>>;

    /// Every distinct match.
    ///
    /// The result is the order-preserving union over the query's
    /// comma-separated selectors: each selector contributes its matches in
    /// document order, and a node matched by several selectors appears
    /// once, where its first producer put it.
    fn query_all(&self, query: &Query) -> Vec<NodeRef<'t>>;
}

impl<'t> Queryable<'t> for &'t Tree {
    fn query_first(&self, query: &Query) -> Option<NodeRef<'t>> {
        if self.is_empty() {
            return None;
        }
        self.root().query_first(query)
    }

    fn query_all(&self, query: &Query) -> Vec<NodeRef<'t>> {
        if self.is_empty() {
            return Vec::new();
        }
        self.root().query_all(query)
    }
}

impl<'t> Queryable<'t> for NodeRef<'t> {
    fn query_first(&self, query: &Query) -> Option<NodeRef<'t>> {
        // The walk can emit a sibling branch before a match nested under
        // the node that produced it, so the first emission is not always
        // the first by position; keep the minimum instead of breaking.
        for selector in &query.selectors {
            let mut best: Option<NodeRef<'t>> = None;
            let _ = run_selector(*self, selector, &mut |node| {
                match best {
                    Some(current) if current.id() <= node.id() => {}
                    _ => best = Some(node),
                }
                ControlFlow::Continue(())
            });
            if best.is_some() {
                return best;
            }
        }
        None
    }

    fn query_all(&self, query: &Query) -> Vec<NodeRef<'t>> {
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut matches = Vec::new();
        for selector in &query.selectors {
            let mut found: Vec<NodeRef<'t>> = Vec::new();
            let mut found_ids: HashSet<NodeId> = HashSet::new();
            let _ = run_selector(*self, selector, &mut |node| {
                if found_ids.insert(node.id()) {
                    found.push(node);
                }
                ControlFlow::Continue(())
            });
            // Ids are assigned in pre-order, so this is document order;
            // sibling branches fire ahead of matches nested under the
            // node that spawned them.
            found.sort_by_key(NodeRef::id);
            for node in found {
                if seen.insert(node.id()) {
                    matches.push(node);
                }
            }
        }
        matches
    }
}

/// Evaluates one selector from `root`, invoking `emit` per completed chain.
fn run_selector<'t>(
    root: NodeRef<'t>,
    selector: &Selector,
    emit: &mut dyn FnMut(NodeRef<'t>) -> ControlFlow<()>,
) -> ControlFlow<()> {
    if selector.simple_selectors.is_empty() {
        return ControlFlow::Continue(());
    }
    walk_chain(root, &selector.simple_selectors, 0, 0, -1, emit)
}

/// Tries to advance the chain at `node`, which sits `depth` levels below
/// the evaluation root while the most recent match sits at `last_matched`.
///
/// The root is depth 0 with `last_matched` −1, so a leading child
/// combinator admits only the root itself. Embedded `:has` evaluation
/// enters at depth 1 with `last_matched` 0, giving its leading child
/// combinator immediate-children semantics.
pub(crate) fn walk_chain<'t>(
    node: NodeRef<'t>,
    chain: &[SimpleSelector],
    index: usize,
    depth: isize,
    last_matched: isize,
    emit: &mut dyn FnMut(NodeRef<'t>) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let link = &chain[index];
    // A child combinator admits candidates at most one level below the
    // previous match.
    if link.combinator == Combinator::Child && depth - last_matched > 1 {
        return ControlFlow::Continue(());
    }
    if is_match(node, link) {
        if index + 1 == chain.len() {
            emit(node)?;
        } else {
            let next = &chain[index + 1];
            match next.combinator {
                Combinator::Descendant | Combinator::Child => {
                    for child in node.children() {
                        walk_chain(child, chain, index + 1, depth + 1, depth, emit)?;
                    }
                }
                Combinator::NextSibling => {
                    if let Some(sibling) = node.next_sibling() {
                        walk_chain(sibling, chain, index + 1, depth, last_matched, emit)?;
                    }
                }
                Combinator::SubsequentSibling => {
                    for sibling in node.following_siblings() {
                        walk_chain(sibling, chain, index + 1, depth, last_matched, emit)?;
                    }
                }
            }
        }
    }
    // Matched or not, deeper nodes may still satisfy this same link; after
    // a terminal match this is also what surfaces nested matches. Sibling
    // links never descend: their candidates were fixed by the previous
    // match's position.
    if matches!(
        link.combinator,
        Combinator::Descendant | Combinator::Child
    ) {
        for child in node.children() {
            walk_chain(child, chain, index, depth + 1, last_matched, emit)?;
        }
    }
    ControlFlow::Continue(())
}
