//! Attribute and pseudo-class evaluation.
//!
//! Predicates never fail: a missing or non-string field, or a pseudo-class
//! asked of a node it cannot apply to, simply evaluates to "no match".

use crate::matcher::walk_chain;
use crate::query::{Attribute, AttributeOperator, Pseudo, Selector, SelectorOption, SimpleSelector};
use astq_tree::NodeRef;
use std::ops::ControlFlow;

/// Whether `node` satisfies one link of a selector chain: the name is
/// empty, `*`, or equal to the node's short type name, and every option
/// holds.
pub(crate) fn is_match(node: NodeRef<'_>, link: &SimpleSelector) -> bool {
    if !link.name.is_empty() && link.name != "*" && link.name != node.name() {
        return false;
    }
    link.options.iter().all(|option| match option {
        SelectorOption::Attribute(attr) => attribute_matches(node, attr),
        SelectorOption::Pseudo(pseudo) => pseudo_matches(node, &pseudo.kind),
    })
}

fn attribute_matches(node: NodeRef<'_>, attr: &Attribute) -> bool {
    let value = match node.attr(&attr.name) {
        Some(value) => value,
        None => return false,
    };
    match (attr.operator, attr.value.as_deref()) {
        (AttributeOperator::Present, _) => true,
        (AttributeOperator::Equals, Some(operand)) => value == operand,
        (AttributeOperator::Includes, Some(operand)) => {
            value.split_whitespace().any(|word| word == operand)
        }
        // Intentionally looser than the CSS dash-match: any occurrence of
        // `operand-` counts, not just a leading one.
        (AttributeOperator::DashMatch, Some(operand)) => {
            value.contains(&format!("{operand}-"))
        }
        (AttributeOperator::Prefix, Some(operand)) => value.starts_with(operand),
        (AttributeOperator::Suffix, Some(operand)) => value.ends_with(operand),
        (AttributeOperator::Substring, Some(operand)) => value.contains(operand),
        (_, None) => false,
    }
}

fn pseudo_matches(node: NodeRef<'_>, pseudo: &Pseudo) -> bool {
    match pseudo {
        Pseudo::Empty => node.children().all(|child| child.is_comment()),
        Pseudo::FirstChild => node.index() == Some(0),
        Pseudo::LastChild => match (node.parent(), node.index()) {
            (Some(parent), Some(index)) => index + 1 == parent.child_count(),
            _ => false,
        },
        Pseudo::FirstOfType => {
            same_type_siblings(node).is_some_and(|run| run.first() == Some(&node))
        }
        Pseudo::LastOfType => {
            same_type_siblings(node).is_some_and(|run| run.last() == Some(&node))
        }
        Pseudo::Root => node.is_root(),
        Pseudo::Has(selectors) => has_matches(node, selectors),
        Pseudo::Is(selectors) => head_matches(node, selectors),
        Pseudo::Not(selectors) => !head_matches(node, selectors),
    }
}

/// The parent's children restricted to this node's type, in order.
/// `None` at the root, where no sibling run exists.
fn same_type_siblings<'t>(node: NodeRef<'t>) -> Option<Vec<NodeRef<'t>>> {
    let parent = node.parent()?;
    Some(
        parent
            .children()
            .filter(|sibling| sibling.type_name() == node.type_name())
            .collect(),
    )
}

/// `:has` — evaluates each selector with `node` as the traversal root.
/// Children enter at depth 1 with the last matched depth pinned to 0, so a
/// leading child combinator reaches immediate children only.
fn has_matches(node: NodeRef<'_>, selectors: &[Selector]) -> bool {
    selectors.iter().any(|selector| {
        if selector.simple_selectors.is_empty() {
            return false;
        }
        node.children().any(|child| {
            walk_chain(
                child,
                &selector.simple_selectors,
                0,
                1,
                0,
                &mut |_| ControlFlow::Break(()),
            )
            .is_break()
        })
    })
}

/// `:is`/`:not` — head-only evaluation: only each selector's first link is
/// tested against the node; combinators and later links are ignored.
fn head_matches(node: NodeRef<'_>, selectors: &[Selector]) -> bool {
    selectors.iter().any(|selector| {
        selector
            .simple_selectors
            .first()
            .is_some_and(|head| is_match(node, head))
    })
}
