//! Bottom-up propagation of edits through the bracket.
//!
//! Subtrees are values. When a node changes it hands its new value to its
//! parent as a [`ChangeEvent`]; the parent builds a new version of itself
//! with that branch swapped in and passes itself up in turn, until the root
//! is reached. Nothing holds a reference into another node's subtree, and a
//! failed merge anywhere abandons the whole chain without touching the
//! tree it was given.

use tracing::{debug, trace};

use crate::error::PropagationError;
use crate::node::{BracketNode, BranchPath, BranchPosition};

/// Emitted by a node to its parent after its own subtree changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The new value of the node that changed
    pub updated: BracketNode,
    /// Which branch of the parent that node is
    pub position: BranchPosition,
}

impl ChangeEvent {
    pub fn new(updated: BracketNode, position: BranchPosition) -> Self {
        Self { updated, position }
    }
}

/// A copy of `node` with its `position` branch replaced by `new_subtree`.
///
/// The other branch is carried over unchanged, as is the node's own decision.
pub fn replace_branch(
    node: &BracketNode,
    position: BranchPosition,
    new_subtree: BracketNode,
) -> Result<BracketNode, PropagationError> {
    match node {
        BracketNode::Leaf { .. } => Err(PropagationError::NoBranches { position }),
        BracketNode::Match {
            decided,
            upper,
            lower,
        } => {
            let (upper, lower) = match position {
                BranchPosition::Upper => (new_subtree, lower.as_ref().clone()),
                BranchPosition::Lower => (upper.as_ref().clone(), new_subtree),
            };
            Ok(BracketNode::new_match(decided.clone(), upper, lower))
        }
    }
}

/// Merge a child's change event into its parent
pub fn merge(parent: &BracketNode, event: ChangeEvent) -> Result<BracketNode, PropagationError> {
    replace_branch(parent, event.position, event.updated)
}

/// Install `updated` at `path` and carry the change up to the root.
///
/// Returns the new root. `root` itself is never modified.
pub fn propagate(
    root: &BracketNode,
    path: &BranchPath,
    updated: BracketNode,
) -> Result<BracketNode, PropagationError> {
    let ancestors = ancestor_chain(root, path)?;

    let mut current = updated;
    for (ancestor, &position) in ancestors.iter().zip(path.positions()).rev() {
        let event = ChangeEvent::new(current, position);
        trace!(?position, "merging change into parent");
        current = merge(ancestor, event)?;
    }

    debug!(%path, "propagated change to root");
    Ok(current)
}

/// Every node strictly above `path`, root first
fn ancestor_chain<'a>(
    root: &'a BracketNode,
    path: &BranchPath,
) -> Result<Vec<&'a BracketNode>, PropagationError> {
    let mut chain = Vec::with_capacity(path.depth());
    let mut node = root;
    for &position in path.positions() {
        chain.push(node);
        node = node
            .branch(position)
            .ok_or_else(|| PropagationError::PathOutsideTree(path.clone()))?;
    }
    Ok(chain)
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
