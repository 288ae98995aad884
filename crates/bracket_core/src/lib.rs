//! Single-elimination bracket core
//!
//! This crate provides the bracket tree used to record tournament standings:
//! - Building a tree from a flat list of seeded participants
//! - Recording match results node by node, propagating each change up to the root
//! - Flattening the tree back into standings (seed and furthest round) for saving
//!
//! # Rounds
//!
//! For a field of `2^R` participants the final is round `R` and the first
//! round of matches is round 1. Leaves are seed slots, not matches.
//!
//! ```text
//! Final (round 2)        H1
//!   Round 1              H1            H3
//!   Slots             H1    H2      H3    H4
//! ```

pub mod bracket;
pub mod builder;
pub mod coordinator;
pub mod editor;
pub mod error;
pub mod flatten;
pub mod node;
pub mod participant;
pub mod render;
pub mod validate;

pub use bracket::Bracket;
pub use builder::build;
pub use coordinator::{merge, propagate, replace_branch, ChangeEvent};
pub use editor::BracketEditor;
pub use error::*;
pub use flatten::flatten;
pub use node::*;
pub use participant::*;
pub use validate::{check_compatibility, validate_standings, validate_tree};
