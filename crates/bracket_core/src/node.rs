//! Bracket tree nodes and how they are addressed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FieldSizeError, PathParseError};
use crate::participant::{Participant, ParticipantId, Round};

/// Number of seed slots in a bracket. Always a power of two, at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FieldSize(u32);

impl FieldSize {
    /// The field size of the reference deployment
    pub const EIGHT: FieldSize = FieldSize(8);

    pub fn new(size: u32) -> Result<Self, FieldSizeError> {
        if size < 2 || !size.is_power_of_two() {
            return Err(FieldSizeError(size));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Round number of the final, `log2(size)`
    pub fn rounds(self) -> Round {
        self.0.trailing_zeros()
    }

    /// How many participants can still be in the bracket after winning `round`
    pub fn winners_of_round(self, round: Round) -> u32 {
        self.0.checked_shr(round).unwrap_or(0)
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::EIGHT
    }
}

impl TryFrom<u32> for FieldSize {
    type Error = FieldSizeError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<FieldSize> for u32 {
    fn from(field: FieldSize) -> u32 {
        field.0
    }
}

impl fmt::Display for FieldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which branch of a match a subtree hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchPosition {
    /// Lower seeds, rendered on top
    Upper,
    /// Higher seeds
    Lower,
}

impl BranchPosition {
    pub fn other(self) -> BranchPosition {
        match self {
            BranchPosition::Upper => BranchPosition::Lower,
            BranchPosition::Lower => BranchPosition::Upper,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BranchPosition::Upper => 'U',
            BranchPosition::Lower => 'L',
        }
    }
}

/// Address of a node: the branches taken from the root.
///
/// The empty path is the root. Textual form is `root` or a run of `U`/`L`,
/// optionally separated by dots (`U.L.L`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BranchPath(Vec<BranchPosition>);

impl BranchPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn positions(&self) -> &[BranchPosition] {
        &self.0
    }

    pub fn child(&self, position: BranchPosition) -> Self {
        let mut positions = self.0.clone();
        positions.push(position);
        Self(positions)
    }

    /// Seed slot of the leaf this path reaches in a full bracket
    pub fn slot_index(&self) -> u32 {
        self.0.iter().fold(0, |index, position| {
            (index << 1)
                | match position {
                    BranchPosition::Upper => 0,
                    BranchPosition::Lower => 1,
                }
        })
    }

    /// The parent path and the branch this node occupies in it
    pub fn parent(&self) -> Option<(BranchPath, BranchPosition)> {
        let (last, rest) = self.0.split_last()?;
        Some((Self(rest.to_vec()), *last))
    }
}

impl From<Vec<BranchPosition>> for BranchPath {
    fn from(positions: Vec<BranchPosition>) -> Self {
        Self(positions)
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        for position in &self.0 {
            write!(f, "{}", position.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for BranchPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("root") || trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut positions = Vec::with_capacity(trimmed.len());
        for c in trimmed.chars() {
            match c.to_ascii_uppercase() {
                'U' => positions.push(BranchPosition::Upper),
                'L' => positions.push(BranchPosition::Lower),
                '.' | '/' => {}
                other => return Err(PathParseError(other)),
            }
        }
        Ok(Self(positions))
    }
}

/// One node of a bracket.
///
/// A leaf is a seed slot holding at most one participant. A match has an
/// upper and a lower branch and, once played, the participant who won it.
/// A decided match is locked: nothing below it may change until reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BracketNode {
    Leaf {
        occupant: Option<Participant>,
    },
    Match {
        decided: Option<Participant>,
        upper: Box<BracketNode>,
        lower: Box<BracketNode>,
    },
}

impl BracketNode {
    pub fn empty_leaf() -> Self {
        BracketNode::Leaf { occupant: None }
    }

    pub fn leaf(participant: Participant) -> Self {
        BracketNode::Leaf {
            occupant: Some(participant),
        }
    }

    pub fn new_match(
        decided: Option<Participant>,
        upper: BracketNode,
        lower: BracketNode,
    ) -> Self {
        BracketNode::Match {
            decided,
            upper: Box::new(upper),
            lower: Box::new(lower),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BracketNode::Leaf { .. })
    }

    /// A match whose winner is recorded
    pub fn is_locked(&self) -> bool {
        matches!(self, BracketNode::Match { decided: Some(_), .. })
    }

    /// The recorded winner of this match; always `None` for a leaf
    pub fn decided(&self) -> Option<&Participant> {
        match self {
            BracketNode::Leaf { .. } => None,
            BracketNode::Match { decided, .. } => decided.as_ref(),
        }
    }

    /// Who comes out of this node: a leaf's occupant or a match's winner
    pub fn winner(&self) -> Option<&Participant> {
        match self {
            BracketNode::Leaf { occupant } => occupant.as_ref(),
            BracketNode::Match { decided, .. } => decided.as_ref(),
        }
    }

    pub fn branch(&self, position: BranchPosition) -> Option<&BracketNode> {
        match self {
            BracketNode::Leaf { .. } => None,
            BracketNode::Match { upper, lower, .. } => Some(match position {
                BranchPosition::Upper => upper.as_ref(),
                BranchPosition::Lower => lower.as_ref(),
            }),
        }
    }

    pub fn branches(&self) -> Option<(&BracketNode, &BracketNode)> {
        match self {
            BracketNode::Leaf { .. } => None,
            BracketNode::Match { upper, lower, .. } => Some((upper.as_ref(), lower.as_ref())),
        }
    }

    /// Number of match levels below and including this node
    pub fn height(&self) -> Round {
        match self {
            BracketNode::Leaf { .. } => 0,
            BracketNode::Match { upper, lower, .. } => 1 + upper.height().max(lower.height()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            BracketNode::Leaf { .. } => 1,
            BracketNode::Match { upper, lower, .. } => upper.leaf_count() + lower.leaf_count(),
        }
    }

    pub fn node_at(&self, path: &BranchPath) -> Option<&BracketNode> {
        path.positions()
            .iter()
            .try_fold(self, |node, &position| node.branch(position))
    }

    /// Leaf occupants in seed order
    pub fn occupants(&self) -> Vec<&Participant> {
        let mut out = Vec::new();
        self.collect_occupants(&mut out);
        out
    }

    fn collect_occupants<'a>(&'a self, out: &mut Vec<&'a Participant>) {
        match self {
            BracketNode::Leaf { occupant } => out.extend(occupant.as_ref()),
            BracketNode::Match { upper, lower, .. } => {
                upper.collect_occupants(out);
                lower.collect_occupants(out);
            }
        }
    }

    /// Every seed slot in order, empty ones included
    pub fn slots(&self) -> Vec<Option<&Participant>> {
        match self {
            BracketNode::Leaf { occupant } => vec![occupant.as_ref()],
            BracketNode::Match { upper, lower, .. } => {
                let mut slots = upper.slots();
                slots.extend(lower.slots());
                slots
            }
        }
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.occupants().iter().any(|p| p.id == id)
    }

    /// Copy of this node with `participant` as its winner (or occupant)
    pub fn with_winner(&self, participant: Participant) -> BracketNode {
        match self {
            BracketNode::Leaf { .. } => BracketNode::leaf(participant),
            BracketNode::Match { upper, lower, .. } => BracketNode::Match {
                decided: Some(participant),
                upper: upper.clone(),
                lower: lower.clone(),
            },
        }
    }

    /// Copy of this subtree with every match decision removed.
    /// Seeding is kept.
    pub fn cleared(&self) -> BracketNode {
        match self {
            BracketNode::Leaf { .. } => self.clone(),
            BracketNode::Match { upper, lower, .. } => {
                BracketNode::new_match(None, upper.cleared(), lower.cleared())
            }
        }
    }
}

/// Identity of one match: its round and the seed range feeding it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchKey {
    pub round: Round,
    pub first_seed: u32,
    pub last_seed: u32,
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {} [{}..={}]",
            self.round, self.first_seed, self.last_seed
        )
    }
}
