//! Text renderings of a bracket

use crate::bracket::Bracket;
use crate::node::{BracketNode, BranchPath, BranchPosition};
use crate::participant::Round;

/// One-line form: `winner:{upper, lower}` per match, `-` where nobody is set.
///
/// ```text
/// H1:{H1:{H1, H2}, H3:{H3, H4}}
/// ```
pub fn compact(root: &BracketNode) -> String {
    let name = |node: &BracketNode| {
        node.winner()
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    match root.branches() {
        None => name(root),
        Some((upper, lower)) => {
            format!("{}:{{{}, {}}}", name(root), compact(upper), compact(lower))
        }
    }
}

/// Indented listing, one node per line, with the path that addresses it.
/// Decided matches are marked `[locked]`.
pub fn outline(bracket: &Bracket) -> String {
    let mut out = String::new();
    let mut slot = 0;
    outline_node(
        bracket.root(),
        &BranchPath::root(),
        bracket.root_round(),
        bracket.root_round(),
        &mut slot,
        &mut out,
    );
    out
}

fn outline_node(
    node: &BracketNode,
    path: &BranchPath,
    round: Round,
    final_round: Round,
    slot: &mut u32,
    out: &mut String,
) {
    let indent = "  ".repeat(path.depth());
    let who = node
        .winner()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    match node.branches() {
        None => {
            out.push_str(&format!("{}Slot {} [{}] {}\n", indent, slot, path, who));
            *slot += 1;
        }
        Some((upper, lower)) => {
            let lock = if node.is_locked() { " [locked]" } else { "" };
            out.push_str(&format!(
                "{}{} [{}] {}{}\n",
                indent,
                round_label(round, final_round),
                path,
                who,
                lock
            ));
            let below = round.saturating_sub(1);
            outline_node(upper, &path.child(BranchPosition::Upper), below, final_round, slot, out);
            outline_node(lower, &path.child(BranchPosition::Lower), below, final_round, slot, out);
        }
    }
}

pub fn round_label(round: Round, final_round: Round) -> String {
    if round == final_round {
        "Final".to_string()
    } else if round + 1 == final_round && round > 1 {
        "Semifinal".to_string()
    } else {
        format!("Round {}", round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Participant;
    use chrono::NaiveDate;

    fn horse(id: i64, name: &str, seed: u32) -> Participant {
        let born = NaiveDate::from_ymd_opt(2018, 4, 1).unwrap_or_default();
        Participant::new(id, name, born).with_seed(seed)
    }

    #[test]
    fn test_compact_marks_empty_slots() {
        let root = BracketNode::new_match(
            None,
            BracketNode::leaf(horse(1, "H1", 0)),
            BracketNode::empty_leaf(),
        );
        assert_eq!(compact(&root), "-:{H1, -}");
    }

    #[test]
    fn test_round_labels() {
        assert_eq!(round_label(3, 3), "Final");
        assert_eq!(round_label(2, 3), "Semifinal");
        assert_eq!(round_label(1, 3), "Round 1");
        assert_eq!(round_label(1, 2), "Round 1");
    }
}
