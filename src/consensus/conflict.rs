//! Temporal conflict grouping of candidate signals.

use crate::models::{ConflictGroup, Signal};

/// Result of partitioning candidates into conflict groups and untouched
/// pass-through signals.
#[derive(Debug, Clone, Default)]
pub struct ConflictPartition {
    pub groups: Vec<ConflictGroup>,
    pub standalone: Vec<Signal>,
}

/// Group same-instrument, opposing-action signals occurring within
/// `window_seconds` of each other.
///
/// Single-pass greedy anchor scan over the timestamp-sorted candidates: the
/// earliest unprocessed signal anchors a group and absorbs every later
/// unprocessed signal for the same instrument whose action differs and whose
/// timestamp lies within the window *of the anchor*. Membership is
/// anchor-relative, not transitive: two absorbed signals may be further apart
/// than the window themselves.
pub fn group_conflicts(signals: Vec<Signal>, window_seconds: i64) -> ConflictPartition {
    let mut sorted = signals;
    sorted.sort_by_key(|s| s.timestamp);

    let mut processed = vec![false; sorted.len()];
    let mut partition = ConflictPartition::default();

    for i in 0..sorted.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let mut members = vec![i];
        for j in (i + 1)..sorted.len() {
            if processed[j] {
                continue;
            }
            let within_window =
                (sorted[j].timestamp - sorted[i].timestamp).num_seconds().abs() <= window_seconds;
            if within_window
                && sorted[j].symbol == sorted[i].symbol
                && sorted[j].action.opposes(sorted[i].action)
            {
                members.push(j);
                processed[j] = true;
            }
        }

        if members.len() >= 2 {
            partition.groups.push(ConflictGroup {
                symbol: sorted[i].symbol.clone(),
                signals: members.iter().map(|&idx| sorted[idx].clone()).collect(),
            });
        } else {
            partition.standalone.push(sorted[i].clone());
        }
    }

    partition
}
