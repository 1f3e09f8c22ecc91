// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Collapse duplicate week records that share a `weekOf`.
//!
//! Retried writes or two concurrent "start new week" requests can leave more
//! than one record for the same calendar week. Views pick one canonical
//! record per week instead of relying on a uniqueness constraint in the
//! store.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::Week;
use crate::time_utils::parse_timestamp;

/// Keep one record per distinct `weekOf`, newest first.
pub fn dedupe_weeks(weeks: Vec<Week>) -> Vec<Week> {
    let mut canonical: HashMap<String, Week> = HashMap::with_capacity(weeks.len());

    for week in weeks {
        match canonical.get_mut(&week.week_of) {
            Some(best) => {
                if candidate_wins(best, &week) {
                    tracing::debug!(
                        week_of = %week.week_of,
                        kept = %week.id,
                        dropped = %best.id,
                        "Replacing duplicate week record"
                    );
                    *best = week;
                }
            }
            None => {
                canonical.insert(week.week_of.clone(), week);
            }
        }
    }

    let mut deduped: Vec<Week> = canonical.into_values().collect();
    deduped.sort_by(newest_first);
    deduped
}

/// Whether `candidate` replaces `best`: active beats archived, then the later
/// `updatedAt`, then the later `createdAt`. Full ties go to `candidate`.
pub fn candidate_wins(best: &Week, candidate: &Week) -> bool {
    if best.is_archived() != candidate.is_archived() {
        return !candidate.is_archived();
    }

    for (best_ts, candidate_ts) in [
        (&best.updated_at, &candidate.updated_at),
        (&best.created_at, &candidate.created_at),
    ] {
        match compare_timestamps(candidate_ts, best_ts) {
            Some(Ordering::Greater) => return true,
            Some(Ordering::Less) => return false,
            Some(Ordering::Equal) | None => {}
        }
    }

    true
}

/// Compare two stored timestamps; `None` if either does not parse.
fn compare_timestamps(a: &str, b: &str) -> Option<Ordering> {
    Some(parse_timestamp(a)?.cmp(&parse_timestamp(b)?))
}

/// Descending order with unparsable timestamps after all parsable ones.
fn newest_first(a: &Week, b: &Week) -> Ordering {
    parse_timestamp(&b.updated_at)
        .cmp(&parse_timestamp(&a.updated_at))
        .then_with(|| parse_timestamp(&b.created_at).cmp(&parse_timestamp(&a.created_at)))
        .then_with(|| b.week_of.cmp(&a.week_of))
}
