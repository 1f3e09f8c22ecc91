// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Week deduplication tests.

use fitmotion_tracker::models::{Week, WeekStatus};
use fitmotion_tracker::services::dedupe_weeks;
use std::collections::HashSet;

mod common;
use common::week_with_sets;

fn stamped(id: &str, week_of: &str, created: &str, updated: &str) -> Week {
    let mut week = week_with_sets(id, week_of, &[true, false]);
    week.created_at = created.to_string();
    week.updated_at = updated.to_string();
    week
}

fn sample() -> Vec<Week> {
    vec![
        stamped("a1", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-05T08:00:00Z"),
        stamped("b1", "2024-03-11", "2024-03-11T08:00:00Z", "2024-03-12T08:00:00Z"),
        stamped("a2", "2024-03-04", "2024-03-04T09:00:00Z", "2024-03-06T08:00:00Z"),
        stamped("c1", "2024-03-18", "2024-03-18T08:00:00Z", "not a date"),
        stamped("b2", "2024-03-11", "2024-03-11T07:00:00Z", "2024-03-12T08:00:00Z"),
    ]
}

fn ids(weeks: &[Week]) -> Vec<&str> {
    weeks.iter().map(|w| w.id.as_str()).collect()
}

#[test]
fn test_idempotent() {
    let once = dedupe_weeks(sample());
    let twice = dedupe_weeks(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_one_record_per_week_of() {
    let input = sample();
    let expected: HashSet<String> = input.iter().map(|w| w.week_of.clone()).collect();

    let output = dedupe_weeks(input);
    let seen: HashSet<String> = output.iter().map(|w| w.week_of.clone()).collect();

    assert_eq!(output.len(), expected.len());
    assert_eq!(seen, expected);
}

#[test]
fn test_winners_and_order() {
    let output = dedupe_weeks(sample());

    // a2 has the later updatedAt; b1/b2 tie on updatedAt so createdAt decides.
    // c1 has an unparsable updatedAt and sorts last.
    assert_eq!(ids(&output), vec!["b1", "a2", "c1"]);
}

#[test]
fn test_active_preferred_over_archived() {
    let mut archived = stamped("old", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-10T08:00:00Z");
    archived.status = WeekStatus::Archived;
    let active = stamped("live", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-05T08:00:00Z");

    for input in [
        vec![archived.clone(), active.clone()],
        vec![active.clone(), archived.clone()],
    ] {
        let output = dedupe_weeks(input);
        assert_eq!(ids(&output), vec!["live"]);
    }
}

#[test]
fn test_archived_duplicates_prefer_latest_update() {
    let mut earlier = stamped("earlier", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-05T08:00:00Z");
    earlier.status = WeekStatus::Archived;
    let mut later = stamped("later", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-09T08:00:00Z");
    later.status = WeekStatus::Archived;

    for input in [
        vec![earlier.clone(), later.clone()],
        vec![later.clone(), earlier.clone()],
    ] {
        let output = dedupe_weeks(input);
        assert_eq!(ids(&output), vec!["later"]);
        assert_eq!(output[0].status, WeekStatus::Archived);
    }
}

#[test]
fn test_recency_regardless_of_order() {
    let older = stamped("older", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-05T08:00:00Z");
    let newer = stamped("newer", "2024-03-04", "2024-03-04T08:00:00Z", "2024-03-07T08:00:00Z");

    assert_eq!(
        ids(&dedupe_weeks(vec![older.clone(), newer.clone()])),
        vec!["newer"]
    );
    assert_eq!(ids(&dedupe_weeks(vec![newer, older])), vec!["newer"]);
}

#[test]
fn test_empty_input() {
    assert!(dedupe_weeks(Vec::new()).is_empty());
}
