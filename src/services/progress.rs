// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress dashboard aggregation.
//!
//! Everything is recomputed from the week records on each request; the
//! output depends only on the input.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::week::completion_rate;
use crate::models::{
    ProgressData, ProgressDay, ProgressDayAverage, ProgressTotals, ProgressWeek, Week,
};
use crate::time_utils::parse_week_of;

/// Build dashboard statistics from (already deduplicated) weeks.
pub fn build_progress(weeks: &[Week]) -> ProgressData {
    if weeks.is_empty() {
        return ProgressData::default();
    }

    let mut chronological: Vec<&Week> = weeks.iter().collect();
    // Stable: weeks with equal (or unparsable) dates keep input order.
    chronological.sort_by_key(|week| parse_week_of(&week.week_of));

    let progress_weeks: Vec<ProgressWeek> = chronological.into_iter().map(summarize_week).collect();

    let totals = compute_totals(&progress_weeks);
    let day_averages = compute_day_averages(&progress_weeks);
    let highlight_week_id = find_highlight_week(&progress_weeks).map(|w| w.id.clone());
    let latest_week_id = progress_weeks.last().map(|w| w.id.clone());
    let current_streak = trailing_streak(&progress_weeks);

    ProgressData {
        weeks: progress_weeks,
        totals,
        day_averages,
        highlight_week_id,
        latest_week_id,
        current_streak,
    }
}

fn summarize_week(week: &Week) -> ProgressWeek {
    let days: Vec<ProgressDay> = week
        .days
        .iter()
        .map(|day| {
            let counts = day.set_counts();
            ProgressDay {
                id: day.id.clone(),
                name: day.name.clone(),
                short_name: day.short_name.clone(),
                completed: counts.completed,
                total: counts.total,
            }
        })
        .collect();

    let completed: u32 = days.iter().map(|d| d.completed).sum();
    let total: u32 = days.iter().map(|d| d.total).sum();
    let (label, long_label) = week_labels(&week.week_of);

    ProgressWeek {
        id: week.id.clone(),
        week_of: week.week_of.clone(),
        label,
        long_label,
        updated_at: week.updated_at.clone(),
        template_title: week.template_title.clone(),
        status: week.status,
        completed,
        total,
        completion_rate: completion_rate(completed, total),
        days,
    }
}

/// Short and long chart labels for a `weekOf` date.
fn week_labels(week_of: &str) -> (String, String) {
    match parse_week_of(week_of) {
        Some(date) => (
            date.format("%b %-d").to_string(),
            format!("Week of {}", date.format("%b %-d, %Y")),
        ),
        None => (week_of.to_string(), format!("Week of {}", week_of)),
    }
}

fn compute_totals(weeks: &[ProgressWeek]) -> ProgressTotals {
    let mut totals = ProgressTotals {
        week_count: weeks.len() as u32,
        ..ProgressTotals::default()
    };

    for week in weeks {
        totals.completed += week.completed;
        totals.total += week.total;
        totals.day_count += week.days.iter().filter(|d| d.completed > 0).count() as u32;
    }

    totals.average_completion = completion_rate(totals.completed, totals.total);
    totals
}

/// Sum days sharing a position and name across all weeks.
fn compute_day_averages(weeks: &[ProgressWeek]) -> Vec<ProgressDayAverage> {
    let mut buckets: Vec<ProgressDayAverage> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for week in weeks {
        for (index, day) in week.days.iter().enumerate() {
            let key = format!("{}-{}", index, day.name);
            match by_key.get(&key) {
                Some(&slot) => {
                    buckets[slot].completed += day.completed;
                    buckets[slot].total += day.total;
                }
                None => {
                    by_key.insert(key.clone(), buckets.len());
                    buckets.push(ProgressDayAverage {
                        key,
                        label: day.name.clone(),
                        completed: day.completed,
                        total: day.total,
                        completion_rate: 0.0,
                        index,
                    });
                }
            }
        }
    }

    for bucket in &mut buckets {
        bucket.completion_rate = completion_rate(bucket.completed, bucket.total);
    }
    buckets.sort_by_key(|bucket| bucket.index);
    buckets
}

/// Week with the best completion rate; ties go to the latest `weekOf`.
fn find_highlight_week(weeks: &[ProgressWeek]) -> Option<&ProgressWeek> {
    let mut best: Option<(&ProgressWeek, Option<NaiveDate>)> = None;

    for week in weeks {
        let date = parse_week_of(&week.week_of);
        let replace = match best {
            None => true,
            Some((current, current_date)) => {
                week.completion_rate > current.completion_rate
                    || (week.completion_rate == current.completion_rate && date > current_date)
            }
        };
        if replace {
            best = Some((week, date));
        }
    }

    best.map(|(week, _)| week)
}

/// Consecutive most-recent weeks with at least one completed set.
fn trailing_streak(weeks: &[ProgressWeek]) -> u32 {
    weeks
        .iter()
        .rev()
        .take_while(|week| week.completed > 0)
        .count() as u32
}
