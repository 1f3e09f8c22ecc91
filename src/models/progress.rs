// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress dashboard aggregates.
//!
//! These are derived from week records on every request and never stored.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::week::WeekStatus;

/// Set counts for one day of one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressDay {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressWeek {
    pub id: String,
    pub week_of: String,
    /// Short chart label, e.g. "Mar 4"
    pub label: String,
    /// e.g. "Week of Mar 4, 2024"
    pub long_label: String,
    pub updated_at: String,
    pub template_title: String,
    pub status: WeekStatus,
    pub completed: u32,
    pub total: u32,
    pub completion_rate: f64,
    pub days: Vec<ProgressDay>,
}

/// Completion summed over every day at the same position (and name).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressDayAverage {
    /// `"{index}-{name}"`
    pub key: String,
    pub label: String,
    pub completed: u32,
    pub total: u32,
    pub completion_rate: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressTotals {
    pub completed: u32,
    pub total: u32,
    pub week_count: u32,
    /// Days with at least one completed set
    pub day_count: u32,
    pub average_completion: f64,
}

/// Everything the progress dashboard renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressData {
    /// Chronological, oldest first
    pub weeks: Vec<ProgressWeek>,
    pub totals: ProgressTotals,
    pub day_averages: Vec<ProgressDayAverage>,
    pub highlight_week_id: Option<String>,
    pub latest_week_id: Option<String>,
    pub current_streak: u32,
}
