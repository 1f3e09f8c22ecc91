// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout plan model for storage and API.
//!
//! A week is an instance of a [`WeekTemplate`] with per-set user input.
//! Set fields are free text: users enter ranges, blanks or notes.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::template::WeekTemplate;

/// Lifecycle state of a stored week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WeekStatus {
    #[default]
    Active,
    Archived,
}

/// How an exercise's effort is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExerciseType {
    #[default]
    Reps,
    Seconds,
}

/// A single logged set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetEntry {
    /// 1-based position within the exercise
    pub set: u32,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub reps_or_sec: String,
    #[serde(default)]
    pub rpe: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseEntry {
    pub name: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub how: String,
    #[serde(rename = "type", default)]
    pub kind: ExerciseType,
    #[serde(default)]
    pub sets: Vec<SetEntry>,
}

/// One workout day. Order within the week is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayEntry {
    pub id: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

/// Stored week record in Firestore.
///
/// Stored at: `weeks/{id}`, scoped to its owner by `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Week {
    /// Document ID
    pub id: String,
    /// Owning user ID
    #[serde(default)]
    pub user_id: String,
    /// Monday of the calendar week (`YYYY-MM-DD`)
    pub week_of: String,
    #[serde(default)]
    pub template_key: String,
    #[serde(default)]
    pub template_title: String,
    #[serde(default)]
    pub template_index: usize,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: WeekStatus,
    /// Creation time (RFC3339); may be missing on legacy records
    #[serde(default)]
    pub created_at: String,
    /// Last save (RFC3339)
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<String>,
    #[serde(default)]
    pub days: Vec<DayEntry>,
}

/// Completed/total set counts for an exercise, day or week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetCounts {
    pub completed: u32,
    pub total: u32,
}

impl SetCounts {
    /// Ratio of completed to total sets; 0 when there are no sets.
    pub fn completion_rate(&self) -> f64 {
        completion_rate(self.completed, self.total)
    }
}

impl std::ops::Add for SetCounts {
    type Output = SetCounts;

    fn add(self, other: SetCounts) -> SetCounts {
        SetCounts {
            completed: self.completed + other.completed,
            total: self.total + other.total,
        }
    }
}

impl std::iter::Sum for SetCounts {
    fn sum<I: Iterator<Item = SetCounts>>(iter: I) -> SetCounts {
        iter.fold(SetCounts::default(), |acc, counts| acc + counts)
    }
}

/// `completed / total`, or exactly 0 when `total` is 0.
pub fn completion_rate(completed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(completed) / f64::from(total)
    }
}

impl ExerciseEntry {
    pub fn set_counts(&self) -> SetCounts {
        SetCounts {
            completed: self.sets.iter().filter(|s| s.done).count() as u32,
            total: self.sets.len() as u32,
        }
    }
}

impl DayEntry {
    pub fn set_counts(&self) -> SetCounts {
        self.exercises.iter().map(ExerciseEntry::set_counts).sum()
    }
}

impl Week {
    /// Build a fresh active week from a template.
    ///
    /// Every set starts blank and not done. Day IDs are prefixed with the
    /// template key so they stay unique across templates.
    pub fn from_template(
        id: String,
        user_id: String,
        template_index: usize,
        template: &WeekTemplate,
        week_of: String,
        now: &str,
    ) -> Self {
        let days = template
            .days
            .iter()
            .map(|day| DayEntry {
                id: format!("{}-{}", template.key, day.id),
                short_name: day.short_name.clone(),
                name: day.name.clone(),
                exercises: day
                    .exercises
                    .iter()
                    .map(|exercise| ExerciseEntry {
                        name: exercise.name.clone(),
                        target: exercise.target.clone(),
                        how: exercise.how.clone(),
                        kind: exercise.kind,
                        sets: blank_sets(exercise.sets),
                    })
                    .collect(),
            })
            .collect();

        Self {
            id,
            user_id,
            week_of,
            template_key: template.key.clone(),
            template_title: template.title.clone(),
            template_index,
            description: template.description.clone(),
            status: WeekStatus::Active,
            created_at: now.to_string(),
            updated_at: now.to_string(),
            archived_at: None,
            days,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.status == WeekStatus::Archived
    }

    pub fn set_counts(&self) -> SetCounts {
        self.days.iter().map(DayEntry::set_counts).sum()
    }
}

fn blank_sets(count: u32) -> Vec<SetEntry> {
    (1..=count)
        .map(|set| SetEntry {
            set,
            ..SetEntry::default()
        })
        .collect()
}
