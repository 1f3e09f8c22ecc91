// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod progress;
pub mod template;
pub mod user;
pub mod week;

pub use progress::{ProgressData, ProgressDay, ProgressDayAverage, ProgressTotals, ProgressWeek};
pub use template::{TemplateSummary, WeekTemplate};
pub use user::{User, UserResponse};
pub use week::{DayEntry, ExerciseEntry, ExerciseType, SetCounts, SetEntry, Week, WeekStatus};
