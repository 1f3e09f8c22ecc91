// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Week template model (the plan a new week is built from).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::week::ExerciseType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    pub name: String,
    pub target: String,
    pub how: String,
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    /// Number of sets to create
    pub sets: u32,
    #[serde(default)]
    pub suggested_weight: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDay {
    pub id: String,
    pub short_name: String,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

/// A named weekly plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekTemplate {
    pub key: String,
    pub title: String,
    pub description: String,
    pub days: Vec<TemplateDay>,
}

/// Summary of a template for API responses.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TemplateSummary {
    pub index: usize,
    pub key: String,
    pub title: String,
    pub description: String,
}
