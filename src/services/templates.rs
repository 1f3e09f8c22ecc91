// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Week template catalog loading and rotation.

use crate::models::template::{TemplateSummary, WeekTemplate};
use std::fs;
use std::path::Path;

/// The ordered set of week templates new weeks are built from.
#[derive(Default, Clone)]
pub struct TemplateCatalog {
    templates: Vec<WeekTemplate>,
}

impl TemplateCatalog {
    /// Load templates from a JSON file (an array of templates).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| TemplateError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load templates from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, TemplateError> {
        let templates: Vec<WeekTemplate> =
            serde_json::from_str(json_data).map_err(|e| TemplateError::ParseError(e.to_string()))?;
        Self::from_templates(templates)
    }

    /// Build a catalog from already-parsed templates.
    pub fn from_templates(templates: Vec<WeekTemplate>) -> Result<Self, TemplateError> {
        if templates.is_empty() {
            return Err(TemplateError::Empty);
        }

        for template in &templates {
            if let Some(exercise) = template
                .days
                .iter()
                .flat_map(|day| day.exercises.iter())
                .find(|exercise| exercise.sets == 0)
            {
                return Err(TemplateError::Invalid(format!(
                    "exercise '{}' in template '{}' has no sets",
                    exercise.name, template.key
                )));
            }
        }

        tracing::info!(count = templates.len(), "Loaded week templates");
        Ok(Self { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template at `index`, falling back to the first one when out of range.
    ///
    /// Returns `None` only for an empty catalog.
    pub fn get(&self, index: usize) -> Option<&WeekTemplate> {
        self.templates.get(index).or_else(|| self.templates.first())
    }

    /// The template that follows `current` in rotation.
    pub fn next_template_index(&self, current: usize) -> usize {
        if self.templates.is_empty() {
            return 0;
        }
        (current + 1) % self.templates.len()
    }

    /// Summaries for the template picker.
    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates
            .iter()
            .enumerate()
            .map(|(index, t)| TemplateSummary {
                index,
                key: t.key.clone(),
                title: t.title.clone(),
                description: t.description.clone(),
            })
            .collect()
    }
}

/// Errors from template loading.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse templates: {0}")]
    ParseError(String),

    #[error("Template catalog is empty")]
    Empty,

    #[error("Invalid template: {0}")]
    Invalid(String),
}
