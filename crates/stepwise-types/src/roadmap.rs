use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Unique identifier for a roadmap.
///
/// Derived at creation time from the slugified topic plus the RFC 3339
/// creation timestamp (e.g. `learn-rust-2026-08-06T12:00:00Z`), so ids are
/// stable, human-readable, and unique per generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoadmapId(String);

impl RoadmapId {
    /// Derive an id from a topic and its creation timestamp.
    pub fn derive(topic: &str, created_at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}-{}",
            slugify(topic),
            created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoadmapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RoadmapId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RoadmapId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A recommended external reference for a step.
///
/// The model is asked to name real resources, but nothing here is
/// validated: missing fields deserialize to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// One unit of a roadmap: a title, description, linked resource, and
/// completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Unique within the roadmap. Model-assigned when present, otherwise
    /// synthesized as `step-<1-based position>` during normalization.
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub resource: Resource,
    /// The only field mutated by ordinary user interaction outside
    /// regeneration. Defaults false on creation.
    #[serde(default)]
    pub completed: bool,
}

/// The top-level learning plan entity: topic + ordered steps + metadata.
///
/// Step ordering comes verbatim from the model response and is never
/// re-sorted. `created_at` is immutable after creation; Customize replaces
/// `topic` and `steps` in place but preserves `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: RoadmapId,
    pub topic: String,
    pub steps: Vec<Step>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Roadmap {
    /// Rounded integer percentage of completed steps. Zero steps yield 0.
    pub fn progress(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }
        let completed = self.completed_count() as f64;
        let total = self.steps.len() as f64;
        (completed / total * 100.0).round() as u8
    }

    /// Number of steps marked completed.
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Flip the completion flag of the step with the given id.
    ///
    /// Returns the new flag value, or `None` if no step matches.
    pub fn toggle_step(&mut self, step_id: &str) -> Option<bool> {
        let step = self.steps.iter_mut().find(|s| s.id == step_id)?;
        step.completed = !step.completed;
        Some(step.completed)
    }
}

/// Generate a URL-safe slug from a topic.
///
/// Rules:
/// - Lowercase
/// - Replace non-alphanumeric characters with hyphens
/// - Collapse consecutive hyphens into one
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use stepwise_types::roadmap::slugify;
///
/// assert_eq!(slugify("Learn Rust"), "learn-rust");
/// assert_eq!(slugify("Digital  Marketing!"), "digital-marketing");
/// ```
pub fn slugify(topic: &str) -> String {
    let raw: String = topic
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens and trim edges
    let mut result = String::with_capacity(raw.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in raw.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        } else {
            result.push(c);
            prev_was_hyphen = false;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
