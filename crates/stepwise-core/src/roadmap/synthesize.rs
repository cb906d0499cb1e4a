//! Roadmap synthesis: one request/response cycle against the completion
//! endpoint, turned into a validated [`Roadmap`] or a typed failure.
//!
//! The pipeline is: provider call -> JSON span extraction -> lenient parse
//! into draft structs -> step-id normalization -> completion reconciliation
//! -> assembly. No retry, no streaming, no partial success: any failure
//! aborts the whole operation and leaves the caller's state untouched.

use std::collections::HashSet;

use chrono::Utc;
use serde::Deserialize;

use stepwise_types::error::GenerationError;
use stepwise_types::roadmap::{Resource, Roadmap, RoadmapId, Step};

use crate::llm::TextGenerator;
use crate::roadmap::extract::extract_json_object;
use crate::roadmap::prompt::{build_customize_prompt, build_generate_prompt};

/// How a synthesized roadmap relates to prior state.
#[derive(Debug, Clone, Copy)]
pub enum SynthesisMode<'a> {
    /// A fresh roadmap for `topic`: every step starts incomplete, and the
    /// roadmap id is derived from the topic plus a fresh timestamp.
    Generate { topic: &'a str },
    /// An in-place replacement of `previous`: id and creation timestamp
    /// are preserved, and completion flags are copied over by step id.
    Customize { previous: &'a Roadmap },
}

/// What the model is expected to return, parsed leniently.
///
/// Every field defaults: step content is accepted as-is without
/// validation, so a reply with `steps: []` or steps missing their
/// `resource` still synthesizes. Any `completed` flag the model echoes is
/// ignored entirely -- reconciliation decides completion.
#[derive(Debug, Deserialize)]
struct RoadmapDraft {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    steps: Vec<StepDraft>,
}

#[derive(Debug, Deserialize)]
struct StepDraft {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    resource: Resource,
}

/// Drives one request/response cycle against a [`TextGenerator`].
///
/// Each call is a pure function of (prompt, mode, previous); the
/// synthesizer holds no mutable state. Re-entrancy guarding is the
/// responsibility of the calling service.
pub struct Synthesizer<P> {
    provider: P,
}

impl<P: TextGenerator> Synthesizer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Generate a fresh roadmap for a topic.
    pub async fn generate(&self, topic: &str) -> Result<Roadmap, GenerationError> {
        let prompt = build_generate_prompt(topic);
        self.synthesize(&prompt, SynthesisMode::Generate { topic }).await
    }

    /// Customize an existing roadmap according to a free-text instruction.
    pub async fn customize(
        &self,
        previous: &Roadmap,
        instruction: &str,
    ) -> Result<Roadmap, GenerationError> {
        let prompt = build_customize_prompt(previous, instruction);
        self.synthesize(&prompt, SynthesisMode::Customize { previous }).await
    }

    /// Run the full pipeline for an already-built prompt.
    pub async fn synthesize(
        &self,
        prompt: &str,
        mode: SynthesisMode<'_>,
    ) -> Result<Roadmap, GenerationError> {
        tracing::debug!(provider = self.provider.name(), "requesting completion");
        let raw = self.provider.generate(prompt).await?;

        let span = extract_json_object(&raw).ok_or(GenerationError::NoJsonFound)?;

        let draft: RoadmapDraft = serde_json::from_str(span)
            .map_err(|e| GenerationError::MalformedJson(e.to_string()))?;

        let roadmap = assemble(draft, &mode);
        tracing::debug!(
            topic = %roadmap.topic,
            steps = roadmap.steps.len(),
            "synthesized roadmap"
        );
        Ok(roadmap)
    }
}

/// Normalize step ids, reconcile completion, and assemble the result.
fn assemble(draft: RoadmapDraft, mode: &SynthesisMode<'_>) -> Roadmap {
    let mut seen: HashSet<String> = HashSet::with_capacity(draft.steps.len());
    let steps: Vec<Step> = draft
        .steps
        .into_iter()
        .enumerate()
        .map(|(position, step)| {
            let id = unique_step_id(step.id.as_deref(), position, &seen);
            seen.insert(id.clone());

            // Generate forces incomplete regardless of what the model
            // echoed; Customize copies the flag from the matching prior
            // step, defaulting to incomplete for new/unmatched ids.
            let completed = match mode {
                SynthesisMode::Generate { .. } => false,
                SynthesisMode::Customize { previous } => previous
                    .steps
                    .iter()
                    .find(|prior| prior.id == id)
                    .is_some_and(|prior| prior.completed),
            };

            Step {
                id,
                title: step.title,
                description: step.description,
                resource: step.resource,
                completed,
            }
        })
        .collect();

    match mode {
        SynthesisMode::Generate { topic } => {
            let created_at = Utc::now();
            Roadmap {
                id: RoadmapId::derive(topic, created_at),
                topic: draft.topic,
                steps,
                created_at,
            }
        }
        SynthesisMode::Customize { previous } => Roadmap {
            id: previous.id.clone(),
            topic: draft.topic,
            steps,
            created_at: previous.created_at,
        },
    }
}

/// Pick a step id that is unique within the roadmap.
///
/// The model id wins when present, non-empty, and unused. Otherwise the
/// positional `step-<k>` id applies, suffixed if a model-assigned id
/// already claimed it. A renamed duplicate intentionally fails to match
/// any prior step during reconciliation.
fn unique_step_id(model_id: Option<&str>, position: usize, seen: &HashSet<String>) -> String {
    let positional = format!("step-{}", position + 1);

    if let Some(id) = model_id
        && !id.is_empty()
        && !seen.contains(id)
    {
        return id.to_string();
    }

    if !seen.contains(&positional) {
        return positional;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{positional}-{n}");
        if !seen.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stepwise_types::error::LlmError;

    /// Replays a fixed reply, recording nothing.
    struct CannedProvider {
        reply: String,
    }

    impl CannedProvider {
        fn new(reply: impl Into<String>) -> Self {
            Self { reply: reply.into() }
        }
    }

    impl TextGenerator for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingProvider;

    impl TextGenerator for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Provider {
                message: "HTTP 500: internal error".to_string(),
            })
        }
    }

    fn previous_roadmap() -> Roadmap {
        let created_at = Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap();
        Roadmap {
            id: RoadmapId::derive("Learn Rust", created_at),
            topic: "Learn Rust".to_string(),
            steps: vec![
                Step {
                    id: "step-1".to_string(),
                    title: "Install".to_string(),
                    description: "rustup".to_string(),
                    resource: Resource::default(),
                    completed: false,
                },
                Step {
                    id: "step-3".to_string(),
                    title: "Ownership".to_string(),
                    description: "borrowck".to_string(),
                    resource: Resource::default(),
                    completed: true,
                },
            ],
            created_at,
        }
    }

    #[tokio::test]
    async fn test_generate_returns_all_steps_incomplete() {
        // The model echoes completed: true; Generate must force false.
        let reply = r#"{
            "topic": "Learn Rust",
            "steps": [
                {"id": "step-1", "title": "Install", "description": "rustup", "completed": true},
                {"id": "step-2", "title": "Basics", "description": "syntax", "completed": true},
                {"id": "step-3", "title": "Ownership", "description": "borrowck"}
            ]
        }"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.generate("Learn Rust").await.unwrap();

        assert_eq!(roadmap.steps.len(), 3);
        assert!(roadmap.steps.iter().all(|s| !s.completed));
        assert_eq!(roadmap.topic, "Learn Rust");
    }

    #[tokio::test]
    async fn test_generate_fills_missing_and_empty_ids() {
        let reply = r#"{
            "topic": "Piano",
            "steps": [
                {"id": "scales", "title": "Scales", "description": ""},
                {"title": "Chords", "description": ""},
                {"id": "", "title": "Arpeggios", "description": ""}
            ]
        }"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.generate("Piano").await.unwrap();

        let ids: Vec<&str> = roadmap.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["scales", "step-2", "step-3"]);
    }

    #[tokio::test]
    async fn test_generate_disambiguates_duplicate_ids() {
        let reply = r#"{
            "topic": "Go",
            "steps": [
                {"id": "step-1", "title": "A", "description": ""},
                {"id": "step-1", "title": "B", "description": ""}
            ]
        }"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.generate("Go").await.unwrap();

        assert_eq!(roadmap.steps[0].id, "step-1");
        assert_eq!(roadmap.steps[1].id, "step-2");
    }

    #[tokio::test]
    async fn test_generate_derives_id_from_topic() {
        let reply = r#"{"topic": "Learn Rust", "steps": []}"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.generate("Learn Rust").await.unwrap();

        assert!(roadmap.id.as_str().starts_with("learn-rust-"));
    }

    #[tokio::test]
    async fn test_generate_accepts_empty_steps() {
        // Policy decision: an empty steps array is a valid empty roadmap,
        // not a synthesis failure.
        let reply = r#"{"topic": "Nothing", "steps": []}"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.generate("Nothing").await.unwrap();

        assert!(roadmap.steps.is_empty());
        assert_eq!(roadmap.progress(), 0);
    }

    #[tokio::test]
    async fn test_generate_accepts_prose_wrapped_json() {
        let reply = "Here is your roadmap:\n```json\n{\"topic\": \"Chess\", \"steps\": [{\"id\": \"step-1\", \"title\": \"Rules\", \"description\": \"\"}]}\n```\nGood luck!";
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.generate("Chess").await.unwrap();

        assert_eq!(roadmap.steps.len(), 1);
    }

    #[tokio::test]
    async fn test_customize_preserves_completed_by_id() {
        let previous = previous_roadmap();
        // step-3 survives (was completed), step-1 survives (was not),
        // step-9 is new.
        let reply = r#"{
            "topic": "Learn Rust",
            "steps": [
                {"id": "step-3", "title": "Ownership", "description": ""},
                {"id": "step-1", "title": "Install", "description": ""},
                {"id": "step-9", "title": "Async", "description": ""}
            ]
        }"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.customize(&previous, "add async").await.unwrap();

        assert!(roadmap.steps[0].completed, "matched completed step keeps its flag");
        assert!(!roadmap.steps[1].completed);
        assert!(!roadmap.steps[2].completed, "new step starts incomplete");
    }

    #[tokio::test]
    async fn test_customize_preserves_id_and_created_at() {
        let previous = previous_roadmap();
        let reply = r#"{"topic": "Learn Rust Deeply", "steps": []}"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let roadmap = synth.customize(&previous, "go deeper").await.unwrap();

        assert_eq!(roadmap.id, previous.id);
        assert_eq!(roadmap.created_at, previous.created_at);
        assert_eq!(roadmap.topic, "Learn Rust Deeply");
    }

    #[tokio::test]
    async fn test_customize_echo_roundtrip_preserves_all_flags() {
        // A model that echoes the roadmap back unchanged must preserve
        // every completion flag exactly.
        let previous = previous_roadmap();
        let echoed = serde_json::to_string(&previous).unwrap();
        let synth = Synthesizer::new(CannedProvider::new(echoed));

        let roadmap = synth.customize(&previous, "keep as is").await.unwrap();

        let flags: Vec<bool> = roadmap.steps.iter().map(|s| s.completed).collect();
        let prior_flags: Vec<bool> = previous.steps.iter().map(|s| s.completed).collect();
        assert_eq!(flags, prior_flags);
    }

    #[tokio::test]
    async fn test_no_json_found() {
        let synth = Synthesizer::new(CannedProvider::new("I cannot help with that."));

        let err = synth.generate("Learn Rust").await.unwrap_err();

        assert!(matches!(err, GenerationError::NoJsonFound));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let reply = r#"{"topic": "Learn Rust", "steps": [,]}"#;
        let synth = Synthesizer::new(CannedProvider::new(reply));

        let err = synth.generate("Learn Rust").await.unwrap_err();

        assert!(matches!(err, GenerationError::MalformedJson(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_leaves_previous_untouched() {
        let previous = previous_roadmap();
        let snapshot = previous.clone();
        let synth = Synthesizer::new(CannedProvider::new(r#"{"steps": [,]}"#));

        let result = synth.customize(&previous, "break it").await;

        assert!(result.is_err());
        assert_eq!(previous, snapshot);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let synth = Synthesizer::new(FailingProvider);

        let err = synth.generate("Learn Rust").await.unwrap_err();

        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[test]
    fn test_unique_step_id_prefers_model_id() {
        let seen = HashSet::new();
        assert_eq!(unique_step_id(Some("intro"), 0, &seen), "intro");
    }

    #[test]
    fn test_unique_step_id_positional_fallbacks() {
        let mut seen = HashSet::new();
        assert_eq!(unique_step_id(None, 0, &seen), "step-1");
        seen.insert("step-1".to_string());
        // Duplicate model id falls back to the positional id.
        assert_eq!(unique_step_id(Some("step-1"), 1, &seen), "step-2");
        seen.insert("step-2".to_string());
        // Positional id already claimed: suffix until unique.
        assert_eq!(unique_step_id(Some("step-2"), 1, &seen), "step-2-2");
    }
}
