//! Instruction text sent to the completion endpoint.
//!
//! Pure string construction, no side effects. The generate prompt pins
//! the exact JSON shape the synthesizer expects; the customize prompt
//! embeds the current roadmap and the user's free-text instruction.

use stepwise_types::roadmap::Roadmap;

/// Build the instruction for generating a fresh roadmap.
///
/// The caller enforces a trimmed, non-empty topic before invocation.
/// The 8-12 step range and the "real resources" demand are advisory to
/// the model; the synthesizer does not enforce either.
pub fn build_generate_prompt(topic: &str) -> String {
    format!(
        r#"Create a detailed learning roadmap for "{topic}". Return a JSON object with this exact structure:
{{
  "topic": "{topic}",
  "steps": [
    {{
      "id": "step-1",
      "title": "Step title here",
      "description": "Detailed description of what to learn/do in this step",
      "resource": {{
        "title": "Resource name",
        "url": "https://example.com (if available)",
        "description": "Brief description of the recommended resource"
      }}
    }}
  ]
}}

Create 8-12 comprehensive steps that take someone from beginner to intermediate level. Each step should have a specific, actionable title and detailed description. For resources, recommend real websites, tutorials, books, or tools when possible. Make sure the JSON is valid and properly formatted."#
    )
}

/// Build the instruction for customizing an existing roadmap.
///
/// The current roadmap is embedded as pretty-printed JSON. Completion
/// status preservation is requested "where possible" but never trusted:
/// reconciliation in the synthesizer is what actually preserves flags.
pub fn build_customize_prompt(current: &Roadmap, instruction: &str) -> String {
    let current_json = serde_json::to_string_pretty(current)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Here is the current roadmap:
{current_json}

User request: "{instruction}"

Please modify the roadmap according to the user's request and return the updated JSON object with the same structure. Maintain the completion status of existing steps where possible. Return only the JSON object."#
    )
}
