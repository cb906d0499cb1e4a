//! Roadmap lifecycle CLI commands: generate, customize, list, show,
//! toggle, delete, export.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use stepwise_core::export::{export_file_name, render_markdown};
use stepwise_types::error::RoadmapError;
use stepwise_types::roadmap::Roadmap;

use crate::state::AppState;

/// Generate a new roadmap via one-shot argument or interactive prompt.
///
/// # Examples
///
/// ```bash
/// # One-shot
/// stepw generate "Learn Rust"
///
/// # Interactive
/// stepw generate
/// ```
pub async fn generate(state: &AppState, topic: Option<String>, json: bool) -> Result<()> {
    let topic = match topic {
        Some(t) => t,
        None => {
            Input::<String>::new()
                .with_prompt("What would you like to learn?")
                .interact_text()?
        }
    };

    if topic.trim().is_empty() {
        anyhow::bail!("topic must not be empty");
    }

    if !state.has_api_key {
        print_api_key_hint();
        anyhow::bail!("no API key configured");
    }

    let spinner = make_spinner("Generating roadmap...");
    let result = state.roadmap_service.generate(&topic).await;
    spinner.finish_and_clear();

    let roadmap = handle_generation_result(result)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&roadmap)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Created a {}-step roadmap for {}",
        style("✓").green().bold(),
        roadmap.steps.len(),
        style(&roadmap.topic).cyan()
    );
    println!();
    println!(
        "  View it: {}",
        style(format!("stepw show {}", roadmap.id)).yellow()
    );
    println!();

    Ok(())
}

/// Customize an existing roadmap with a free-text instruction.
pub async fn customize(
    state: &AppState,
    reference: &str,
    instruction: Option<String>,
    json: bool,
) -> Result<()> {
    let roadmap = resolve_roadmap(state, reference).await?;

    let instruction = match instruction {
        Some(i) => i,
        None => {
            Input::<String>::new()
                .with_prompt("How should the roadmap change?")
                .interact_text()?
        }
    };

    if instruction.trim().is_empty() {
        anyhow::bail!("customization instruction must not be empty");
    }

    if !state.has_api_key {
        print_api_key_hint();
        anyhow::bail!("no API key configured");
    }

    let spinner = make_spinner("Updating roadmap...");
    let result = state.roadmap_service.customize(&roadmap.id, &instruction).await;
    spinner.finish_and_clear();

    let updated = handle_generation_result(result)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Roadmap updated: {} steps, {}% complete",
        style("✓").green().bold(),
        updated.steps.len(),
        updated.progress()
    );
    println!();

    Ok(())
}

/// List all saved roadmaps in a table, newest first.
pub async fn list(state: &AppState, json: bool) -> Result<()> {
    let roadmaps = state.roadmap_service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&roadmaps)?);
        return Ok(());
    }

    if roadmaps.is_empty() {
        println!();
        println!(
            "  {} No roadmaps yet. Create one with: {}",
            style("i").blue().bold(),
            style("stepw generate \"Learn Rust\"").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Topic").fg(Color::White),
        Cell::new("Steps").fg(Color::White),
        Cell::new("Progress").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for roadmap in &roadmaps {
        let progress = roadmap.progress();
        let progress_cell = if progress == 100 {
            Cell::new(format!("{progress}%")).fg(Color::Green)
        } else {
            Cell::new(format!("{progress}%"))
        };
        table.add_row(vec![
            Cell::new(&roadmap.topic).fg(Color::Cyan),
            Cell::new(roadmap.steps.len()),
            progress_cell,
            Cell::new(roadmap.created_at.format("%Y-%m-%d")),
            Cell::new(roadmap.id.as_str()).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Show one roadmap with per-step checkboxes and resources.
pub async fn show(state: &AppState, reference: &str, json: bool) -> Result<()> {
    let roadmap = resolve_roadmap(state, reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&roadmap)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&roadmap.topic).cyan().bold());
    println!(
        "  {}",
        style(format!(
            "Created {} · {} of {} steps completed · {}%",
            roadmap.created_at.format("%Y-%m-%d"),
            roadmap.completed_count(),
            roadmap.steps.len(),
            roadmap.progress()
        ))
        .dim()
    );
    println!();

    for (index, step) in roadmap.steps.iter().enumerate() {
        let marker = if step.completed {
            style("✓").green().bold()
        } else {
            style("○").dim()
        };
        println!(
            "  {} {} {}  {}",
            marker,
            style(format!("{}.", index + 1)).bold(),
            style(&step.title).bold(),
            style(format!("[{}]", step.id)).dim()
        );
        if !step.description.is_empty() {
            println!("      {}", step.description);
        }
        if !step.resource.title.is_empty() {
            let resource = match &step.resource.url {
                Some(url) => format!("{} ({url})", step.resource.title),
                None => step.resource.title.clone(),
            };
            println!("      {} {}", style("Resource:").blue(), resource);
        }
        println!();
    }

    if roadmap.steps.is_empty() {
        println!("  {}", style("This roadmap has no steps.").dim());
        println!();
    }

    Ok(())
}

/// Flip one step's completion flag.
pub async fn toggle(state: &AppState, reference: &str, step_id: &str, json: bool) -> Result<()> {
    let roadmap = resolve_roadmap(state, reference).await?;
    let updated = state.roadmap_service.toggle_step(&roadmap.id, step_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
        return Ok(());
    }

    let step = updated
        .steps
        .iter()
        .find(|s| s.id == step_id)
        .expect("step existed a moment ago");

    let (marker, verb) = if step.completed {
        (style("✓").green().bold(), "completed")
    } else {
        (style("○").dim(), "reopened")
    };
    println!();
    println!("  {} {} {}", marker, verb, style(&step.title).bold());
    println!(
        "  {}",
        style(format!("{}% of the roadmap complete", updated.progress())).dim()
    );
    println!();

    Ok(())
}

/// Delete a roadmap, with a confirmation prompt unless `--force`.
pub async fn delete(state: &AppState, reference: &str, force: bool, json: bool) -> Result<()> {
    let roadmap = resolve_roadmap(state, reference).await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete roadmap '{}'?", roadmap.topic))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Aborted.");
            return Ok(());
        }
    }

    state.roadmap_service.delete(&roadmap.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": roadmap.id.as_str() })
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Deleted roadmap {}",
        style("✓").green().bold(),
        style(&roadmap.topic).cyan()
    );
    println!();

    Ok(())
}

/// Export a roadmap as a Markdown document.
pub async fn export(
    state: &AppState,
    reference: &str,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let roadmap = resolve_roadmap(state, reference).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(&roadmap)));
    let document = render_markdown(&roadmap);
    tokio::fs::write(&path, document).await?;

    if json {
        println!("{}", serde_json::json!({ "path": path.display().to_string() }));
        return Ok(());
    }

    println!();
    println!(
        "  {} Exported {} to {}",
        style("✓").green().bold(),
        style(&roadmap.topic).cyan(),
        style(path.display()).yellow()
    );
    println!();

    Ok(())
}

/// Resolve a roadmap from an exact id or an unambiguous id prefix.
pub async fn resolve_roadmap(state: &AppState, reference: &str) -> Result<Roadmap> {
    let roadmaps = state.roadmap_service.list().await?;

    if let Some(exact) = roadmaps.iter().find(|r| r.id.as_str() == reference) {
        return Ok(exact.clone());
    }

    let matches: Vec<&Roadmap> = roadmaps
        .iter()
        .filter(|r| r.id.as_str().starts_with(reference))
        .collect();

    match matches.len() {
        0 => anyhow::bail!("no roadmap matches '{reference}' -- see: stepw list"),
        1 => Ok(matches[0].clone()),
        n => anyhow::bail!("'{reference}' is ambiguous ({n} matches) -- use the full id"),
    }
}

/// Collapse the generation error taxonomy into one user-facing message.
///
/// Transport failures, missing JSON, and malformed JSON all present the
/// same way; the typed cause goes to the debug log.
fn handle_generation_result(result: Result<Roadmap, RoadmapError>) -> Result<Roadmap> {
    match result {
        Ok(roadmap) => Ok(roadmap),
        Err(RoadmapError::Generation(err)) => {
            tracing::debug!(error = %err, "generation failed");
            println!();
            println!(
                "  {} Generation failed. Please try again.",
                style("✗").red().bold()
            );
            println!();
            anyhow::bail!("generation failed");
        }
        Err(err) => Err(err.into()),
    }
}

fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_api_key_hint() {
    println!();
    println!(
        "  {} No Gemini API key found.",
        style("✗").red().bold()
    );
    println!(
        "  Set {} (or {}) and try again.",
        style("STEPWISE_GEMINI_API_KEY").yellow(),
        style("GEMINI_API_KEY").yellow()
    );
    println!();
}
