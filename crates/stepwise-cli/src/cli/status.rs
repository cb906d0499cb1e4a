//! System status dashboard.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Print data directory, configured model, API key presence, and
/// roadmap count.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let roadmaps = state.roadmap_service.list().await?;

    if json {
        let status = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "model": state.model,
            "api_key_configured": state.has_api_key,
            "roadmap_count": roadmaps.len(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!("  {} Stepwise status", style("◆").bold());
    println!();
    println!(
        "  {}  {}",
        style("Data dir:").bold(),
        style(state.data_dir.display()).dim()
    );
    println!("  {}  {}", style("Model:").bold(), state.model);
    println!(
        "  {} API key configured",
        check_mark(state.has_api_key)
    );
    if !state.has_api_key {
        println!(
            "     Set {} to enable generation.",
            style("STEPWISE_GEMINI_API_KEY").yellow()
        );
    }
    println!(
        "  {}  {}",
        style("Roadmaps:").bold(),
        roadmaps.len()
    );
    println!();

    Ok(())
}
