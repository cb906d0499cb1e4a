//! Roadmap document export.
//!
//! Renders a roadmap into a downloadable Markdown document reproducing
//! topic, creation date, and each step's title/description/resource/
//! completion flag in order. Pure string construction; the CLI decides
//! where the document lands on disk.

use std::fmt::Write as _;

use stepwise_types::roadmap::Roadmap;

/// Render a roadmap as a standalone Markdown document.
pub fn render_markdown(roadmap: &Roadmap) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# {}", roadmap.topic);
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "*Generated on: {}*",
        roadmap.created_at.format("%B %-d, %Y")
    );
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "This document provides a detailed learning roadmap. Each step includes \
         a description and a recommended resource to guide your learning journey."
    );

    for (index, step) in roadmap.steps.iter().enumerate() {
        let _ = writeln!(doc);
        let marker = if step.completed { " (Completed)" } else { "" };
        let _ = writeln!(doc, "## {}. {}{}", index + 1, step.title, marker);
        let _ = writeln!(doc);
        let _ = writeln!(doc, "{}", step.description);
        let _ = writeln!(doc);
        let _ = writeln!(doc, "**Resource:**");
        let resource_line = match &step.resource.url {
            Some(url) => format!("- {} ({})", step.resource.title, url),
            None => format!("- {}", step.resource.title),
        };
        let _ = writeln!(doc, "{resource_line}");
        let _ = writeln!(doc, "- {}", step.resource.description);
    }

    let _ = writeln!(doc);
    let _ = writeln!(doc, "---");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "*Happy Learning!*");

    doc
}

/// Derive the export file name: lowercased topic, whitespace collapsed to
/// underscores, `_roadmap.md` suffix.
pub fn export_file_name(roadmap: &Roadmap) -> String {
    let base: String = roadmap
        .topic
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{base}_roadmap.md")
}
