//! CLI command definitions and dispatch for the `stepw` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! verb-first pattern (e.g., `stepw generate`, `stepw toggle`).

pub mod roadmap;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Turn any learning topic into a trackable roadmap.
#[derive(Parser)]
#[command(name = "stepw", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new roadmap for a learning topic.
    #[command(alias = "new")]
    Generate {
        /// Topic to learn (prompted interactively when omitted).
        topic: Option<String>,
    },

    /// Customize an existing roadmap with a free-text instruction.
    #[command(alias = "update")]
    Customize {
        /// Roadmap id (or unambiguous prefix).
        roadmap: String,

        /// How to modify the roadmap (prompted interactively when omitted).
        instruction: Option<String>,
    },

    /// List saved roadmaps.
    #[command(alias = "ls")]
    List,

    /// Show a roadmap with its steps and resources.
    Show {
        /// Roadmap id (or unambiguous prefix).
        roadmap: String,
    },

    /// Flip a step's completion flag.
    #[command(alias = "check")]
    Toggle {
        /// Roadmap id (or unambiguous prefix).
        roadmap: String,

        /// Step id (e.g., "step-3").
        step: String,
    },

    /// Delete a roadmap.
    #[command(alias = "rm")]
    Delete {
        /// Roadmap id (or unambiguous prefix).
        roadmap: String,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Export a roadmap as a Markdown document.
    Export {
        /// Roadmap id (or unambiguous prefix).
        roadmap: String,

        /// Output path (defaults to ./<topic>_roadmap.md).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// System status dashboard.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
