//! Clap derive structures for the `centraldoc` CLI.
//!
//! Also compiled by `build.rs` for man pages, so this file may only depend
//! on clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// centraldoc -- network documentation from Aruba Central
#[derive(Debug, Parser)]
#[command(
    name = "centraldoc",
    version,
    about = "Generate Aruba Central network documentation",
    long_about = "Builds Word documents for the sites, configuration groups, subscriptions\n\
        and device inventory of an Aruba Central account, optionally converted\n\
        to PDF with a headless office suite.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// JSON file with the Central connection and access token
    #[arg(
        long,
        env = "CENTRALDOC_JSON_CENTRAL",
        default_value = "central.json",
        global = true
    )]
    pub json_central: PathBuf,

    /// JSON file with the group and site selection
    #[arg(
        long,
        env = "CENTRALDOC_JSON_FILTER",
        default_value = "filter.json",
        global = true
    )]
    pub json_filter: PathBuf,

    /// Customer name for the cover page (overrides filter file)
    #[arg(long, global = true)]
    pub customer_name: Option<String>,

    /// Document title for the cover page (overrides filter file)
    #[arg(long, global = true)]
    pub document_title: Option<String>,

    /// Directory for result files and the log
    #[arg(long, env = "CENTRALDOC_DATA_DIRECTORY", global = true)]
    pub data_directory: Option<PathBuf>,

    /// Log level (overrides -v)
    #[arg(long, ignore_case = true, global = true)]
    pub debug_level: Option<DebugLevel>,

    /// Inverse search condition
    #[arg(long, global = true)]
    pub inverse_search: bool,

    /// Output format for the run summary
    #[arg(
        long,
        short = 'o',
        env = "CENTRALDOC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Enums ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DebugLevel {
    Notset,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full documentation batch
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Export VisualRF floorplan images into the images directory
    Floorplans,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Skip PDF conversion
    #[arg(long)]
    pub no_pdf: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
