//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use pico8_lsp::{Document, FoldingAnalyzer, FoldingInfo, Settings};

/// Output format for folding reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output with LSP field names
    Json,
}

/// Restrict the report to one of the three outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    /// Block folding ranges
    Ranges,
    /// Tab and `#region` regions
    Regions,
    /// Per-tab line numbers
    Lines,
}

#[derive(Parser)]
#[command(name = "pico8-fold")]
#[command(author, version, about = "Folding ranges for PICO-8 cartridges", long_about = None)]
struct Cli {
    /// Cartridge (.p8) or Lua file to analyze
    input: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only print one section
    #[arg(long, value_enum)]
    only: Option<Section>,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// Logging goes to stderr and is controlled by `RUST_LOG`.
pub fn run_cli() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    fold_command(&cli.input, cli.config.as_deref(), cli.format, cli.only)
}

/// Execute the fold command and print the report to stdout
pub fn fold_command(
    input: &Path,
    config: Option<&Path>,
    format: OutputFormat,
    only: Option<Section>,
) -> Result<()> {
    let report = fold_report(input, config, format, only)?;
    print!("{}", report);
    Ok(())
}

/// Analyze a file and render the report without printing it
pub fn fold_report(
    input: &Path,
    config: Option<&Path>,
    format: OutputFormat,
    only: Option<Section>,
) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let settings = load_settings(config)?;

    let bytes =
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let document = Document::from_bytes(&bytes)
        .with_context(|| format!("Input file is not valid UTF-8: {}", input.display()))?;

    info!("Analyzing {} ({} lines)", input.display(), document.line_count());

    let info = FoldingAnalyzer::new(settings)
        .analyze(&document)
        .with_context(|| format!("Failed to compute folding for {}", input.display()))?;

    match format {
        OutputFormat::Json => render_json(&info, only),
        OutputFormat::Text => Ok(render_text(input, &info, only)),
    }
}

/// Load settings from a TOML file, or defaults when no path is given
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let Some(path) = config else {
        return Ok(Settings::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let settings = Settings::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn render_json(info: &FoldingInfo, only: Option<Section>) -> Result<String> {
    let value = serde_json::to_value(info).context("Failed to serialize folding info to JSON")?;

    let value = match (only, value) {
        (Some(section), Value::Object(mut fields)) => {
            let key = match section {
                Section::Ranges => "ranges",
                Section::Regions => "regions",
                Section::Lines => "tabLines",
            };
            let mut filtered = Map::new();
            filtered.insert(key.to_string(), fields.remove(key).unwrap_or_else(|| json!([])));
            Value::Object(filtered)
        }
        (_, value) => value,
    };

    let mut json =
        serde_json::to_string_pretty(&value).context("Failed to serialize folding info to JSON")?;
    json.push('\n');
    Ok(json)
}

fn render_text(input: &Path, info: &FoldingInfo, only: Option<Section>) -> String {
    let shows = |section: Section| only.is_none() || only == Some(section);
    let mut out = String::new();

    let _ = writeln!(out, "{}", input.display());

    if shows(Section::Ranges) {
        let _ = writeln!(out, "\nFolding ranges ({}):", info.ranges.len());
        for range in &info.ranges {
            let _ = writeln!(out, "  {:>5} - {}", range.start_line, range.end_line);
        }
    }

    if shows(Section::Regions) {
        let _ = writeln!(out, "\nRegions ({}):", info.regions.len());
        for region in &info.regions {
            let _ = writeln!(
                out,
                "  {:>5} - {:<5} {}",
                region.start_line, region.end_line, region.name
            );
        }
    }

    if shows(Section::Lines) {
        let _ = writeln!(out, "\nTab lines ({}):", info.tab_lines.len());
        for line in &info.tab_lines {
            let _ = writeln!(
                out,
                "  {:>5} -> {}",
                line.range.start.line, line.line_in_tab
            );
        }
    }

    out
}
