//! pico8-fold CLI - Command-line interface library
//!
//! This library prints the folding information of a PICO-8 cartridge:
//! - Block folding ranges for compound statements
//! - Named tab and `#region` regions
//! - Per-tab line numbers
//!
//! # Library Usage
//!
//! ```ignore
//! use pico8_fold_cli::{fold_report, OutputFormat};
//!
//! // Run the full CLI
//! run_cli()?;
//!
//! // Or render a report programmatically
//! let report = fold_report(&input, None, OutputFormat::Json, None)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Print everything as text
//! pico8-fold game.p8
//!
//! # Regions only, as JSON, with custom markers
//! pico8-fold game.p8 --format json --only regions --config pico8-fold.toml
//!
//! # Trace the reader and scanners
//! RUST_LOG=pico8_lsp=debug pico8-fold game.p8
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{fold_command, fold_report, load_settings};
pub use app::{run_cli, OutputFormat, Section};
