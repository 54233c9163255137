//! Structural folding for PICO-8 cartridges
//!
//! This module provides three independent passes:
//! - Block folding ranges from the outline tree
//! - Named regions from tab separators and `#region` comments
//! - Per-tab line numbers for the code section
//!
//! `FoldingAnalyzer` runs all three over one document snapshot.

pub mod analyzer;
pub mod folding;
pub mod markers;
pub mod regions;
pub mod tab_lines;

pub use analyzer::{FoldingAnalyzer, FoldingInfo};
pub use folding::FoldingWalker;
pub use regions::{NamedRegion, RegionScanner};
pub use tab_lines::{TabLineAnnotator, TabLineNumber};
