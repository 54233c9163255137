//! Combined folding analysis for one document snapshot

use serde::Serialize;
use tower_lsp::lsp_types::FoldingRange;
use tracing::debug;

use super::folding::FoldingWalker;
use super::regions::{NamedRegion, RegionScanner};
use super::tab_lines::{TabLineAnnotator, TabLineNumber};
use crate::config::Settings;
use crate::document::Document;
use crate::error::Result;
use crate::syntax;

/// The three folding outputs of a document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldingInfo {
    /// Compound statement ranges, sorted
    pub ranges: Vec<FoldingRange>,
    /// Tab and `#region` regions, sorted
    pub regions: Vec<NamedRegion>,
    pub tab_lines: Vec<TabLineNumber>,
}

impl FoldingInfo {
    /// Statement ranges and region ranges merged, sorted by start then end line
    pub fn combined_ranges(&self) -> Vec<FoldingRange> {
        let mut combined: Vec<FoldingRange> = self
            .regions
            .iter()
            .map(FoldingRange::from)
            .chain(self.ranges.iter().cloned())
            .collect();
        sort_ranges(&mut combined);
        combined
    }
}

/// Analyzer running the reader once and all three passes over its output
#[derive(Debug, Clone, Default)]
pub struct FoldingAnalyzer {
    settings: Settings,
}

impl FoldingAnalyzer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compute all folding outputs for a document
    pub fn analyze(&self, document: &Document) -> Result<FoldingInfo> {
        let parsed = syntax::parse(document.text());

        let mut ranges = FoldingWalker::generate_ranges(&parsed.chunk)?;
        sort_ranges(&mut ranges);

        let regions = RegionScanner::scan(&document.lines(), &parsed.comments, &self.settings);
        let tab_lines = TabLineAnnotator::annotate(document.text(), &self.settings.markers);

        debug!(
            "{} ranges, {} regions, {} tab lines",
            ranges.len(),
            regions.len(),
            tab_lines.len()
        );

        Ok(FoldingInfo {
            ranges,
            regions,
            tab_lines,
        })
    }

    /// Folding ranges for an editor: statements and regions together
    pub fn generate_ranges(&self, text: &str) -> Result<Vec<FoldingRange>> {
        let info = self.analyze(&Document::new(text))?;
        Ok(info.combined_ranges())
    }
}

fn sort_ranges(ranges: &mut [FoldingRange]) {
    ranges.sort_by_key(|r| (r.start_line, r.end_line));
}
