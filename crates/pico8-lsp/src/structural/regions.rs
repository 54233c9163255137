//! Named folding regions from tab separators and `#region` comments
//!
//! Generates regions for:
//! - Editor tabs: the code between `__lua__` and the first `-->8`, then each
//!   `-->8` up to the next one, and the last tab up to `__gfx__`
//! - Nested `#region` / `#endregion` comment pairs, matched LIFO
//!
//! Tab regions are named `"<index>: <label>"`, where the label is the comment
//! that follows the separator. All output lines are 0-based and inclusive.

use serde::Serialize;
use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};
use tracing::{debug, trace};

use super::markers::{MarkerScanner, RegionMarker};
use crate::config::Settings;
use crate::syntax::Comment;

/// A named, 0-based inclusive line span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRegion {
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl NamedRegion {
    pub fn new(name: impl Into<String>, start_line: u32, end_line: u32) -> Self {
        Self {
            name: name.into(),
            start_line,
            end_line,
        }
    }
}

impl From<&NamedRegion> for FoldingRange {
    fn from(region: &NamedRegion) -> Self {
        FoldingRange {
            start_line: region.start_line,
            end_line: region.end_line,
            kind: Some(FoldingRangeKind::Region),
            start_character: None,
            end_character: None,
            collapsed_text: Some(region.name.clone()),
        }
    }
}

/// An open `#region` waiting for its `#endregion`
#[derive(Debug, Clone)]
struct OpenRegion {
    /// 1-based line of the `#region` comment
    start_line: i64,
    name: String,
    is_default_name: bool,
}

/// The tab currently being scanned
#[derive(Debug, Clone)]
struct OpenTab {
    start_line: i64,
    name: String,
}

/// Collects regions, dropping empty or inverted spans
#[derive(Debug, Default)]
struct RegionSink {
    regions: Vec<NamedRegion>,
}

impl RegionSink {
    fn push(&mut self, name: String, start_line: i64, end_line: i64) {
        if start_line < 0 || start_line >= end_line {
            trace!(
                "dropping degenerate region {:?} ({}..{})",
                name,
                start_line,
                end_line
            );
            return;
        }
        self.regions
            .push(NamedRegion::new(name, start_line as u32, end_line as u32));
    }

    fn push_tab(&mut self, index: &mut u32, label: &str, start_line: i64, end_line: i64) {
        self.push(format!("{}: {}", index, label), start_line, end_line);
        *index += 1;
    }
}

/// Scanner producing named regions from raw lines and comments
pub struct RegionScanner;

impl RegionScanner {
    /// Generate the sorted named regions of a document
    ///
    /// `lines` are the document's raw lines, `comments` its comment tokens in
    /// any order.
    pub fn scan(lines: &[&str], comments: &[Comment], settings: &Settings) -> Vec<NamedRegion> {
        let separator = settings.markers.tab_separator.as_str();
        let default_tab = settings.names.default_tab.as_str();
        let last_line = lines.len().saturating_sub(1) as i64;

        let sections = MarkerScanner::section_markers(lines, &settings.markers);

        let mut sorted: Vec<&Comment> = comments.iter().collect();
        sorted.sort_by_key(|c| c.start_line());

        let mut sink = RegionSink::default();
        let mut tab_index = 0u32;

        // ----- FIRST TAB: from __lua__ to the first separator -----
        if let Some(lua_line) = sections.lua_line {
            let lua_line = i64::from(lua_line);
            let first_separator = sorted
                .iter()
                .find(|c| c.raw == separator && i64::from(c.start_line()) - 1 > lua_line);

            if let Some(first_separator) = first_separator {
                let start_line = lua_line + 1;
                let label = sorted
                    .iter()
                    .find(|c| i64::from(c.start_line()) - 1 == start_line)
                    .map_or(default_tab, |c| c.value.trim());
                let end_line = i64::from(first_separator.start_line()) - 2;
                sink.push_tab(&mut tab_index, label, start_line, end_line);
            }
        }

        // ----- SINGLE PASS OVER COMMENTS -----
        let mut open_tab: Option<OpenTab> = None;
        let mut region_stack: Vec<OpenRegion> = Vec::new();

        for (i, comment) in sorted.iter().enumerate() {
            let line = i64::from(comment.start_line());

            match MarkerScanner::region_marker(comment.value.trim()) {
                Some(RegionMarker::Start(label)) => {
                    region_stack.push(OpenRegion {
                        start_line: line,
                        name: if label.is_empty() {
                            settings.names.default_region.clone()
                        } else {
                            label.to_string()
                        },
                        is_default_name: label.is_empty(),
                    });
                }
                Some(RegionMarker::End(label)) => match region_stack.pop() {
                    Some(open) => {
                        let name = if open.is_default_name && !label.is_empty() {
                            label.to_string()
                        } else {
                            open.name
                        };
                        sink.push(name, open.start_line - 1, line - 1);
                    }
                    None => debug!("ignoring unmatched #endregion at line {}", line),
                },
                None => {}
            }

            if comment.raw == separator {
                if let Some(tab) = open_tab.take() {
                    sink.push_tab(&mut tab_index, &tab.name, tab.start_line, line - 2);
                }
                // The separator's 1-based line is the 0-based line after it
                open_tab = Some(OpenTab {
                    start_line: line,
                    name: Self::tab_label(&sorted, i, separator, default_tab).to_string(),
                });
            }
        }

        // ----- CLEANUP AT DOCUMENT END -----
        if let Some(tab) = open_tab {
            let end_line = sections.gfx_line.map_or(last_line, i64::from);
            sink.push_tab(&mut tab_index, &tab.name, tab.start_line, end_line);
        }

        // Unclosed regions keep the stored 1-based line as their start,
        // one line below where a matched region would start.
        while let Some(open) = region_stack.pop() {
            sink.push(open.name, open.start_line, last_line);
        }

        let mut regions = sink.regions;
        regions.sort_by_key(|r| (r.start_line, r.end_line));
        debug!("generated {} named regions across {} tabs", regions.len(), tab_index);
        regions
    }

    /// Label for the tab opened by the separator at `index`
    fn tab_label<'a>(
        sorted: &[&'a Comment],
        index: usize,
        separator: &str,
        default_tab: &'a str,
    ) -> &'a str {
        match sorted.get(index + 1) {
            Some(next) if next.raw != separator => {
                let value = next.value.trim();
                if value.is_empty() {
                    default_tab
                } else {
                    value
                }
            }
            _ => default_tab,
        }
    }
}
