//! Per-tab line numbers for editor decorations
//!
//! PICO-8's built-in editor numbers lines from 1 in every tab. This annotator
//! reproduces that numbering for the code section of a `.p8` file so an
//! editor can show it next to the real line numbers.

use serde::Serialize;
use tower_lsp::lsp_types::{Position, Range};
use tracing::debug;

use crate::config::MarkerSettings;
use crate::document::normalize_line_endings;

/// A code line and its 1-based number within its tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabLineNumber {
    /// Whole line, columns in UTF-16 code units
    pub range: Range,
    pub line_in_tab: u32,
}

/// Annotator assigning tab-local line numbers
pub struct TabLineAnnotator;

impl TabLineAnnotator {
    /// Annotate every code line of the `__lua__` section
    ///
    /// Returns nothing for text without a `__lua__` line.
    pub fn annotate(text: &str, markers: &MarkerSettings) -> Vec<TabLineNumber> {
        let text = normalize_line_endings(text);
        let lines: Vec<&str> = text.split('\n').collect();

        let Some((section_start, section_end)) = Self::lua_section(&lines, markers) else {
            return Vec::new();
        };

        let mut annotations = Vec::new();
        let mut line_in_tab = 1;

        for (i, line) in lines
            .iter()
            .enumerate()
            .take(section_end)
            .skip(section_start + 1)
        {
            if line.trim() == markers.tab_separator {
                line_in_tab = 1;
                continue;
            }

            let line_number = i as u32;
            annotations.push(TabLineNumber {
                range: Range {
                    start: Position::new(line_number, 0),
                    end: Position::new(line_number, line.encode_utf16().count() as u32),
                },
                line_in_tab,
            });
            line_in_tab += 1;
        }

        debug!(
            "annotated {} lines between lines {} and {}",
            annotations.len(),
            section_start,
            section_end
        );
        annotations
    }

    /// Start line of the code section and the exclusive end
    ///
    /// The end is the first `__gfx__`-prefixed line after a `__lua__` line, or
    /// the line count when there is none.
    fn lua_section(lines: &[&str], markers: &MarkerSettings) -> Option<(usize, usize)> {
        let mut start = None;
        let mut end = lines.len();

        for (i, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line == markers.lua_section {
                start = Some(i);
            } else if start.is_some() && line.starts_with(markers.gfx_section.as_str()) {
                end = i;
                break;
            }
        }

        start.map(|start| (start, end))
    }
}
