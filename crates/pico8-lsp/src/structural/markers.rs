//! Marker detection for cartridge sections and comment regions
//!
//! Classifies comment text as `#region`/`#endregion` markers and locates the
//! `__lua__`/`__gfx__` section lines.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::MarkerSettings;

/// A `#region` or `#endregion` comment with its (possibly empty) label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMarker<'a> {
    Start(&'a str),
    End(&'a str),
}

/// 0-based lines of the section markers, `None` when absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionMarkers {
    pub lua_line: Option<u32>,
    pub gfx_line: Option<u32>,
}

/// Scanner for textual markers
pub struct MarkerScanner;

impl MarkerScanner {
    /// Classify a trimmed comment value
    pub fn region_marker(value: &str) -> Option<RegionMarker<'_>> {
        static START_RE: OnceLock<Regex> = OnceLock::new();
        static END_RE: OnceLock<Regex> = OnceLock::new();

        let start_re = START_RE.get_or_init(|| Regex::new(r"^#region\s*(.*)$").unwrap());
        let end_re = END_RE.get_or_init(|| Regex::new(r"^#endregion\s*(.*)$").unwrap());

        if let Some(caps) = start_re.captures(value) {
            let label = caps.get(1).map_or("", |m| m.as_str().trim());
            return Some(RegionMarker::Start(label));
        }
        if let Some(caps) = end_re.captures(value) {
            let label = caps.get(1).map_or("", |m| m.as_str().trim());
            return Some(RegionMarker::End(label));
        }
        None
    }

    /// Find the last `__lua__` and last `__gfx__` line
    pub fn section_markers(lines: &[&str], markers: &MarkerSettings) -> SectionMarkers {
        let mut found = SectionMarkers::default();
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim();
            if line == markers.lua_section {
                found.lua_line = Some(i as u32);
            } else if line == markers.gfx_section {
                found.gfx_line = Some(i as u32);
            }
        }
        found
    }
}
