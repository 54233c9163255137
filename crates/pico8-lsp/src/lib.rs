//! pico8-lsp structural folding
//!
//! This library computes editor folding information for PICO-8 `.p8`
//! cartridges, whose code section is split into tabs by `-->8` lines:
//! - Folding ranges for `if` clauses, loops, `do` blocks and functions
//! - Named regions for each tab and for `#region`/`#endregion` comments
//! - Tab-local line numbers for editor decorations
//!
//! # Library Usage
//!
//! ```
//! use pico8_lsp::{Document, FoldingAnalyzer};
//!
//! let document = Document::new("if ready then\n  go()\nend");
//! let info = FoldingAnalyzer::default().analyze(&document).unwrap();
//! assert_eq!(info.ranges[0].start_line, 0);
//! assert_eq!(info.ranges[0].end_line, 1);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod structural;
pub mod syntax;

// Re-export commonly used types
pub use config::Settings;
pub use document::Document;
pub use error::{FoldError, Result};
pub use structural::{FoldingAnalyzer, FoldingInfo, NamedRegion, TabLineNumber};
