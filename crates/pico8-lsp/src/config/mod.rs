//! Folding configuration
//!
//! Marker tokens and fallback labels, loadable from a `pico8-lsp.toml`:
//!
//! ```toml
//! [markers]
//! lua_section = "__lua__"
//! gfx_section = "__gfx__"
//! tab_separator = "-->8"
//!
//! [names]
//! default_tab = "tab"
//! default_region = "region"
//! ```

mod settings;


pub use settings::{MarkerSettings, NameSettings, Settings};
