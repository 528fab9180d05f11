//! psaltica-symbols - Symbol rules, templates and best-match queries
//!
//! Owns everything the classifier needs to know about the notation:
//!
//! - [`SymbolConfig`]: the four bundled JSON documents (degree order and
//!   mode heights, core symbol rules, display names, fallback catalog),
//!   loaded leniently with documented defaults for anything missing.
//! - [`TemplateRepository`]: decodes and preprocesses template rasters
//!   once (memoized), and answers "which symbol does this normalized
//!   64x64 patch best match" for both the core rule set and the larger
//!   fallback catalog.
//! - [`keyboard`]: the INI-style keyboard token table used by the
//!   composition keyboard.
//!
//! Template preprocessing is deliberately routed through the exact same
//! `psaltica-ops` functions the analyzer applies to photographs, so
//! similarity scores compare like with like.

pub mod config;
pub mod keyboard;
pub mod repository;

mod error;

pub use config::{CatalogSymbol, CoreSymbolRule, SymbolConfig, SymbolRole};
pub use error::{SymbolError, SymbolResult};
pub use keyboard::{KeyboardTokenEntry, parse_keyboard_ini};
pub use repository::{CatalogMatch, TEMPLATE_SIZE, TemplateMatch, TemplateRepository, preprocess};
