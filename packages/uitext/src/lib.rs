//! uitext - Runtime manager for localized user-interface text.
//!
//! Text is authored as XML resource documents: named groups of texts, each
//! text holding one variant per language and optionally per country. This
//! crate parses such documents, caches them by content name, reparses
//! file-backed documents when their file changes, and resolves lookups with
//! a country → language → system fallback.
//!
//! # Example
//!
//! ```
//! use uitext::codes::{Country, Language};
//! use uitext::Registry;
//!
//! let registry = Registry::new();
//! let doc = registry.load_from_str("shop", r#"
//!     <content>
//!       <group name="gui">
//!         <text id="search">
//!           <lang id="en">Search</lang>
//!           <lang id="de">Suchen</lang>
//!         </text>
//!       </group>
//!     </content>"#).unwrap();
//!
//! let gui = doc.get_group("gui", Language::De, Some(Country::At)).unwrap().unwrap();
//! assert_eq!(gui.get("search"), Some("Suchen"));
//! ```
//!
//! # Architecture
//!
//! - [`codes`]: Supported language and country codes
//! - [`config`]: Configuration constants and source addressing
//! - [`error`]: Error types and Result alias
//! - [`group`]: Groups of localized strings and fallback resolution
//! - [`parser`]: Grammar-checking, event-driven document parser
//! - [`document`]: Loaded documents and their refresh policy
//! - [`registry`]: Document cache by content name
//! - [`source`]: Resource sources and I/O backends
//! - [`storage`]: Filesystem access
//! - [`http`]: Fetching URL-backed documents
//! - [`yaml`]: YAML export of parsed documents
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod codes;
pub mod config;
pub mod document;
pub mod error;
pub mod group;
pub mod http;
pub mod parser;
pub mod registry;
pub mod source;
pub mod storage;
pub mod yaml;

// Re-export commonly used items
pub use codes::{Country, Language};
pub use document::Document;
pub use error::{ResourceError, Result};
pub use group::Group;
pub use registry::Registry;
pub use source::{Backends, ResourceSource, SourceKind};
