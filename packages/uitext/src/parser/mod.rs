//! Parser for resource documents.
//!
//! A parse is a single forward pass over one source: the XML is read with
//! `roxmltree`, walked in document order, and every event is dispatched to
//! an explicit state machine that builds a fresh working set of groups.
//! Nothing is published until the whole document has been accepted.

pub mod events;
pub mod grammar;
mod machine;

use std::collections::BTreeMap;

use roxmltree::{Document, ParsingOptions};

use crate::error::Result;
use crate::group::Group;
use crate::source::{Backends, ResourceSource};

pub use events::{Element, Event, Position};
pub use machine::Machine;

/// Groups of one document by name.
pub type GroupMap = BTreeMap<String, Group>;

/// Parser for one resource source.
#[derive(Debug)]
pub struct Parser<'a> {
    source: &'a ResourceSource,
    backends: &'a Backends,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(source: &'a ResourceSource, backends: &'a Backends) -> Self {
        Self { source, backends }
    }

    /// Read the source and parse it into a new set of groups.
    pub fn parse(&self) -> Result<GroupMap> {
        let xml = self.source.read(self.backends)?;
        let groups = parse_str(&xml)?;
        tracing::debug!(
            source = %self.source.descriptor(),
            groups = groups.len(),
            "Parsed resource document"
        );
        Ok(groups)
    }
}

/// Parse XML text into a new set of groups.
///
/// # Examples
/// ```
/// use uitext::codes::Language;
/// use uitext::parser::parse_str;
///
/// let groups = parse_str(r#"
///     <content>
///       <group name="gui">
///         <text id="search"><lang id="en">Search</lang></text>
///       </group>
///     </content>"#).unwrap();
///
/// assert_eq!(groups["gui"].bind(Language::En, None).get("search"), Some("Search"));
/// ```
pub fn parse_str(xml: &str) -> Result<GroupMap> {
    let xml = grammar::inline_doctype(xml);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(&xml, options)?;

    let mut machine = Machine::new();
    events::walk(&doc, |event, position| machine.dispatch(event, position))?;
    machine.finish()
}
