//! YAML writer for resource documents.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::document::Document;
use crate::error::Result;

/// Document representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlDocument<'a> {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,
    /// Group name -> compound key -> text.
    groups: BTreeMap<&'a str, BTreeMap<&'a str, &'a str>>,
}

/// Generate YAML for the current snapshot of a document.
///
/// Groups and their compound keys are written in sorted order, so the
/// output is stable across runs.
pub fn generate_yaml(doc: &Document) -> Result<String> {
    let groups = doc.groups();
    let last_modified = match doc.last_modified() {
        0 => None,
        millis => DateTime::<Utc>::from_timestamp_millis(millis),
    };

    let yaml_struct = YamlDocument {
        source: doc.source().descriptor(),
        last_modified,
        groups: groups
            .iter()
            .map(|(name, group)| (name.as_str(), group.entries().into_iter().collect()))
            .collect(),
    };
    let yaml_string = serde_yaml_ng::to_string(&yaml_struct)?;

    // Add document start marker and clean up trailing whitespace
    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_yaml() {
        let doc = Document::from_xml(
            r#"<content>
  <group name="menu"><text id="quit"><lang id="sys">Quit</lang></text></group>
  <group name="gui">
    <text id="search"><lang id="en">Search</lang><lang id="de">Suchen</lang></text>
  </group>
</content>"#,
        )
        .unwrap();

        let yaml = generate_yaml(&doc).unwrap();
        assert!(yaml.starts_with("---\nsource: "));
        assert!(!yaml.contains("last_modified"));
        assert_eq!(
            yaml.split_once("groups:\n").map(|(_, groups)| groups),
            Some("  gui:\n    search_de: Suchen\n    search_en: Search\n  menu:\n    quit: Quit\n")
        );
    }
}
