//! Parse events produced from an XML document, in document order.

use roxmltree::{Document, Node, NodeType};

/// Line and column of an event in the source text (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// An element start tag with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
    pub name: &'a str,
    /// Namespace URI, if the element is in one.
    pub namespace: Option<&'a str>,
    pub attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Element<'a> {
    #[must_use]
    pub fn new(name: &'a str, attributes: Vec<(&'a str, &'a str)>) -> Self {
        Self {
            name,
            namespace: None,
            attributes,
        }
    }

    /// Get an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    /// First attribute whose name is not in `allowed`.
    #[must_use]
    pub fn unexpected_attribute(&self, allowed: &[&str]) -> Option<&'a str> {
        self.attributes
            .iter()
            .map(|(key, _)| *key)
            .find(|key| !allowed.contains(key))
    }
}

/// One step of the forward-only document walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    Start(Element<'a>),
    Text(&'a str),
    End(&'a str),
}

/// Walk `doc` once, handing every event and its position to `handler`.
///
/// Elements are visited depth first: `Start`, then the events of their
/// children, then `End`. Comments and processing instructions produce no
/// events. The walk stops at the first error returned by the handler.
pub fn walk<'a, E>(
    doc: &'a Document<'_>,
    mut handler: impl FnMut(Event<'a>, Position) -> Result<(), E>,
) -> Result<(), E> {
    walk_node(doc, doc.root_element(), &mut handler)
}

fn walk_node<'a, 'input, E>(
    doc: &'a Document<'input>,
    node: Node<'a, 'input>,
    handler: &mut impl FnMut(Event<'a>, Position) -> Result<(), E>,
) -> Result<(), E> {
    match node.node_type() {
        NodeType::Element => {
            let tag = node.tag_name();
            let attributes = node
                .attributes()
                .map(|attribute| (attribute.name(), attribute.value()))
                .collect();
            let element = Element {
                name: tag.name(),
                namespace: tag.namespace(),
                attributes,
            };
            handler(Event::Start(element), position(doc, node))?;
            for child in node.children() {
                walk_node(doc, child, handler)?;
            }
            handler(Event::End(tag.name()), position(doc, node))
        }
        NodeType::Text => match node.text() {
            Some(text) => handler(Event::Text(text), position(doc, node)),
            None => Ok(()),
        },
        NodeType::Root | NodeType::Comment | NodeType::PI => Ok(()),
    }
}

fn position(doc: &Document<'_>, node: Node<'_, '_>) -> Position {
    let pos = doc.text_pos_at(node.range().start);
    Position {
        line: pos.row,
        column: pos.col,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<'a>(doc: &'a Document<'_>) -> Vec<Event<'a>> {
        let mut events = Vec::new();
        walk::<()>(doc, |event, _| {
            events.push(event);
            Ok(())
        })
        .unwrap();
        events
    }

    #[test]
    fn test_events_in_document_order() {
        let xml = r#"<content><!-- note --><group name="gui">x</group></content>"#;
        let doc = Document::parse(xml).unwrap();
        let events = collect(&doc);

        assert_eq!(
            events,
            vec![
                Event::Start(Element::new("content", vec![])),
                Event::Start(Element::new("group", vec![("name", "gui")])),
                Event::Text("x"),
                Event::End("group"),
                Event::End("content"),
            ]
        );
    }

    #[test]
    fn test_event_positions() {
        let xml = "<content>\n  <group name=\"gui\"/>\n</content>";
        let doc = Document::parse(xml).unwrap();
        let mut group_position = None;
        walk::<()>(&doc, |event, position| {
            if matches!(&event, Event::Start(element) if element.name == "group") {
                group_position = Some(position);
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(group_position, Some(Position { line: 2, column: 3 }));
    }

    #[test]
    fn test_nested_elements_close_in_order() {
        let xml = "<content><group name=\"a\"><text id=\"t\"/></group><group name=\"b\"/></content>";
        let doc = Document::parse(xml).unwrap();
        let names: Vec<String> = collect(&doc)
            .into_iter()
            .map(|event| match event {
                Event::Start(element) => format!("+{}", element.name),
                Event::Text(text) => text.to_string(),
                Event::End(name) => format!("-{name}"),
            })
            .collect();

        assert_eq!(
            names,
            ["+content", "+group", "+text", "-text", "-group", "+group", "-group", "-content"]
        );
    }

    #[test]
    fn test_element_namespace_reported() {
        let xml = r#"<x:content xmlns:x="urn:other"><group/></x:content>"#;
        let doc = Document::parse(xml).unwrap();
        let events = collect(&doc);

        let Event::Start(root) = &events[0] else {
            panic!("expected start event, got {:?}", events[0]);
        };
        assert_eq!(root.name, "content");
        assert_eq!(root.namespace, Some("urn:other"));
        assert!(matches!(&events[1], Event::Start(element) if element.namespace.is_none()));
    }

    #[test]
    fn test_element_attribute_helpers() {
        let element = Element::new("lang", vec![("id", "en"), ("style", "bold")]);
        assert_eq!(element.attribute("id"), Some("en"));
        assert_eq!(element.attribute("country"), None);
        assert_eq!(element.unexpected_attribute(&["id", "country"]), Some("style"));
        assert_eq!(element.unexpected_attribute(&["id", "style"]), None);
    }
}
