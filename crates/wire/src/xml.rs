//! XML rendering and parsing for wire element trees.
//!
//! Both directions stream through `quick-xml` events. Rendering emits an
//! XML declaration followed by the recursive element tree; parsing folds
//! the event stream back into an [`Element`], trimming whitespace-only
//! text and ignoring comments and processing instructions. The wire
//! protocol has no mixed content, so an element carrying both text and
//! children is rejected as malformed.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::element::{Content, Element};
use crate::error::{Result, WireError};

/// Renders a document: XML declaration plus the element tree.
pub fn render_document(root: &Element) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;
    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    match element.content() {
        Content::Empty => {
            writer.write_event(Event::Empty(start))?;
        }
        Content::Text(text) => {
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Text(BytesText::new(text)))?;
            writer.write_event(Event::End(BytesEnd::new(element.name())))?;
        }
        Content::Children(children) => {
            writer.write_event(Event::Start(start))?;
            for child in children {
                write_element(writer, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(element.name())))?;
        }
    }

    Ok(())
}

/// Parses a document into its root element.
pub fn parse_document(input: &[u8]) -> Result<Element> {
    let text = std::str::from_utf8(input)
        .map_err(|e| WireError::malformed(format!("invalid UTF-8: {e}")))?;
    parse_str(text)
}

/// Parses a document from a string slice.
pub fn parse_str(input: &str) -> Result<Element> {
    // Text fragments are accumulated verbatim and trimmed once per element:
    // trimming per event would corrupt values split around entity
    // references ("Fish &amp; Chips").
    let mut reader = Reader::from_str(input);

    let mut buf = Vec::new();
    let mut stack: Vec<PendingElement> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| WireError::malformed(format!("XML parse error: {e}")))?;
        match event {
            Event::Start(start) => {
                stack.push(PendingElement::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = PendingElement::from_start(&start)?.finish()?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let pending = stack
                    .pop()
                    .ok_or_else(|| WireError::malformed("unbalanced closing tag"))?;
                let element = pending.finish()?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = String::from_utf8_lossy(text.as_ref()).to_string();
                match stack.last_mut() {
                    Some(pending) => pending.text.push_str(&value),
                    None if value.trim().is_empty() => {}
                    None => {
                        return Err(WireError::malformed(format!(
                            "unexpected text outside the root element: {value:?}"
                        )));
                    }
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(data.as_ref()).to_string();
                match stack.last_mut() {
                    Some(pending) => pending.text.push_str(&value),
                    None => {
                        return Err(WireError::malformed("unexpected CDATA outside the root element"));
                    }
                }
            }
            Event::GeneralRef(reference) => {
                let resolved = resolve_reference(reference.as_ref())?;
                match stack.last_mut() {
                    Some(pending) => pending.text.push(resolved),
                    None => {
                        return Err(WireError::malformed(
                            "unexpected entity reference outside the root element",
                        ));
                    }
                }
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(WireError::malformed("unexpected end of document"));
    }
    root.ok_or_else(|| WireError::malformed("document has no root element"))
}

/// Resolves a general entity reference to its character. The wire protocol
/// only uses the five predefined XML entities and numeric character
/// references.
fn resolve_reference(name: &[u8]) -> Result<char> {
    match name {
        b"amp" => Ok('&'),
        b"lt" => Ok('<'),
        b"gt" => Ok('>'),
        b"quot" => Ok('"'),
        b"apos" => Ok('\''),
        _ => {
            let text = String::from_utf8_lossy(name);
            if let Some(digits) = text.strip_prefix("#x").or_else(|| text.strip_prefix("#X")) {
                u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| WireError::malformed(format!("bad character reference &{text};")))
            } else if let Some(digits) = text.strip_prefix('#') {
                digits
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| WireError::malformed(format!("bad character reference &{text};")))
            } else {
                Err(WireError::malformed(format!("unknown entity reference &{text};")))
            }
        }
    }
}

fn attach(stack: &mut Vec<PendingElement>, root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None => {
            if root.is_some() {
                return Err(WireError::malformed("document has more than one root element"));
            }
            *root = Some(element);
            Ok(())
        }
    }
}

/// An element still being assembled from the event stream.
struct PendingElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl PendingElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| WireError::malformed(format!("bad attribute: {e}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = String::from_utf8_lossy(&attr.value).to_string();
            attributes.push((key, value));
        }
        Ok(PendingElement {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn finish(self) -> Result<Element> {
        let text = self.text.trim();
        if !self.children.is_empty() && !text.is_empty() {
            return Err(WireError::malformed(format!(
                "element <{}> mixes text and child elements",
                self.name
            )));
        }

        let mut element = if !self.children.is_empty() {
            Element::parent(self.name, self.children)
        } else if !text.is_empty() {
            Element::text(self.name, text)
        } else {
            Element::empty(self.name)
        };

        for (key, value) in self.attributes {
            element = element.with_attribute(key, value);
        }
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Element {
        Element::parent(
            "request",
            vec![
                Element::parent(
                    "content",
                    vec![
                        Element::parent(
                            "function",
                            vec![Element::text("memo", "Fish & Chips <deluxe>")],
                        )
                        .with_attribute("controlid", "op-0"),
                        Element::empty("function").with_attribute("controlid", "op-1"),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_document_round_trip() {
        let tree = sample_tree();
        let rendered = render_document(&tree).unwrap();
        let parsed = parse_document(&rendered).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_render_escapes_text() {
        let rendered = render_document(&Element::text("memo", "a < b & c")).unwrap();
        let xml = String::from_utf8(rendered).unwrap();
        assert!(xml.contains("a &lt; b &amp; c"), "got {xml}");
    }

    #[test]
    fn test_parse_skips_declaration_and_comments() {
        let parsed = parse_str(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- preamble -->\n<response><status>success</status></response>",
        )
        .unwrap();
        assert_eq!(parsed.name(), "response");
        assert_eq!(parsed.child_text("status"), Some("success"));
    }

    #[test]
    fn test_parse_rejects_truncated_document() {
        assert!(matches!(
            parse_str("<response><status>success</status>"),
            Err(WireError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_multiple_roots() {
        assert!(matches!(
            parse_str("<a/><b/>"),
            Err(WireError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace_only_text_is_dropped() {
        let parsed = parse_str("<result>\n  <key>42</key>\n</result>").unwrap();
        assert_eq!(parsed.children().len(), 1);
        assert_eq!(parsed.child_text("key"), Some("42"));
    }
}
