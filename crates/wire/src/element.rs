//! The ordered wire element tree.
//!
//! An [`Element`] is one named node in the exchanged document: a name, an
//! ordered attribute list, and content that is either text, an ordered list
//! of child elements, or nothing. Equality is structural, which is what the
//! round-trip tests lean on.

/// Content carried by an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    /// No content (`<name/>`).
    #[default]
    Empty,
    /// Character data (`<name>text</name>`).
    Text(String),
    /// Ordered child elements. Never empty: an element constructed with
    /// zero children normalizes to [`Content::Empty`].
    Children(Vec<Element>),
}

/// One named node in the exchanged wire document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    content: Content,
}

impl Element {
    /// Creates a text leaf: `<name>value</name>`.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Text(value.into()),
        }
    }

    /// Creates a parent element holding `children` in order.
    ///
    /// An empty child list normalizes to an empty element so that
    /// `parse(render(e)) == e` holds structurally.
    pub fn parent(name: impl Into<String>, children: Vec<Element>) -> Self {
        let content = if children.is_empty() {
            Content::Empty
        } else {
            Content::Children(children)
        };
        Element {
            name: name.into(),
            attributes: Vec::new(),
            content,
        }
    }

    /// Creates an element with no content: `<name/>`.
    pub fn empty(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            content: Content::Empty,
        }
    }

    /// Adds an attribute, preserving insertion order.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// The element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered attribute list.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Looks up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The element content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Character data, if this is a text leaf.
    pub fn text_value(&self) -> Option<&str> {
        match &self.content {
            Content::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The ordered child elements; empty for text leaves and empty elements.
    pub fn children(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children.as_slice(),
            _ => &[],
        }
    }

    /// Consumes the element and returns its children in order.
    pub fn into_children(self) -> Vec<Element> {
        match self.content {
            Content::Children(children) => children,
            _ => Vec::new(),
        }
    }

    /// The first child with the given name, if any. Unknown siblings are
    /// skipped, which keeps readers forward-compatible with additional
    /// remote fields.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children().iter().find(|child| child.name == name)
    }

    /// The text value of the named child, if the child exists and is a text
    /// leaf.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_lookup_skips_unknown_siblings() {
        let parent = Element::parent(
            "result",
            vec![
                Element::text("future_field", "ignored"),
                Element::text("status", "success"),
            ],
        );
        assert_eq!(parent.child_text("status"), Some("success"));
        assert_eq!(parent.child("missing"), None);
    }

    #[test]
    fn test_empty_parent_normalizes() {
        assert_eq!(Element::parent("customfields", vec![]), Element::empty("customfields"));
    }

    #[test]
    fn test_attribute_order_and_lookup() {
        let function = Element::empty("function")
            .with_attribute("controlid", "op-0")
            .with_attribute("extra", "x");
        assert_eq!(function.attr("controlid"), Some("op-0"));
        assert_eq!(function.attributes()[0].0, "controlid");
        assert_eq!(function.attr("absent"), None);
    }

    #[test]
    fn test_children_preserve_order() {
        let parent = Element::parent(
            "content",
            vec![
                Element::text("a", "1"),
                Element::text("a", "2"),
                Element::text("a", "3"),
            ],
        );
        let values: Vec<_> = parent
            .children()
            .iter()
            .filter_map(Element::text_value)
            .collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }
}
