//! User-defined field attached to a ledger entry.

use serde::{Deserialize, Serialize};

use meridian_wire::{Element, Result};

use crate::mapper::{self, WireObject};

/// A name/value pair for a custom dimension the remote company has defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

impl CustomField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        CustomField {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl WireObject for CustomField {
    const WIRE_NAME: &'static str = "customfield";

    fn to_fields(&self) -> Vec<Element> {
        let mut fields = Vec::new();
        mapper::push_text(&mut fields, "customfieldname", Some(&self.name));
        mapper::push_text(&mut fields, "customfieldvalue", Some(&self.value));
        fields
    }

    fn from_element(element: &Element) -> Result<Self> {
        Ok(CustomField {
            name: mapper::required_text(element, "customfieldname")?,
            value: mapper::required_text(element, "customfieldvalue")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let field = CustomField::new("project_code", "APOLLO");
        let element = Element::parent(CustomField::WIRE_NAME, field.to_fields());
        assert_eq!(CustomField::from_element(&element).unwrap(), field);
    }

    #[test]
    fn test_field_order() {
        let fields = CustomField::new("a", "b").to_fields();
        assert_eq!(fields[0].name(), "customfieldname");
        assert_eq!(fields[1].name(), "customfieldvalue");
    }
}
