//! The object ↔ wire-element mapping contract.
//!
//! Serialization produces an ordered sequence of named elements, one per
//! declared field in declaration order. The omission rules are fixed by the
//! remote service:
//!
//! - an absent scalar emits nothing, never an empty placeholder element;
//! - an absent nested object emits nothing;
//! - an empty or absent nested array omits its container element entirely.
//!
//! Deserialization is tolerant in the other direction: readers look up only
//! the child names they know, ignore everything else, and report an absent
//! optional element as `None` rather than an error. An absent array
//! container decodes to `None`, which is distinct from a present-but-empty
//! container decoding to `Some(vec![])`.

use chrono::NaiveDate;
use meridian_wire::codec;
use meridian_wire::{Element, Result, WireError};
use rust_decimal::Decimal;

/// A type that maps to exactly one named wire element.
///
/// The associated `WIRE_NAME` is the type's total wire-name binding, fixed
/// at compile time. `from_element` is the type's construction capability:
/// it reads only the child names the type knows about, so additional remote
/// fields never break deserialization.
pub trait WireObject: Sized {
    /// The wire element name bound to this type.
    const WIRE_NAME: &'static str;

    /// Serializes the declared fields, in declaration order.
    fn to_fields(&self) -> Vec<Element>;

    /// Constructs an instance from one wire element.
    fn from_element(element: &Element) -> Result<Self>;
}

/// Appends `<name>value</name>` when the value is present.
pub fn push_text(fields: &mut Vec<Element>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        fields.push(Element::text(name, value));
    }
}

/// Appends a monetary amount in the fixed two-decimal rendering.
pub fn push_amount(fields: &mut Vec<Element>, name: &str, value: Decimal) {
    fields.push(Element::text(name, codec::encode_amount(value)));
}

/// Appends a date in its nested year/month/day shape when present.
pub fn push_date(fields: &mut Vec<Element>, name: &str, value: Option<NaiveDate>) {
    if let Some(date) = value {
        fields.push(codec::date_element(name, date));
    }
}

/// Appends a nested object wrapped in one named element when present.
pub fn push_object<T: WireObject>(fields: &mut Vec<Element>, name: &str, value: Option<&T>) {
    if let Some(object) = value {
        fields.push(Element::parent(name, object.to_fields()));
    }
}

/// Appends a named container holding one item element per array entry.
/// The item element name is the entry type's own wire name. An empty slice
/// emits nothing.
pub fn push_array<T: WireObject>(fields: &mut Vec<Element>, container: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    let children = items
        .iter()
        .map(|item| Element::parent(T::WIRE_NAME, item.to_fields()))
        .collect();
    fields.push(Element::parent(container, children));
}

/// Reads an optional text child.
pub fn child_text(element: &Element, name: &str) -> Option<String> {
    element.child_text(name).map(str::to_owned)
}

/// Reads a required text child.
pub fn required_text(element: &Element, name: &str) -> Result<String> {
    element
        .child_text(name)
        .map(str::to_owned)
        .ok_or_else(|| WireError::missing(element.name(), name))
}

/// Reads a required monetary amount child.
pub fn required_amount(element: &Element, name: &str) -> Result<Decimal> {
    let raw = element
        .child_text(name)
        .ok_or_else(|| WireError::missing(element.name(), name))?;
    codec::decode_amount(name, raw)
}

/// Reads an optional date child in its nested year/month/day shape.
pub fn child_date(element: &Element, name: &str) -> Result<Option<NaiveDate>> {
    match element.child(name) {
        Some(child) => codec::decode_date(child).map(Some),
        None => Ok(None),
    }
}

/// Reads an optional nested object child.
pub fn child_object<T: WireObject>(element: &Element, name: &str) -> Result<Option<T>> {
    match element.child(name) {
        Some(child) => T::from_element(child).map(Some),
        None => Ok(None),
    }
}

/// Reads an optional array container. `None` when the container element is
/// absent; `Some` with the items in document order when present. Children
/// whose name is not the item type's wire name are ignored.
pub fn child_array<T: WireObject>(element: &Element, name: &str) -> Result<Option<Vec<T>>> {
    let Some(container) = element.child(name) else {
        return Ok(None);
    };
    let mut items = Vec::new();
    for child in container.children() {
        if child.name() == T::WIRE_NAME {
            items.push(T::from_element(child)?);
        }
    }
    Ok(Some(items))
}
