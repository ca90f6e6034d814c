//! Conversion between XML elements and `serde_json::Value` trees

use serde_json::{Map, Value};
use xmltree::{Element, XMLNode};

/// Flat mapping from wire field name to value, in insertion order
pub type WireMap = Map<String, Value>;

/// Renders `value` as the element(s) named `name`
///
/// Arrays produce one element per item, all named `name`. Nested arrays are
/// flattened the same way.
pub fn value_to_elements(name: &str, value: &Value) -> Vec<Element> {
    match value {
        Value::Array(items) => items
            .iter()
            .flat_map(|item| value_to_elements(name, item))
            .collect(),
        other => vec![value_to_element(name, other)],
    }
}

fn value_to_element(name: &str, value: &Value) -> Element {
    let mut elem = Element::new(name);
    match value {
        Value::Null => {}
        Value::Bool(b) => elem.children.push(XMLNode::Text(b.to_string())),
        Value::Number(n) => elem.children.push(XMLNode::Text(n.to_string())),
        Value::String(s) => {
            if !s.is_empty() {
                elem.children.push(XMLNode::Text(s.clone()));
            }
        }
        Value::Object(map) => append_map(&mut elem, map),
        // handled by value_to_elements
        Value::Array(_) => {}
    }
    elem
}

/// Appends one child element per entry of `map` to `parent`
pub(crate) fn append_map(parent: &mut Element, map: &WireMap) {
    for (key, value) in map {
        for child in value_to_elements(key, value) {
            parent.children.push(XMLNode::Element(child));
        }
    }
}

/// Converts an element into a value tree
///
/// A leaf element yields its text, or `null` when it has none. Any other
/// element yields an object keyed by local names; repeated children become
/// arrays, attributes are stored under `@name` and text mixed with child
/// elements under `#text`.
pub fn element_to_value(elem: &Element) -> Value {
    let text = collect_text(elem);
    let has_children = elem.children.iter().any(|n| n.as_element().is_some());

    if !has_children && elem.attributes.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        };
    }

    let mut map = WireMap::new();
    for (name, value) in &elem.attributes {
        map.insert(format!("@{}", name), Value::String(value.clone()));
    }

    for child in elem.children.iter().filter_map(|n| n.as_element()) {
        let value = element_to_value(child);
        match map.get_mut(&child.name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(child.name.clone(), value);
            }
        }
    }

    if !text.is_empty() {
        map.insert("#text".to_string(), Value::String(text));
    }

    Value::Object(map)
}

fn collect_text(elem: &Element) -> String {
    let mut text = String::new();
    for node in &elem.children {
        match node {
            XMLNode::Text(t) | XMLNode::CData(t) => text.push_str(t),
            _ => {}
        }
    }
    text.trim().to_string()
}
