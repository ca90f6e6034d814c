//! Typed accessors over untyped operation results
//!
//! Operations return the `return` payload as a `serde_json::Value`. Leaf
//! values arrive as text, so numeric accessors parse strings as well.

use serde_json::Value;

/// Convenience lookups on an operation result
pub trait OperationResult {
    /// Value at a dotted path, e.g. `"customer.cardNo"`
    fn field(&self, path: &str) -> Option<&Value>;

    /// Text at `path`
    fn field_str(&self, path: &str) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }

    /// Integer at `path`, parsed from text if needed
    fn field_i64(&self, path: &str) -> Option<i64> {
        match self.field(path)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Number at `path`, parsed from text if needed
    fn field_f64(&self, path: &str) -> Option<f64> {
        match self.field(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Items at `path`; a single element is returned as a one-item list
    fn field_list(&self, path: &str) -> Vec<&Value> {
        match self.field(path) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![other],
        }
    }
}

impl OperationResult for Value {
    fn field(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |current, segment| current.get(segment))
    }
}
