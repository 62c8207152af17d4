use serde_json::{Map, Value};

/// Root path of a JSON value
pub const ROOT_PATH: &str = "$";

/// Path of an object member below `parent` (`$.key`)
pub fn member_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

/// Path of an array element below `parent` (`$[index]`)
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}

/// Visitor pattern for traversing JSON values immutably
///
/// This trait provides default implementations that walk the entire value.
/// Objects are walked in member order and arrays in index order. Override
/// specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_value(&mut self, value: &Value, path: &str) {
        walk_value(self, value, path);
    }

    fn visit_object(&mut self, object: &Map<String, Value>, path: &str) {
        walk_object(self, object, path);
    }

    fn visit_array(&mut self, items: &[Value], path: &str) {
        walk_array(self, items, path);
    }

    /// Called for every string-valued object member
    fn visit_string_member(&mut self, _key: &str, _value: &str, _path: &str) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations

pub fn walk_value<V: Visitor>(visitor: &mut V, value: &Value, path: &str) {
    match value {
        Value::Object(object) => visitor.visit_object(object, path),
        Value::Array(items) => visitor.visit_array(items, path),
        _ => {}
    }
}

pub fn walk_object<V: Visitor>(visitor: &mut V, object: &Map<String, Value>, path: &str) {
    for (key, nested) in object {
        let nested_path = member_path(path, key);
        match nested {
            Value::String(s) => visitor.visit_string_member(key, s, &nested_path),
            other => visitor.visit_value(other, &nested_path),
        }
    }
}

pub fn walk_array<V: Visitor>(visitor: &mut V, items: &[Value], path: &str) {
    for (index, item) in items.iter().enumerate() {
        visitor.visit_value(item, &index_path(path, index));
    }
}
