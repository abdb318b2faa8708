use serde_json::{Map, Value};

use crate::selection::Selection;

/// Restricts `value` to the fields named by `children`.
///
/// The rules apply in order:
/// 1. A leading [`Selection::All`] returns `value` verbatim and ignores the
///    rest of the list.
/// 2. An array distributes the same selection over every element, preserving
///    length and order, at any nesting depth.
/// 3. An object keeps exactly the requested keys: present leaves are copied
///    unchanged, present branches recurse, absent keys contribute nothing.
///    Output keys follow the selection's alias when one is set.
///
/// Any other value is treated as an empty mapping, so the function is total:
/// shape drift between the selection and the data can thin the output down
/// to nothing but never fails.
pub fn project(children: &[Selection], value: &Value) -> Value {
    if let Some(Selection::All) = children.first() {
        return value.clone();
    }

    match value {
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| project(children, item)).collect())
        }
        Value::Object(fields) => {
            let mut output = Map::new();
            for child in children {
                let field = match child {
                    Selection::Field(field) => field,
                    // honored only in first position, see rule 1
                    Selection::All => continue,
                };
                if let Some(found) = fields.get(field.name.as_str()) {
                    let projected = if field.selection.is_empty() {
                        found.clone()
                    } else {
                        project(&field.selection, found)
                    };
                    output.insert(field.output_key().to_string(), projected);
                }
            }
            Value::Object(output)
        }
        _ => Value::Object(Map::new()),
    }
}
