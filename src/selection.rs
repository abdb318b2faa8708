use derive_setters::Setters;
use serde_json::Value;

/// One compiled entry of a selection document.
///
/// A field literally named `_` is lifted into [`Selection::All`] at parse
/// time; the projector honors it only as the first element of a selection
/// list (see [`crate::project()`]).
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(SelectionField),
    All,
}

#[derive(Clone, Debug, PartialEq, Setters)]
pub struct SelectionField {
    pub name: String,
    pub alias: Option<String>,
    pub args: Vec<Arg>,
    pub selection: Vec<Selection>,
}

/// A single field argument. Duplicate names are legal and retained in
/// document order.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub name: String,
    pub value: Value,
}

impl SelectionField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: Default::default(),
            args: Default::default(),
            selection: Default::default(),
        }
    }

    /// The key this selection's data is stored under in the merged output.
    pub fn output_key(&self) -> &str {
        match &self.alias {
            Some(alias) if !alias.is_empty() => alias.as_str(),
            _ => self.name.as_str(),
        }
    }
}

impl Arg {
    pub fn new(name: &str, value: Value) -> Self {
        Self { name: name.to_string(), value }
    }
}
