use async_graphql::parser::types::{
    DocumentOperations, Field, Selection as AstSelection, SelectionSet,
};

use crate::error::{Error, Result};
use crate::selection::{Arg, Selection, SelectionField};

/// Compiles a selection document into an ordered list of [`Selection`].
///
/// The document is a bare set of field selections (`posts(id: 1) { name }`),
/// optionally wrapped in a single selection named `query`. The wrapper is
/// stripped so that `query { a b }` parses identically to `a b`.
pub fn parse(document: &str) -> Result<Vec<Selection>> {
    let document = async_graphql::parser::parse_query(format!("{{ {} }}", document))?;

    let selection_set = match &document.operations {
        DocumentOperations::Single(operation) => &operation.node.selection_set.node,
        DocumentOperations::Multiple(_) => {
            return Err(Error::UnsupportedSelection("named operation".to_string()))
        }
    };

    Ok(unwrap_query_root(to_selections(selection_set)?))
}

fn to_selections(selection_set: &SelectionSet) -> Result<Vec<Selection>> {
    let mut selections = Vec::with_capacity(selection_set.items.len());
    for item in &selection_set.items {
        match &item.node {
            AstSelection::Field(field) => selections.push(to_selection(&field.node)?),
            AstSelection::FragmentSpread(spread) => {
                return Err(Error::UnsupportedSelection(format!(
                    "fragment spread `{}`",
                    spread.node.fragment_name.node
                )))
            }
            AstSelection::InlineFragment(_) => {
                return Err(Error::UnsupportedSelection("inline fragment".to_string()))
            }
        }
    }
    Ok(selections)
}

fn to_selection(field: &Field) -> Result<Selection> {
    let name = field.name.node.to_string();
    if name == "_" {
        return Ok(Selection::All);
    }

    let alias = field.alias.as_ref().map(|alias| alias.node.to_string());

    let mut args = Vec::with_capacity(field.arguments.len());
    for (arg_name, value) in &field.arguments {
        let value = value
            .node
            .clone()
            .into_const()
            .ok_or_else(|| Error::UnsupportedVariable(arg_name.node.to_string()))?
            .into_json()?;
        args.push(Arg { name: arg_name.node.to_string(), value });
    }

    let selection = to_selections(&field.selection_set.node)?;

    Ok(Selection::Field(SelectionField { name, alias, args, selection }))
}

/// Strips one level of a redundant `query { ... }` wrapper. The wrapper is
/// only recognized when it is the sole top-level selection and carries no
/// alias or arguments of its own.
fn unwrap_query_root(selections: Vec<Selection>) -> Vec<Selection> {
    if selections.len() != 1 {
        return selections;
    }

    match selections.into_iter().next() {
        Some(Selection::Field(field))
            if field.name == "query"
                && field.alias.is_none()
                && field.args.is_empty()
                && !field.selection.is_empty() =>
        {
            field.selection
        }
        Some(other) => vec![other],
        None => vec![],
    }
}
