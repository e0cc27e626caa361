//! Translation of medication filters into the openFDA search grammar.
//!
//! This is the only module that knows openFDA field names. Output is a plain
//! string; URL encoding is left to the HTTP client.

use crate::domain::MedicationFilter;

const MATCH_EVERYTHING: &str = "*";
const CONJUNCTION: &str = "+AND+";

/// Clean a free-text term and wrap it in wildcards.
///
/// Lowercases, drops everything outside `[a-z0-9]` and whitespace, then
/// collapses whitespace runs to one space.
pub(super) fn sanitise_text(term: &str) -> String {
    let kept = term
        .trim()
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace())
        .collect::<String>();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("*{collapsed}*")
}

/// Trim an identifier and wrap it in wildcards, keeping every character.
pub(super) fn sanitise_identifier(term: &str) -> String {
    format!("*{}*", term.trim())
}

/// Build the `search` parameter for a list query.
///
/// Clauses are joined in the order name, ingredient, route.
pub(super) fn build_search(filter: &MedicationFilter) -> String {
    let mut clauses = Vec::with_capacity(3);
    if let Some(name) = filter.name() {
        let term = sanitise_text(name);
        clauses.push(format!(
            "(brand_name:\"{term}\"+OR+generic_name:\"{term}\")"
        ));
    }
    if let Some(ingredient) = filter.active_ingredient() {
        clauses.push(format!(
            "active_ingredients.name:\"{}\"",
            sanitise_text(ingredient)
        ));
    }
    if let Some(route) = filter.route() {
        clauses.push(format!("route:\"{}\"", sanitise_text(route)));
    }

    if clauses.is_empty() {
        MATCH_EVERYTHING.to_owned()
    } else {
        clauses.join(CONJUNCTION)
    }
}

/// Build the `search` parameter for a product identifier lookup.
pub(super) fn build_identifier_search(id: &str) -> String {
    format!("product_id:{}", sanitise_identifier(id))
}
