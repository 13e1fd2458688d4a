use serde::{Deserialize, Serialize};

use crate::model::ValueSelector;

use super::template;

/// Typed edit event carried from the panel performing a declared-output edit
/// to the configs elsewhere in the graph that reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VarChange {
    /// A declared output was renamed; dependent selectors are rewritten.
    Rename {
        node_id: String,
        before_key: String,
        after_key: String,
    },
    /// A declared output was removed. Dependent selectors are reported but
    /// left in place: they stay dangling and surface through the
    /// dangling-reference checks instead of being silently deleted.
    Remove { node_id: String, key: String },
}

/// Rewrite `[node_id, before_key, ...]` selector heads in place.
/// Returns the rewritten selectors (post-rename form) so the caller can
/// persist the configs of the affected nodes.
pub fn rename_in_selectors(
    selectors: &mut [ValueSelector],
    node_id: &str,
    before_key: &str,
    after_key: &str,
) -> Vec<ValueSelector> {
    let mut rewritten = Vec::new();
    for selector in selectors.iter_mut() {
        if selector.rename_head(node_id, before_key, after_key) {
            rewritten.push(selector.clone());
        }
    }
    if !rewritten.is_empty() {
        tracing::debug!(
            node_id,
            before_key,
            after_key,
            count = rewritten.len(),
            "propagated output rename"
        );
    }
    rewritten
}

/// Selectors referencing a removed output. Reported, never rewritten.
pub fn selectors_affected_by_remove(
    selectors: &[ValueSelector],
    node_id: &str,
    key: &str,
) -> Vec<ValueSelector> {
    selectors
        .iter()
        .filter(|s| s.points_at(node_id, key))
        .cloned()
        .collect()
}

/// Apply a change event to a selector store, returning the selectors the
/// event touches.
pub fn apply_change(selectors: &mut [ValueSelector], change: &VarChange) -> Vec<ValueSelector> {
    match change {
        VarChange::Rename {
            node_id,
            before_key,
            after_key,
        } => rename_in_selectors(selectors, node_id, before_key, after_key),
        VarChange::Remove { node_id, key } => {
            selectors_affected_by_remove(selectors, node_id, key)
        }
    }
}

/// Apply a change event to a free-text template.
/// Removals leave the text untouched for the same reason they leave
/// selectors in place.
pub fn apply_change_to_text(text: &str, change: &VarChange) -> (String, bool) {
    match change {
        VarChange::Rename {
            node_id,
            before_key,
            after_key,
        } => template::rename_in_text(text, node_id, before_key, after_key),
        VarChange::Remove { .. } => (text.to_string(), false),
    }
}
