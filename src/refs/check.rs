use crate::model::{ValueSelector, SYS_ROOT};
use crate::vars::{NodeOutputVar, Variable};

/// Whether `selector` resolves against the given catalog.
///
/// A node root resolves when the catalog has an entry for that node whose
/// variable chain matches every path segment. The `env` and `conversation`
/// roots resolve through their namespace entries; `sys` variables are looked
/// up by their `sys.<name>` spelling wherever they were attached.
pub fn selector_resolves(selector: &ValueSelector, catalog: &[NodeOutputVar]) -> bool {
    if !selector.is_well_formed() {
        return false;
    }
    let path = selector.path();
    if selector.root_id() == SYS_ROOT {
        let name = format!("sys.{}", path[0]);
        return catalog
            .iter()
            .any(|e| e.vars.iter().any(|v| v.variable == name));
    }
    let Some(entry) = catalog.iter().find(|e| e.node_id == selector.root_id()) else {
        return false;
    };
    resolve_path(&entry.vars, path)
}

fn resolve_path(vars: &[Variable], path: &[String]) -> bool {
    let Some((head, rest)) = path.split_first() else {
        return false;
    };
    let Some(var) = vars.iter().find(|v| v.variable == *head) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    if !var.children.is_empty() {
        return resolve_path(&var.children, rest);
    }
    // Structured outputs without a declared schema accept any deeper sub-path.
    var.var_type.is_structured()
}

/// Selectors in `selectors` that no longer resolve against `catalog`.
///
/// Malformed entries (arity < 2, empty segment) are skipped rather than
/// reported, so one corrupt field cannot block checking of the others.
pub fn not_exist_vars_in_selectors(
    selectors: &[ValueSelector],
    catalog: &[NodeOutputVar],
) -> Vec<ValueSelector> {
    selectors
        .iter()
        .filter(|s| s.is_well_formed())
        .filter(|s| !selector_resolves(s, catalog))
        .cloned()
        .collect()
}
