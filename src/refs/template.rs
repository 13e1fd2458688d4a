use regex::Regex;

use crate::model::ValueSelector;
use crate::vars::NodeOutputVar;

use super::check::selector_resolves;

const REFERENCE_PATTERN: &str = r"\{\{#([^#]+)#\}\}";

/// 提取文本中所有 {{#...#}} 变量引用（去掉定界符后的内文）
pub fn extract_refs(text: &str) -> Vec<String> {
    let re = Regex::new(REFERENCE_PATTERN).unwrap();
    re.captures_iter(text)
        .map(|cap| cap[1].trim().to_string())
        .collect()
}

/// References embedded in `text` that do not resolve against `catalog`.
///
/// Returns the human-readable reference strings, deduplicated in order of
/// first appearance. No reference syntax in the input means an empty result.
/// An interior that cannot even address a variable (fewer than two segments)
/// is a dangling reference and is reported too.
pub fn not_exist_vars_in_text(text: &str, catalog: &[NodeOutputVar]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for reference in extract_refs(text) {
        let selector = ValueSelector::parse_str(&reference);
        let resolved = selector.is_well_formed() && selector_resolves(&selector, catalog);
        if !resolved && !missing.contains(&reference) {
            missing.push(reference);
        }
    }
    missing
}

/// Rewrite `{{#node_id.before_key...#}}` references to the renamed key.
/// Matches whole path segments only, never substrings. Returns the rewritten
/// text and whether anything changed.
pub fn rename_in_text(
    text: &str,
    node_id: &str,
    before_key: &str,
    after_key: &str,
) -> (String, bool) {
    let re = Regex::new(REFERENCE_PATTERN).unwrap();
    let mut changed = false;
    let out = re.replace_all(text, |caps: &regex::Captures| {
        let mut selector = ValueSelector::parse_str(caps[1].trim());
        if selector.rename_head(node_id, before_key, after_key) {
            changed = true;
            format!("{{{{#{}#}}}}", selector)
        } else {
            caps[0].to_string()
        }
    });
    (out.into_owned(), changed)
}
