//! Reference scanning, validity checking, and rename propagation.

mod check;
mod rename;
mod template;

pub use check::{not_exist_vars_in_selectors, selector_resolves};
pub use rename::{
    apply_change, apply_change_to_text, rename_in_selectors, selectors_affected_by_remove,
    VarChange,
};
pub use template::{extract_refs, not_exist_vars_in_text, rename_in_text};
