//! Variable catalog construction: which variables a node may reference.

mod catalog;
mod filters;
mod sys;

pub use catalog::{
    available_vars, AvailableVars, AvailableVarsOptions, NodeOutputVar, VarFilter, Variable,
};
pub use filters::{any_var, file_var};
pub use sys::{conversation_vars, env_vars, system_vars};
