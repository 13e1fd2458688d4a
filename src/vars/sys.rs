use crate::model::{AppMode, VarType, WorkflowMeta};

use super::catalog::Variable;

fn sys(name: &str, var_type: VarType) -> Variable {
    Variable {
        variable: format!("sys.{}", name),
        var_type,
        children: Vec::new(),
    }
}

/// System-namespace variables offered for `app_mode`, spelled `sys.<name>`
/// (selector `["sys", "<name>"]`). Conversational variables are only offered
/// in chat mode.
pub fn system_vars(app_mode: AppMode) -> Vec<Variable> {
    let mut vars = Vec::new();
    if app_mode.is_chat() {
        vars.push(sys("query", VarType::String));
    }
    vars.push(sys("files", VarType::ArrayFile));
    if app_mode.is_chat() {
        vars.push(sys("conversation_id", VarType::String));
        vars.push(sys("dialogue_count", VarType::Number));
    }
    vars.push(sys("user_id", VarType::String));
    vars.push(sys("app_id", VarType::String));
    vars.push(sys("workflow_id", VarType::String));
    vars.push(sys("workflow_run_id", VarType::String));
    vars
}

/// Workflow-scoped environment variables (selector `["env", "<name>"]`).
pub fn env_vars(meta: &WorkflowMeta) -> Vec<Variable> {
    meta.environment_variables
        .iter()
        .map(|v| Variable {
            variable: v.name.clone(),
            var_type: v.var_type,
            children: Vec::new(),
        })
        .collect()
}

/// Conversation variables (selector `["conversation", "<name>"]`), chat mode only.
pub fn conversation_vars(meta: &WorkflowMeta) -> Vec<Variable> {
    if !meta.app_mode.is_chat() {
        return Vec::new();
    }
    meta.conversation_variables
        .iter()
        .map(|v| Variable {
            variable: v.name.clone(),
            var_type: v.var_type,
            children: Vec::new(),
        })
        .collect()
}
