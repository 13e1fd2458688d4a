use serde::{Deserialize, Serialize};

use super::var_type::VarType;

/// Application mode the workflow is embedded in. Gates which system and
/// conversation variables are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    Workflow,
    Chat,
}

impl AppMode {
    pub fn is_chat(&self) -> bool {
        matches!(self, AppMode::Chat)
    }
}

/// Workflow-scoped environment variable, visible to every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    #[serde(rename = "type", default = "default_env_type")]
    pub var_type: VarType,
}

fn default_env_type() -> VarType {
    VarType::String
}

/// Workflow-scoped conversation variable, visible in chat mode only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationVariable {
    pub name: String,
    #[serde(rename = "type", default = "default_env_type")]
    pub var_type: VarType,
}

/// Workflow-level metadata the snapshot carries alongside nodes and edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMeta {
    #[serde(default = "default_app_mode")]
    pub app_mode: AppMode,
    #[serde(default)]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(default)]
    pub conversation_variables: Vec<ConversationVariable>,
}

fn default_app_mode() -> AppMode {
    AppMode::Workflow
}

impl Default for WorkflowMeta {
    fn default() -> Self {
        Self {
            app_mode: AppMode::Workflow,
            environment_variables: Vec::new(),
            conversation_variables: Vec::new(),
        }
    }
}

impl WorkflowMeta {
    pub fn chat() -> Self {
        Self {
            app_mode: AppMode::Chat,
            ..Default::default()
        }
    }
}
