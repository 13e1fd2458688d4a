use serde::{Deserialize, Serialize};

/// Node type tags (Dify-compatible, kebab-case on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    Start,
    End,
    Answer,
    Llm,
    KnowledgeRetrieval,
    IfElse,
    Code,
    TemplateTransform,
    QuestionClassifier,
    HttpRequest,
    Tool,
    VariableAggregator,
    Loop,
    Iteration,
    ParameterExtractor,
    #[serde(rename = "assigner")]
    VariableAssigner,
    DocumentExtractor,
    ListOperator,
    Agent,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .unwrap_or_else(|| format!("{:?}", self));
        write!(f, "{}", s)
    }
}

impl NodeType {
    /// Container nodes own a nested subgraph of inner nodes.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeType::Iteration | NodeType::Loop)
    }

    /// Branch nodes fan out into mutually exclusive paths.
    pub fn is_branch(&self) -> bool {
        matches!(self, NodeType::IfElse | NodeType::QuestionClassifier)
    }
}
