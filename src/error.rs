//! Engine error types.

use thiserror::Error;

/// Contract violations reported by the snapshot validator.
///
/// Resolution calls never error for mid-edit states (missing node id, empty
/// container, unknown selector root); those come back as empty results.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),
    #[error("Duplicate output name: node={node_id}, name={name}")]
    DuplicateVarName { node_id: String, name: String },
    #[error("Cycle detected in graph")]
    CycleDetected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_error_display() {
        assert_eq!(
            ScopeError::DuplicateNodeId("n1".into()).to_string(),
            "Duplicate node id: n1"
        );
        assert_eq!(
            ScopeError::DuplicateVarName {
                node_id: "llm".into(),
                name: "text".into()
            }
            .to_string(),
            "Duplicate output name: node=llm, name=text"
        );
        assert_eq!(
            ScopeError::CycleDetected.to_string(),
            "Cycle detected in graph"
        );
    }
}
