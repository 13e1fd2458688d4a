use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Reserved root for system-provided variables (user query, uploaded files, ...).
pub const SYS_ROOT: &str = "sys";

/// Reserved root for workflow-scoped environment variables.
pub const ENV_ROOT: &str = "env";

/// Reserved root for conversation variables.
pub const CONVERSATION_ROOT: &str = "conversation";

/// A variable address: `[root_id, variable_name, ...sub_path]`.
///
/// `root_id` is either a node ID or one of the reserved namespace roots.
/// More than one path segment addresses a nested sub-variable (dotted access).
///
/// Well-formedness (arity >= 2, no empty segment) is a property of the selector
/// alone; whether it *resolves* is always relative to a specific node's current
/// catalog and must be re-checked after every graph edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValueSelector {
    parts: Vec<String>,
}

impl ValueSelector {
    pub fn new(root_id: impl Into<String>, variable_name: impl Into<String>) -> Self {
        Self {
            parts: vec![root_id.into(), variable_name.into()],
        }
    }

    /// Build a selector from raw segments without any shape check.
    /// Collection scans skip entries that fail [`ValueSelector::is_well_formed`].
    pub fn from_parts(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Parse a dotted reference string like `node1.text` or `sys.query`.
    /// Empty segments are dropped.
    pub fn parse_str(selector: &str) -> Self {
        let parts: Vec<String> = selector
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| p.trim().to_string())
            .collect();
        Self { parts }
    }

    /// Parse a JSON value holding either a string array or a dotted string.
    pub fn parse_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(arr) => {
                let mut parts = Vec::with_capacity(arr.len());
                for v in arr {
                    parts.push(v.as_str()?.to_string());
                }
                Some(Self { parts })
            }
            Value::String(s) => Some(Self::parse_str(s)),
            _ => None,
        }
    }

    /// Arity >= 2 and no empty segment.
    pub fn is_well_formed(&self) -> bool {
        self.parts.len() >= 2 && self.parts.iter().all(|p| !p.is_empty())
    }

    pub fn root_id(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }

    /// Path segments after the root (the variable name plus any sub-path).
    pub fn path(&self) -> &[String] {
        if self.parts.is_empty() {
            &[]
        } else {
            &self.parts[1..]
        }
    }

    /// The top-level variable name (first path segment).
    pub fn variable_name(&self) -> &str {
        self.parts.get(1).map(String::as_str).unwrap_or("")
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn is_namespace_root(&self) -> bool {
        matches!(self.root_id(), SYS_ROOT | ENV_ROOT | CONVERSATION_ROOT)
    }

    /// True when the selector heads with `[node_id, variable_name, ...]`.
    pub fn points_at(&self, node_id: &str, variable_name: &str) -> bool {
        self.root_id() == node_id && self.variable_name() == variable_name
    }

    /// Rewrite the variable-name segment in place. Returns whether the head
    /// matched `[node_id, before_key]`.
    pub(crate) fn rename_head(&mut self, node_id: &str, before_key: &str, after_key: &str) -> bool {
        if self.points_at(node_id, before_key) {
            self.parts[1] = after_key.to_string();
            true
        } else {
            false
        }
    }
}

impl std::fmt::Display for ValueSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}

impl From<Vec<String>> for ValueSelector {
    fn from(parts: Vec<String>) -> Self {
        Self { parts }
    }
}

impl Serialize for ValueSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.parts.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValueSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SelectorVisitor;

        impl<'de> serde::de::Visitor<'de> for SelectorVisitor {
            type Value = ValueSelector;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("selector string like 'node.var' or string array")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ValueSelector::parse_str(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut parts = Vec::new();
                while let Some(value) = seq.next_element::<String>()? {
                    parts.push(value);
                }
                Ok(ValueSelector::from_parts(parts))
            }
        }

        deserializer.deserialize_any(SelectorVisitor)
    }
}
