use serde::{Deserialize, Deserializer, Serialize};

/// DSL-facing type markers for declared node outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarType {
    String,
    Number,
    Boolean,
    Object,
    ArrayString,
    ArrayNumber,
    ArrayObject,
    File,
    ArrayFile,
    Array,
    Secret,
    Any,
}

impl<'de> Deserialize<'de> for VarType {
    /// Accepts the serde `snake_case` spellings (`array_string`, …) as well as
    /// the DSL spellings the reference engine accepts (`array[string]`, …).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let snake = match raw.as_str() {
            "string" => Some(VarType::String),
            "number" => Some(VarType::Number),
            "boolean" => Some(VarType::Boolean),
            "object" => Some(VarType::Object),
            "array_string" => Some(VarType::ArrayString),
            "array_number" => Some(VarType::ArrayNumber),
            "array_object" => Some(VarType::ArrayObject),
            "file" => Some(VarType::File),
            "array_file" => Some(VarType::ArrayFile),
            "array" => Some(VarType::Array),
            "secret" => Some(VarType::Secret),
            "any" => Some(VarType::Any),
            _ => None,
        };
        snake
            .or_else(|| VarType::from_dsl_type(&raw))
            .ok_or_else(|| serde::de::Error::custom(format!("unknown VarType: `{}`", raw)))
    }
}

impl VarType {
    pub fn from_dsl_type(t: &str) -> Option<Self> {
        match t.trim().to_lowercase().as_str() {
            "string" => Some(VarType::String),
            "number" => Some(VarType::Number),
            "boolean" => Some(VarType::Boolean),
            "object" => Some(VarType::Object),
            "array[string]" => Some(VarType::ArrayString),
            "array[number]" => Some(VarType::ArrayNumber),
            "array[object]" => Some(VarType::ArrayObject),
            "file" => Some(VarType::File),
            "array[file]" => Some(VarType::ArrayFile),
            "array[any]" | "array" => Some(VarType::Array),
            "secret" => Some(VarType::Secret),
            _ => None,
        }
    }

    /// Whether a variable of this type satisfies `expected`.
    /// `Any` is a wildcard on both sides; `Array` accepts every array shape.
    pub fn matches(&self, expected: &VarType) -> bool {
        match expected {
            VarType::Any => true,
            VarType::Array => matches!(
                self,
                VarType::Array
                    | VarType::ArrayString
                    | VarType::ArrayNumber
                    | VarType::ArrayObject
                    | VarType::ArrayFile
            ),
            _ => self == expected || *self == VarType::Any,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, VarType::File | VarType::ArrayFile)
    }

    /// Types whose values may carry fields beyond any declared schema.
    /// A selector may address a deeper sub-path under these even when the
    /// catalog declares no children.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            VarType::Object
                | VarType::File
                | VarType::ArrayObject
                | VarType::ArrayFile
                | VarType::Any
        )
    }
}
