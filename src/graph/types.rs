use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::model::{NodeType, VarType};

/// 节点声明的一个输出变量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    /// 变量名（同一节点内唯一）
    pub name: String,

    /// 变量类型
    #[serde(rename = "type")]
    pub var_type: VarType,

    /// 描述
    #[serde(default)]
    pub description: String,

    /// 子变量（对象输出的一级结构，按点路径寻址）
    #[serde(default)]
    pub children: Vec<VarDecl>,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, var_type: VarType) -> Self {
        Self {
            name: name.into(),
            var_type,
            description: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<VarDecl>) -> Self {
        self.children = children;
        self
    }
}

/// 图节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// 节点 ID（对应图数据中的 id）
    pub id: String,

    /// 节点类型（llm, code, if-else 等）
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// 节点标题
    #[serde(default)]
    pub title: String,

    /// 所属容器节点 ID（iteration/loop 内部节点才有）
    /// 表示包含关系，不是数据流
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<String>,

    /// 声明的输出变量
    #[serde(default)]
    pub outputs: Vec<VarDecl>,
}

/// 图边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// 边 ID
    #[serde(default)]
    pub id: String,

    /// 源节点 ID
    pub source: String,

    /// 目标节点 ID
    pub target: String,

    /// 源句柄（true/false 分支、分类器类别等）
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
}

/// 节点 ID 到 petgraph NodeIndex 的映射
pub type NodeIndexMap = std::collections::HashMap<String, NodeIndex>;
