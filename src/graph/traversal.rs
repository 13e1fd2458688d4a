use std::collections::{HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use super::snapshot::GraphSnapshot;
use super::types::GraphNode;

impl GraphSnapshot {
    /// 返回对 node_id 可见的上游节点集合（发现顺序近到远）
    ///
    /// 只沿入边回溯，互斥分支的兄弟路径不可达，自然被排除；
    /// 汇合节点的每条入边分支都属于它的历史。
    /// 容器内部节点先看同层历史，再看容器自身的上游；
    /// 容器本身不在结果里（目录层把它作为伪数据源单独追加）。
    ///
    /// node_id 不存在时返回空集合（节点可能正在被删除）。
    pub fn before_nodes_in_same_branch(&self, node_id: &str) -> Vec<&GraphNode> {
        let mut result = Vec::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        self.collect_before_nodes(node_id, &mut visited, &mut result);
        tracing::trace!(node_id, count = result.len(), "resolved upstream nodes");
        result
    }

    /// 同上，但把外层容器链也追加到结果末尾
    pub fn before_nodes_in_same_branch_include_parent(&self, node_id: &str) -> Vec<&GraphNode> {
        let mut result = self.before_nodes_in_same_branch(node_id);
        result.extend(self.parent_chain(node_id));
        result
    }

    fn collect_before_nodes<'a>(
        &'a self,
        node_id: &str,
        visited: &mut HashSet<NodeIndex>,
        result: &mut Vec<&'a GraphNode>,
    ) {
        let Some(start_idx) = self.node_index(node_id) else {
            return;
        };
        let Some(origin) = self.graph.node_weight(start_idx) else {
            return;
        };
        let scope = origin.parent_id.as_deref();

        // 同层作用域内沿入边 BFS
        visited.insert(start_idx);
        let mut queue = VecDeque::from([start_idx]);
        while let Some(idx) = queue.pop_front() {
            for pred_idx in self.graph.neighbors_directed(idx, Direction::Incoming) {
                if visited.contains(&pred_idx) {
                    continue;
                }
                let Some(pred) = self.graph.node_weight(pred_idx) else {
                    continue;
                };
                // 容器边界：内外互不可见
                if pred.parent_id.as_deref() != scope {
                    continue;
                }
                visited.insert(pred_idx);
                result.push(pred);
                queue.push_back(pred_idx);
            }
        }

        // 容器内部节点还能看到容器上游的历史
        if let Some(parent_id) = scope {
            self.collect_before_nodes(parent_id, visited, result);
        }
    }

    /// 容器内部子树的终端节点（容器自身输出选择器用）
    ///
    /// 范围限定为 parent_id == container_id 的节点；
    /// 从内部入口（没有来自内部的入边）向前遍历，
    /// 收集没有内部后继的节点。空容器返回空集合。
    pub fn tree_leaf_nodes(&self, container_id: &str) -> Vec<&GraphNode> {
        if !self.contains(container_id) {
            return Vec::new();
        }

        // 1. 容器内部的节点
        let inner: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .node_weight(idx)
                    .is_some_and(|n| n.parent_id.as_deref() == Some(container_id))
            })
            .collect();
        let inner_set: HashSet<NodeIndex> = inner.iter().copied().collect();

        // 2. 内部入口：没有来自内部节点的入边
        let entries: Vec<NodeIndex> = inner
            .iter()
            .copied()
            .filter(|&idx| {
                !self
                    .graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .any(|p| inner_set.contains(&p))
            })
            .collect();

        // 3. 前向遍历收集终端节点
        let mut leaves = Vec::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        for entry in entries {
            let mut stack = vec![entry];
            while let Some(idx) = stack.pop() {
                if !visited.insert(idx) {
                    continue;
                }
                let successors: Vec<NodeIndex> = self
                    .graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .filter(|s| inner_set.contains(s))
                    .collect();
                if successors.is_empty() {
                    if let Some(node) = self.graph.node_weight(idx) {
                        leaves.push(node);
                    }
                } else {
                    stack.extend(successors);
                }
            }
        }
        leaves
    }
}
