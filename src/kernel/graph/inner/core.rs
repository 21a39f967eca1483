/*
 * @Description  : GraphInner 核心操作 + 前向传播
 */

use super::GraphInner;
use crate::kernel::nodes::NodeHandle;
use crate::kernel::{GraphError, NodeId};
use crate::tensor::Tensor;
use log::trace;
use std::collections::HashMap;

impl GraphInner {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            backward_edges: HashMap::new(),
            last_forward_pass_id: 0,
            last_backward_pass_id: 0,
            next_id: 0,
        }
    }

    // ========== 基础访问器 ==========

    pub(in crate::kernel) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 所有节点的 ID（升序）
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::kernel) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::kernel) fn get_node_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 先检查节点是否存在
        let _ = self.get_node(id)?;
        Ok(self.backward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_value_expected_shape(&self, id: NodeId) -> Result<&[usize], GraphError> {
        Ok(self.get_node(id)?.value_expected_shape())
    }

    pub fn get_node_value(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        Ok(self.get_node(id)?.value())
    }

    pub fn set_node_value(&mut self, id: NodeId, value: &Tensor) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value)
    }

    pub fn get_node_grad(&self, id: NodeId) -> Result<Option<&Tensor>, GraphError> {
        let node = self.get_node(id)?;
        if node.is_constant() {
            return Err(GraphError::InvalidOperation(format!(
                "常量{node}不应该有梯度"
            )));
        }
        Ok(node.grad())
    }

    /// 获取所有可训练的变量节点（升序）
    pub fn get_trainable_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.is_variable())
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// 找出`node_id`上游（含自身）的所有可训练变量（升序）
    pub fn get_upstream_trainable_nodes(&self, node_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let mut result: Vec<NodeId> = self
            .topological_sort(node_id)?
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(NodeHandle::is_variable))
            .collect();
        result.sort_unstable();
        Ok(result)
    }

    // ========== ID/名称生成 ==========

    pub(in crate::kernel::graph) fn generate_valid_node_id(&mut self) -> NodeId {
        // 先递增再返回，所以第一个节点 ID 是 1
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub(in crate::kernel::graph) fn check_duplicate_node_name(
        &self,
        name: &str,
    ) -> Result<(), GraphError> {
        if self.nodes.values().any(|node| node.name() == name) {
            return Err(GraphError::DuplicateNodeName(format!(
                "节点{}在图{}中重复",
                name,
                self.name()
            )));
        }
        Ok(())
    }

    pub(in crate::kernel::graph) fn generate_valid_new_node_name(
        &self,
        base_name: &str,
        node_type: &str,
    ) -> Result<String, GraphError> {
        if !base_name.is_empty() {
            self.check_duplicate_node_name(base_name)?;
            return Ok(base_name.to_string());
        }

        let mut counter = 1;
        loop {
            let name = format!("{node_type}_{counter}");
            if self.check_duplicate_node_name(&name).is_ok() {
                return Ok(name);
            }
            counter += 1;
        }
    }

    // ========== 前向传播 ==========

    /// 计算`node_id`及其所有上游节点的值，同一次传播中每个节点只计算一次
    pub fn forward(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let new_graph_forward_pass_id = self.last_forward_pass_id + 1;
        trace!(
            "图{}第{}次前向传播，目标节点{}",
            self.name, new_graph_forward_pass_id, node_id
        );
        self.forward_node_internal(node_id, new_graph_forward_pass_id)?;
        self.last_forward_pass_id = new_graph_forward_pass_id;
        Ok(())
    }

    fn forward_node_internal(
        &mut self,
        node_id: NodeId,
        new_graph_forward_pass_id: u64,
    ) -> Result<(), GraphError> {
        let node = self.get_node_mut(node_id)?;

        if node.is_leaf() {
            if node.has_value() {
                node.set_last_forward_pass_id(new_graph_forward_pass_id);
                return Ok(());
            }
            return Err(GraphError::InvalidOperation(format!(
                "占位符{node}没有值，请先通过 set_value 设置"
            )));
        }
        if node.last_forward_pass_id() == new_graph_forward_pass_id {
            return Ok(());
        }

        let parents_ids = self.get_node_parents(node_id)?;
        for parent_id in &parents_ids {
            self.forward_node_internal(*parent_id, new_graph_forward_pass_id)?;
        }

        let value = {
            let node = self.get_node(node_id)?;
            let parent_values = self.get_parent_values(node_id, &parents_ids)?;
            node.calc_value_by_parents(&parent_values)?
        };
        self.get_node_mut(node_id)?
            .set_computed_value(value, new_graph_forward_pass_id);

        Ok(())
    }

    /// 按运算数顺序收集父节点的值
    pub(in crate::kernel::graph) fn get_parent_values(
        &self,
        node_id: NodeId,
        parents_ids: &[NodeId],
    ) -> Result<Vec<&Tensor>, GraphError> {
        parents_ids
            .iter()
            .map(|&parent_id| {
                let parent = self.get_node(parent_id)?;
                parent.value().ok_or_else(|| {
                    GraphError::ComputationError(format!(
                        "节点{node_id}的父节点{parent}没有值，请先执行 forward"
                    ))
                })
            })
            .collect()
    }
}
