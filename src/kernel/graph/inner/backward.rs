/*
 * @Description  : GraphInner VJP 反向传播
 */

use super::GraphInner;
use crate::kernel::{GraphError, NodeId};
use crate::tensor::Tensor;
use log::trace;
use std::collections::HashSet;

impl GraphInner {
    // ========== VJP 反向传播核心 ==========

    /// 从`loss`开始反向传播，返回损失的标量值
    ///
    /// 调用前须已对`loss`执行过 forward。中间节点的梯度在每次反向传播前都会被重置，
    /// 变量节点的梯度则会累加，直到调用`zero_grad`
    pub fn backward(&mut self, loss_id: NodeId) -> Result<f32, GraphError> {
        let loss_node = self.get_node(loss_id)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失{loss_node}没有值，请先执行 forward"))
        })?;
        let loss_scalar = loss_value.number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "反向传播要求损失只有1个元素，但{loss_node}的形状为{:?}",
                loss_value.shape()
            ))
        })?;
        let loss_grad = Tensor::ones(loss_value.shape());

        self.reset_intermediate_grad();
        self.get_node_mut(loss_id)?.accumulate_grad(&loss_grad);

        let topo_order = self.topological_sort(loss_id)?;
        // 逆拓扑序：每个节点在它的所有子节点之后才处理
        for &node_id in topo_order.iter().rev() {
            self.propagate_grad_to_parents(node_id)?;
        }

        self.last_backward_pass_id += 1;
        trace!(
            "图{}第{}次反向传播完成，损失值为{loss_scalar}",
            self.name, self.last_backward_pass_id
        );
        Ok(loss_scalar)
    }

    /// 将梯度从当前节点传播到其父节点
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        if parent_ids.is_empty() {
            return Ok(());
        }

        let parent_grads: Vec<(NodeId, Tensor)> = {
            let node = self.get_node(node_id)?;
            let upstream_grad = match node.grad() {
                Some(g) => g,
                None => return Ok(()),
            };
            let parent_values = self.get_parent_values(node_id, &parent_ids)?;

            let mut grads = Vec::with_capacity(parent_ids.len());
            for (index, &parent_id) in parent_ids.iter().enumerate() {
                if self.get_node(parent_id)?.is_constant() {
                    continue;
                }
                let grad = node.calc_grad_to_parent(index, &parent_values, upstream_grad)?;
                grads.push((parent_id, grad));
            }
            grads
        };

        for (parent_id, parent_grad) in parent_grads {
            self.get_node_mut(parent_id)?.accumulate_grad(&parent_grad);
        }

        Ok(())
    }

    /// `node_id`及其所有上游节点的拓扑序（父节点在前，`node_id`在最后）
    pub(in crate::kernel) fn topological_sort(
        &self,
        node_id: NodeId,
    ) -> Result<Vec<NodeId>, GraphError> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();

        fn dfs(
            graph: &GraphInner,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
            result: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                dfs(graph, parent_id, visited, result)?;
            }
            // 后序：所有父节点都已加入后才加入自身
            result.push(node_id);
            Ok(())
        }

        dfs(self, node_id, &mut visited, &mut result)?;
        Ok(result)
    }

    /// 重置变量以外所有节点的梯度
    fn reset_intermediate_grad(&mut self) {
        for node in self.nodes.values_mut() {
            if !node.is_variable() {
                node.clear_grad();
            }
        }
    }

    /// 清零所有节点的梯度
    pub fn zero_grad(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_grad();
        }
    }
}
