/*
 * @Description  : 梯度下降优化器
 */

use super::{GraphError, Symbol};
use log::debug;

/// 梯度下降优化器：θ = θ - α * ∇θ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescentOptimizer {
    pub learning_rate: f32,
}

impl GradientDescentOptimizer {
    pub const fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }

    /// 执行一步训练：清零梯度、前向传播、反向传播，
    /// 然后更新`loss`上游的所有变量。返回本步（更新前）的损失值
    pub fn minimize(&self, loss: &Symbol) -> Result<f32, GraphError> {
        let graph = loss.get_graph();
        graph.zero_grad();
        let loss_value = loss.backward()?;

        let mut inner = graph.inner_mut();
        let trainable = inner.get_upstream_trainable_nodes(loss.node_id())?;
        for node_id in trainable {
            let node = inner.get_node(node_id)?;
            let (Some(value), Some(grad)) = (node.value(), node.grad()) else {
                continue;
            };
            let new_value = value - &(grad * self.learning_rate);
            inner.set_node_value(node_id, &new_value)?;
        }
        debug!(
            "梯度下降（学习率{}）完成一步，损失值为{loss_value}",
            self.learning_rate
        );
        Ok(loss_value)
    }

    /// 在同一个损失上重复`steps`次`minimize`，返回每一步的损失值
    pub fn minimize_steps(&self, loss: &Symbol, steps: usize) -> Result<Vec<f32>, GraphError> {
        (0..steps).map(|_| self.minimize(loss)).collect()
    }
}
