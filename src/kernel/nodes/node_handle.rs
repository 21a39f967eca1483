use super::raw_node::{NodeType, TraitNode};
use super::NodeId;
use crate::kernel::GraphError;
use crate::tensor::Tensor;
use std::fmt;

/// 图中节点的统一包装：记录身份信息、当前值与梯度，具体运算由`raw_node`负责
#[derive(Clone)]
pub(in crate::kernel) struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    last_forward_pass_id: u64,
}

impl NodeHandle {
    pub(in crate::kernel) fn new<T: Into<NodeType>>(raw_node: T) -> Self {
        Self {
            id: NodeId(0),
            name: String::new(),
            raw_node: raw_node.into(),
            value: None,
            grad: None,
            last_forward_pass_id: 0,
        }
    }

    /// 带初始值创建（常量、变量）
    pub(in crate::kernel) fn with_value<T: Into<NodeType>>(raw_node: T, value: &Tensor) -> Self {
        let mut handle = Self::new(raw_node);
        handle.value = Some(value.clone());
        handle
    }

    pub(in crate::kernel) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.id = id;
        self.name = name.to_string();
    }

    pub(in crate::kernel) const fn id(&self) -> NodeId {
        self.id
    }

    pub(in crate::kernel) fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::kernel) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::kernel) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(in crate::kernel) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    pub(in crate::kernel) const fn is_leaf(&self) -> bool {
        matches!(
            self.raw_node,
            NodeType::Constant(_) | NodeType::Variable(_) | NodeType::Placeholder(_)
        )
    }

    pub(in crate::kernel) const fn is_constant(&self) -> bool {
        matches!(self.raw_node, NodeType::Constant(_))
    }

    pub(in crate::kernel) const fn is_variable(&self) -> bool {
        matches!(self.raw_node, NodeType::Variable(_))
    }

    pub(in crate::kernel) const fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    pub(in crate::kernel) const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// 手动设置节点的值：只有变量和占位符可以，且形状必须与声明的一致
    pub(in crate::kernel) fn set_value(&mut self, value: &Tensor) -> Result<(), GraphError> {
        match self.raw_node {
            NodeType::Variable(_) | NodeType::Placeholder(_) => {}
            _ => {
                return Err(GraphError::InvalidOperation(format!(
                    "{self}的值不能被手动设置"
                )));
            }
        }
        if value.shape() != self.value_expected_shape() {
            return Err(GraphError::ShapeMismatch {
                expected: self.value_expected_shape().to_vec(),
                got: value.shape().to_vec(),
                message: format!("{self}的新值形状与声明的形状不一致"),
            });
        }
        self.value = Some(value.clone());
        Ok(())
    }

    /// 前向传播中写入计算结果
    pub(in crate::kernel) fn set_computed_value(&mut self, value: Tensor, pass_id: u64) {
        self.value = Some(value);
        self.last_forward_pass_id = pass_id;
    }

    pub(in crate::kernel) fn calc_value_by_parents(
        &self,
        parents: &[&Tensor],
    ) -> Result<Tensor, GraphError> {
        self.raw_node.calc_value_by_parents(parents)
    }

    pub(in crate::kernel) fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let value = self.value.as_ref().ok_or_else(|| {
            GraphError::ComputationError(format!("{self}没有值，请先执行 forward"))
        })?;
        self.raw_node
            .calc_grad_to_parent(parent_index, parents, value, upstream_grad)
    }

    pub(in crate::kernel) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::kernel) fn set_last_forward_pass_id(&mut self, pass_id: u64) {
        self.last_forward_pass_id = pass_id;
    }

    pub(in crate::kernel) const fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// 累加梯度（同一节点被多次使用时各路梯度求和）
    pub(in crate::kernel) fn accumulate_grad(&mut self, grad: &Tensor) {
        self.grad = Some(match self.grad.take() {
            Some(existing) => existing + grad,
            None => grad.clone(),
        });
    }

    pub(in crate::kernel) fn clear_grad(&mut self) {
        self.grad = None;
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "节点[{}]({}, {})", self.name, self.type_name(), self.id)
    }
}
