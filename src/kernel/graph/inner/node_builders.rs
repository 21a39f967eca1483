/*
 * @Description  : GraphInner 节点构建方法（new_*_node）
 *                 所有形状校验都在这里（节点创建时）完成，前向传播不会再遇到形状不兼容
 */

use super::GraphInner;
use crate::kernel::nodes::raw_node::{
    Add, Constant, Divide, Exp, Log, MatMul, Maximum, Multiply, Negative, Placeholder, ReduceMax,
    ReduceMean, ReduceSum, Subtract, Variable,
};
use crate::kernel::nodes::NodeHandle;
use crate::kernel::{GraphError, NodeId};
use crate::tensor::Tensor;
use log::trace;

/// 归约运算的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceKind {
    Sum,
    Mean,
    Max,
}

impl GraphInner {
    /// 添加节点到列表
    pub(in crate::kernel::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_name =
            self.generate_valid_new_node_name(name.unwrap_or(""), node_handle.type_name())?;
        let node_id = self.generate_valid_node_id();

        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        trace!("图{}新增{node_handle}，父节点{parents:?}", self.name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    fn expected_shape_of(&self, id: NodeId) -> Result<Vec<usize>, GraphError> {
        Ok(self.get_node(id)?.value_expected_shape().to_vec())
    }

    fn binary_shapes(
        &self,
        left: NodeId,
        right: NodeId,
    ) -> Result<(Vec<usize>, Vec<usize>), GraphError> {
        Ok((self.expected_shape_of(left)?, self.expected_shape_of(right)?))
    }

    // ========== 叶子节点 ==========

    pub fn new_constant_node(
        &mut self,
        value: &Tensor,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::with_value(Constant::new(value.shape()), value);
        self.add_node_to_list(node, name, &[])
    }

    pub fn new_variable_node(
        &mut self,
        value: &Tensor,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = NodeHandle::with_value(Variable::new(value.shape()), value);
        self.add_node_to_list(node, name, &[])
    }

    pub fn new_placeholder_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(GraphError::InvalidOperation(format!(
                "占位符的形状{shape:?}无效：至少1阶且每个维度都大于0"
            )));
        }
        let node = NodeHandle::new(Placeholder::new(shape));
        self.add_node_to_list(node, name, &[])
    }

    // ========== 一元算子 ==========

    pub fn new_negative_node(
        &mut self,
        input: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.expected_shape_of(input)?;
        let node = NodeHandle::new(Negative::new(&shape));
        self.add_node_to_list(node, name, &[input])
    }

    pub fn new_exp_node(
        &mut self,
        input: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.expected_shape_of(input)?;
        let node = NodeHandle::new(Exp::new(&shape));
        self.add_node_to_list(node, name, &[input])
    }

    pub fn new_log_node(
        &mut self,
        input: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.expected_shape_of(input)?;
        let node = NodeHandle::new(Log::new(&shape));
        self.add_node_to_list(node, name, &[input])
    }

    /// 创建归约节点，`axis`为None表示对全部元素归约
    pub fn new_reduce_node(
        &mut self,
        kind: ReduceKind,
        input: NodeId,
        axis: Option<usize>,
        keep_dims: bool,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.expected_shape_of(input)?;
        let node = match kind {
            ReduceKind::Sum => NodeHandle::new(ReduceSum::new(&shape, axis, keep_dims)?),
            ReduceKind::Mean => NodeHandle::new(ReduceMean::new(&shape, axis, keep_dims)?),
            ReduceKind::Max => NodeHandle::new(ReduceMax::new(&shape, axis, keep_dims)?),
        };
        self.add_node_to_list(node, name, &[input])
    }

    // ========== 二元算子 ==========

    pub fn new_add_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left_shape, right_shape) = self.binary_shapes(left, right)?;
        let node = NodeHandle::new(Add::new(&left_shape, &right_shape)?);
        self.add_node_to_list(node, name, &[left, right])
    }

    pub fn new_subtract_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left_shape, right_shape) = self.binary_shapes(left, right)?;
        let node = NodeHandle::new(Subtract::new(&left_shape, &right_shape)?);
        self.add_node_to_list(node, name, &[left, right])
    }

    pub fn new_multiply_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left_shape, right_shape) = self.binary_shapes(left, right)?;
        let node = NodeHandle::new(Multiply::new(&left_shape, &right_shape)?);
        self.add_node_to_list(node, name, &[left, right])
    }

    pub fn new_divide_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left_shape, right_shape) = self.binary_shapes(left, right)?;
        let node = NodeHandle::new(Divide::new(&left_shape, &right_shape)?);
        self.add_node_to_list(node, name, &[left, right])
    }

    pub fn new_maximum_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left_shape, right_shape) = self.binary_shapes(left, right)?;
        let node = NodeHandle::new(Maximum::new(&left_shape, &right_shape)?);
        self.add_node_to_list(node, name, &[left, right])
    }

    pub fn new_mat_mul_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let (left_shape, right_shape) = self.binary_shapes(left, right)?;
        let node = NodeHandle::new(MatMul::new(&left_shape, &right_shape)?);
        self.add_node_to_list(node, name, &[left, right])
    }
}
