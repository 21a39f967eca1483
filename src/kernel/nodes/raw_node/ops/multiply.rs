/*
 * @Description  : 逐元素乘法节点（Hadamard积），支持广播
 */

use super::{binary_parents, broadcast_parent_shapes, invalid_parent_index};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

#[derive(Clone)]
pub(in crate::kernel) struct Multiply {
    shape: Vec<usize>,
}

impl Multiply {
    pub(in crate::kernel) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: broadcast_parent_shapes("Multiply", left, right)?,
        })
    }
}

impl TraitNode for Multiply {
    fn type_name(&self) -> &'static str {
        "multiply"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Multiply
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Multiply")?;
        Ok(left * right)
    }

    /// 设 C = A ⊙ B：
    /// - ∂L/∂A = upstream_grad ⊙ B
    /// - ∂L/∂B = upstream_grad ⊙ A
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Multiply")?;
        match parent_index {
            0 => Ok((upstream_grad * right).sum_to_shape(left.shape())),
            1 => Ok((upstream_grad * left).sum_to_shape(right.shape())),
            _ => Err(invalid_parent_index("Multiply", parent_index)),
        }
    }
}
