/*
 * @Description  : 逐元素除法节点
 *                 实现 C = A / B（element-wise division），支持广播
 */

use super::{binary_parents, broadcast_parent_shapes, invalid_parent_index};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

#[derive(Clone)]
pub(in crate::kernel) struct Divide {
    shape: Vec<usize>,
}

impl Divide {
    pub(in crate::kernel) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: broadcast_parent_shapes("Divide", left, right)?,
        })
    }
}

impl TraitNode for Divide {
    fn type_name(&self) -> &'static str {
        "divide"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Divide
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Divide")?;
        Ok(left / right)
    }

    /// - ∂L/∂A = upstream_grad / B
    /// - ∂L/∂B = -upstream_grad * A / B²
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Divide")?;
        match parent_index {
            0 => Ok((upstream_grad / right).sum_to_shape(left.shape())),
            1 => {
                let b_squared = right * right;
                let neg_grad_a = -(upstream_grad * left);
                Ok((neg_grad_a / b_squared).sum_to_shape(right.shape()))
            }
            _ => Err(invalid_parent_index("Divide", parent_index)),
        }
    }
}
