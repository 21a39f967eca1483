use super::{binary_parents, broadcast_parent_shapes, invalid_parent_index};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 逐元素加法（支持广播）
#[derive(Clone)]
pub(in crate::kernel) struct Add {
    shape: Vec<usize>,
}

impl Add {
    pub(in crate::kernel) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: broadcast_parent_shapes("Add", left, right)?,
        })
    }
}

impl TraitNode for Add {
    fn type_name(&self) -> &'static str {
        "add"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Add
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Add")?;
        Ok(left + right)
    }

    /// ∂L/∂A = ∂L/∂B = upstream_grad（再折叠回各自的形状）
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Add")?;
        match parent_index {
            0 => Ok(upstream_grad.sum_to_shape(left.shape())),
            1 => Ok(upstream_grad.sum_to_shape(right.shape())),
            _ => Err(invalid_parent_index("Add", parent_index)),
        }
    }
}
