use super::{binary_parents, broadcast_parent_shapes, invalid_parent_index};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 逐元素取较大值 C = max(A, B)（支持广播）
///
/// 两者相等时梯度全部归第一个父节点
#[derive(Clone)]
pub(in crate::kernel) struct Maximum {
    shape: Vec<usize>,
}

impl Maximum {
    pub(in crate::kernel) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        Ok(Self {
            shape: broadcast_parent_shapes("Maximum", left, right)?,
        })
    }
}

impl TraitNode for Maximum {
    fn type_name(&self) -> &'static str {
        "maximum"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Maximum
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Maximum")?;
        Ok(left.maximum(right))
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "Maximum")?;
        // 形状为广播后的形状：A >= B 处为1
        let left_wins = left.ge_mask(right);
        match parent_index {
            0 => Ok((upstream_grad * &left_wins).sum_to_shape(left.shape())),
            1 => Ok((upstream_grad * (1.0 - &left_wins)).sum_to_shape(right.shape())),
            _ => Err(invalid_parent_index("Maximum", parent_index)),
        }
    }
}
