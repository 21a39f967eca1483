use super::{binary_parents, invalid_parent_index};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 矩阵乘法 C = A · B，A 为[n, m]，B 为[m, p]，C 为[n, p]
#[derive(Clone)]
pub(in crate::kernel) struct MatMul {
    shape: Vec<usize>,
}

impl MatMul {
    pub(in crate::kernel) fn new(left: &[usize], right: &[usize]) -> Result<Self, GraphError> {
        for shape in [left, right] {
            if shape.len() != 2 {
                return Err(GraphError::DimensionMismatch {
                    expected: 2,
                    got: shape.len(),
                    message: "MatMul节点的父节点必须是2阶张量（矩阵）".to_string(),
                });
            }
        }
        if left[1] != right[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![left[1], right[1]],
                got: right.to_vec(),
                message: format!(
                    "MatMul节点的第1个父节点的列数（{}）须等于第2个父节点的行数（{}）",
                    left[1], right[0]
                ),
            });
        }
        Ok(Self {
            shape: vec![left[0], right[1]],
        })
    }
}

impl TraitNode for MatMul {
    fn type_name(&self) -> &'static str {
        "mat_mul"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::MatMul
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "MatMul")?;
        Ok(left.mat_mul(right))
    }

    /// - ∂L/∂A = upstream_grad · Bᵀ
    /// - ∂L/∂B = Aᵀ · upstream_grad
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (left, right) = binary_parents(parents, "MatMul")?;
        match parent_index {
            0 => Ok(upstream_grad.mat_mul(&right.transpose())),
            1 => Ok(left.transpose().mat_mul(upstream_grad)),
            _ => Err(invalid_parent_index("MatMul", parent_index)),
        }
    }
}
