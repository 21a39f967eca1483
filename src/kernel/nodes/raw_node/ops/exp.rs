use super::{invalid_parent_index, parent_at};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 逐元素自然指数 C = e^A
#[derive(Clone)]
pub(in crate::kernel) struct Exp {
    shape: Vec<usize>,
}

impl Exp {
    pub(in crate::kernel) fn new(input: &[usize]) -> Self {
        Self {
            shape: input.to_vec(),
        }
    }
}

impl TraitNode for Exp {
    fn type_name(&self) -> &'static str {
        "exp"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Exp
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parent_at(parents, 0, "Exp")?.exp())
    }

    /// ∂L/∂A = upstream_grad ⊙ e^A，其中 e^A 即本节点的值
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        _parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index != 0 {
            return Err(invalid_parent_index("Exp", parent_index));
        }
        Ok(upstream_grad * value)
    }
}
