use super::{invalid_parent_index, parent_at};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 逐元素自然对数 C = ln(A)
#[derive(Clone)]
pub(in crate::kernel) struct Log {
    shape: Vec<usize>,
}

impl Log {
    pub(in crate::kernel) fn new(input: &[usize]) -> Self {
        Self {
            shape: input.to_vec(),
        }
    }
}

impl TraitNode for Log {
    fn type_name(&self) -> &'static str {
        "log"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Log
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parent_at(parents, 0, "Log")?.ln())
    }

    /// ∂L/∂A = upstream_grad / A
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index != 0 {
            return Err(invalid_parent_index("Log", parent_index));
        }
        Ok(upstream_grad / parent_at(parents, 0, "Log")?)
    }
}
