use super::{invalid_parent_index, parent_at};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 取负 C = -A
#[derive(Clone)]
pub(in crate::kernel) struct Negative {
    shape: Vec<usize>,
}

impl Negative {
    pub(in crate::kernel) fn new(input: &[usize]) -> Self {
        Self {
            shape: input.to_vec(),
        }
    }
}

impl TraitNode for Negative {
    fn type_name(&self) -> &'static str {
        "negative"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Negative
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_at(parents, 0, "Negative")?;
        Ok(-input)
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index != 0 {
            return Err(invalid_parent_index("Negative", parent_index));
        }
        Ok(-upstream_grad)
    }
}
