/*
 * @Description  : 归约节点（求和、均值、最大值）。
 *                 `axis`为None时对全部元素归约，否则只沿该维度归约；
 *                 `keep_dims`为true时被归约的维度保留为1。输出形状见`Tensor::reduced_shape`
 */

use super::{invalid_parent_index, parent_at};
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;

/// 三种归约节点共用的参数与形状逻辑
#[derive(Clone)]
struct Reduction {
    axis: Option<usize>,
    keep_dims: bool,
    shape: Vec<usize>,
}

impl Reduction {
    fn new(
        op_name: &str,
        input: &[usize],
        axis: Option<usize>,
        keep_dims: bool,
    ) -> Result<Self, GraphError> {
        if let Some(axis) = axis {
            if axis >= input.len() {
                return Err(GraphError::DimensionMismatch {
                    expected: input.len(),
                    got: axis,
                    message: format!("{op_name}节点的归约维度{axis}超出输入的阶数"),
                });
            }
        }
        Ok(Self {
            axis,
            keep_dims,
            shape: Tensor::reduced_shape(input, axis, keep_dims),
        })
    }

    /// 沿`axis`（保留维度）或全部元素归约，结果统一整理成本节点的形状
    fn reduce(
        &self,
        input: &Tensor,
        over_all: impl Fn(&Tensor) -> Tensor,
        over_axis: impl Fn(&Tensor, usize) -> Tensor,
    ) -> Tensor {
        let reduced = match self.axis {
            None => over_all(input),
            Some(axis) => over_axis(input, axis),
        };
        reduced.reshape(&self.shape)
    }

    /// 把形状为输出形状的梯度还原成保留维度的形状，再广播回输入形状
    fn expand_grad(&self, upstream_grad: &Tensor, input_shape: &[usize]) -> Tensor {
        upstream_grad
            .reshape(&Tensor::reduced_shape(input_shape, self.axis, true))
            .broadcast_to(input_shape)
    }

    const fn descriptor_fields(&self) -> (Option<usize>, bool) {
        (self.axis, self.keep_dims)
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓求和↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[derive(Clone)]
pub(in crate::kernel) struct ReduceSum {
    reduction: Reduction,
}

impl ReduceSum {
    pub(in crate::kernel) fn new(
        input: &[usize],
        axis: Option<usize>,
        keep_dims: bool,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            reduction: Reduction::new("ReduceSum", input, axis, keep_dims)?,
        })
    }
}

impl TraitNode for ReduceSum {
    fn type_name(&self) -> &'static str {
        "reduce_sum"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        let (axis, keep_dims) = self.reduction.descriptor_fields();
        NodeTypeDescriptor::ReduceSum { axis, keep_dims }
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.reduction.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_at(parents, 0, "ReduceSum")?;
        Ok(self
            .reduction
            .reduce(input, Tensor::sum, |x, axis| x.sum_axis(axis, true)))
    }

    /// 求和的每个输入元素对输出的导数都是1
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index != 0 {
            return Err(invalid_parent_index("ReduceSum", parent_index));
        }
        let input = parent_at(parents, 0, "ReduceSum")?;
        Ok(self.reduction.expand_grad(upstream_grad, input.shape()))
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑求和↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓均值↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[derive(Clone)]
pub(in crate::kernel) struct ReduceMean {
    reduction: Reduction,
}

impl ReduceMean {
    pub(in crate::kernel) fn new(
        input: &[usize],
        axis: Option<usize>,
        keep_dims: bool,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            reduction: Reduction::new("ReduceMean", input, axis, keep_dims)?,
        })
    }
}

impl TraitNode for ReduceMean {
    fn type_name(&self) -> &'static str {
        "reduce_mean"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        let (axis, keep_dims) = self.reduction.descriptor_fields();
        NodeTypeDescriptor::ReduceMean { axis, keep_dims }
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.reduction.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_at(parents, 0, "ReduceMean")?;
        Ok(self
            .reduction
            .reduce(input, Tensor::mean, |x, axis| x.mean_axis(axis, true)))
    }

    /// 每个输入元素的导数为 1/n，n 为参与同一次平均的元素个数
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index != 0 {
            return Err(invalid_parent_index("ReduceMean", parent_index));
        }
        let input = parent_at(parents, 0, "ReduceMean")?;
        let count = (input.size() / value.size().max(1)).max(1) as f32;
        Ok(self.reduction.expand_grad(upstream_grad, input.shape()) / count)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑均值↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓最大值↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
/// 最大值的梯度只流向（每组中）第一个取到最大值的元素
#[derive(Clone)]
pub(in crate::kernel) struct ReduceMax {
    reduction: Reduction,
}

impl ReduceMax {
    pub(in crate::kernel) fn new(
        input: &[usize],
        axis: Option<usize>,
        keep_dims: bool,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            reduction: Reduction::new("ReduceMax", input, axis, keep_dims)?,
        })
    }
}

impl TraitNode for ReduceMax {
    fn type_name(&self) -> &'static str {
        "reduce_max"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        let (axis, keep_dims) = self.reduction.descriptor_fields();
        NodeTypeDescriptor::ReduceMax { axis, keep_dims }
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.reduction.shape
    }

    fn calc_value_by_parents(&self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let input = parent_at(parents, 0, "ReduceMax")?;
        Ok(self
            .reduction
            .reduce(input, Tensor::max, |x, axis| x.max_axis(axis, true)))
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if parent_index != 0 {
            return Err(invalid_parent_index("ReduceMax", parent_index));
        }
        let input = parent_at(parents, 0, "ReduceMax")?;
        let mask = input.argmax_mask(self.reduction.axis);
        Ok(self.reduction.expand_grad(upstream_grad, input.shape()) * mask)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑最大值↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
