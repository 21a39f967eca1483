/*
 * @Description  : 算子节点。每个算子在创建时推断输出形状，
 *                 前向时根据父节点的值计算本节点的值，反向时给出对各父节点的梯度（VJP）
 */

mod add;
mod divide;
mod exp;
mod log;
mod mat_mul;
mod maximum;
mod multiply;
mod negative;
mod reduce;
mod subtract;

pub(in crate::kernel) use add::Add;
pub(in crate::kernel) use divide::Divide;
pub(in crate::kernel) use exp::Exp;
pub(in crate::kernel) use log::Log;
pub(in crate::kernel) use mat_mul::MatMul;
pub(in crate::kernel) use maximum::Maximum;
pub(in crate::kernel) use multiply::Multiply;
pub(in crate::kernel) use negative::Negative;
pub(in crate::kernel) use reduce::{ReduceMax, ReduceMean, ReduceSum};
pub(in crate::kernel) use subtract::Subtract;

use crate::kernel::GraphError;
use crate::tensor::Tensor;

/// 两个父节点按广播规则运算后的形状
fn broadcast_parent_shapes(
    op_name: &str,
    left: &[usize],
    right: &[usize],
) -> Result<Vec<usize>, GraphError> {
    Tensor::broadcast_shape(left, right).ok_or_else(|| GraphError::ShapeMismatch {
        expected: left.to_vec(),
        got: right.to_vec(),
        message: format!("{op_name}节点的两个父节点形状无法广播"),
    })
}

/// 取第`index`个父节点的值
fn parent_at<'a>(
    parents: &[&'a Tensor],
    index: usize,
    op_name: &str,
) -> Result<&'a Tensor, GraphError> {
    parents.get(index).copied().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{op_name}节点的第{}个父节点没有值。不该触及本错误，否则说明crate代码有问题",
            index + 1
        ))
    })
}

/// 二元算子的两个父节点值
fn binary_parents<'a>(
    parents: &[&'a Tensor],
    op_name: &str,
) -> Result<(&'a Tensor, &'a Tensor), GraphError> {
    if parents.len() != 2 {
        return Err(GraphError::ComputationError(format!(
            "{op_name}节点需要正好2个父节点，实际为{}个",
            parents.len()
        )));
    }
    Ok((parents[0], parents[1]))
}

fn invalid_parent_index(op_name: &str, parent_index: usize) -> GraphError {
    GraphError::ComputationError(format!(
        "{op_name}节点不存在第{}个父节点",
        parent_index + 1
    ))
}
