mod leaf;
mod ops;

pub(in crate::kernel) use leaf::{Constant, Placeholder, Variable};
pub(in crate::kernel) use ops::*;

use crate::kernel::{GraphError, NodeTypeDescriptor};
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
#[derive(Clone)]
pub(in crate::kernel) enum NodeType {
    Constant,
    Variable,
    Placeholder,
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Negative,
    Add,
    Subtract,
    Multiply,
    Divide,
    MatMul,
    Exp,
    Log,
    Maximum,
    ReduceSum,
    ReduceMean,
    ReduceMax,
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}

#[enum_dispatch(NodeType)]
pub(in crate::kernel) trait TraitNode {
    /// 节点类型名，用于自动命名（如"add_3"）和错误信息
    fn type_name(&self) -> &'static str;

    fn descriptor(&self) -> NodeTypeDescriptor;

    /// 节点值的形状，在节点创建时就已确定
    fn value_expected_shape(&self) -> &[usize];

    // 根据父节点的值计算本节点的值（父节点的值已由Graph预先计算好，按父节点的顺序传入）
    fn calc_value_by_parents(&self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}节点没有父节点，其值不能通过前向传播计算",
            self.type_name()
        )))
    }

    /// 计算损失对第`parent_index`个父节点的梯度（VJP）
    ///
    /// `value`为本节点的当前值，`upstream_grad`为损失对本节点的梯度（形状同`value`）；
    /// 返回值的形状与该父节点一致（广播出来的维度已被求和折叠）
    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}节点没有父节点，无法向父节点传播梯度",
            self.type_name()
        )))
    }
}
