/*
 * @Description  : 损失层（loss layer）
 *
 * 每个损失层都由输入（得分）符号和标签矩阵构建出一个标量损失符号。
 * 内置的有：
 * - `SoftMaxLoss`：softmax交叉熵
 * - `SVMLoss`：多分类SVM合页（hinge）损失
 *
 * 按名称选择损失层时，通过`LossRegistry`注册表和`Loss`句柄完成。
 */

mod error;
mod handle;
mod registry;
mod softmax;
mod svm;
mod with_label;

use crate::kernel::{GraphError, Symbol};
use crate::tensor::Tensor;
use std::any::Any;

pub use error::LossError;
pub use handle::{Loss, LossConfig};
pub use registry::{LossConstructor, LossRegistry};
pub use softmax::SoftMaxLoss;
pub use svm::SVMLoss;
pub use with_label::{
    softmax_loss, softmax_loss_and_label_symbol, softmax_loss_with_label,
    softmax_loss_with_label_and_label_symbol, svm_loss, svm_loss_and_label_symbol,
    svm_loss_with_label, svm_loss_with_label_and_label_symbol,
};

/// 损失的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossCategory {
    Classification,
    Regression,
}

/// 损失层：由输入符号和标签数据计算出一个标量损失符号
pub trait LossLayer: Any {
    fn name(&self) -> &str;

    fn loss_type(&self) -> LossCategory;

    /// 构建损失符号，同时返回图中代表标签的那个常量符号
    fn loss_function_with_label(
        &self,
        input: &Symbol,
        label_matrix: &Tensor,
    ) -> Result<(Symbol, Symbol), GraphError>;

    /// 构建损失符号
    fn loss_function(&self, input: &Symbol, label_matrix: &Tensor) -> Result<Symbol, GraphError> {
        self.loss_function_with_label(input, label_matrix)
            .map(|(loss, _)| loss)
    }

    /// 用于向下转型（downcast）到具体的损失层类型
    fn as_any(&self) -> &dyn Any;
}

/// 检查输入为`[n, k]`的2阶符号，且标签矩阵与之形状一致
fn check_label_matrix(
    loss_name: &str,
    input: &Symbol,
    label_matrix: &Tensor,
) -> Result<(), GraphError> {
    let input_shape = input.shape();
    if input_shape.len() != 2 {
        return Err(GraphError::DimensionMismatch {
            expected: 2,
            got: input_shape.len(),
            message: format!("{loss_name}损失的输入必须是形状为[n, k]的2阶张量"),
        });
    }
    if label_matrix.dimension() != 2 {
        return Err(GraphError::DimensionMismatch {
            expected: 2,
            got: label_matrix.dimension(),
            message: format!("{loss_name}损失的标签矩阵必须是2阶张量"),
        });
    }
    if label_matrix.shape() != input_shape.as_slice() {
        return Err(GraphError::ShapeMismatch {
            expected: input_shape,
            got: label_matrix.shape().to_vec(),
            message: format!("{loss_name}损失的标签矩阵形状与输入不一致"),
        });
    }
    Ok(())
}
