/*
 * @Description  : 损失层的便捷函数。
 *                 `*_with_label`系列接受整数形式的类别标签，
 *                 先经`generate_label_matrix`转为一位有效标签矩阵。
 *                 生成的矩阵列数为不同类别的个数，须与输入的列数一致
 */

use super::{LossLayer, SVMLoss, SoftMaxLoss};
use crate::kernel::{GraphError, Symbol};
use crate::tensor::Tensor;
use crate::utils::generate_label_matrix;

pub fn softmax_loss(input: &Symbol, label_matrix: &Tensor) -> Result<Symbol, GraphError> {
    SoftMaxLoss.loss_function(input, label_matrix)
}

pub fn softmax_loss_and_label_symbol(
    input: &Symbol,
    label_matrix: &Tensor,
) -> Result<(Symbol, Symbol), GraphError> {
    SoftMaxLoss.loss_function_with_label(input, label_matrix)
}

pub fn svm_loss(input: &Symbol, label_matrix: &Tensor) -> Result<Symbol, GraphError> {
    SVMLoss.loss_function(input, label_matrix)
}

pub fn svm_loss_and_label_symbol(
    input: &Symbol,
    label_matrix: &Tensor,
) -> Result<(Symbol, Symbol), GraphError> {
    SVMLoss.loss_function_with_label(input, label_matrix)
}

pub fn softmax_loss_with_label<T: Ord + Copy>(
    input: &Symbol,
    classification: &[T],
) -> Result<Symbol, GraphError> {
    softmax_loss(input, &to_label_matrix(classification)?)
}

pub fn softmax_loss_with_label_and_label_symbol<T: Ord + Copy>(
    input: &Symbol,
    classification: &[T],
) -> Result<(Symbol, Symbol), GraphError> {
    softmax_loss_and_label_symbol(input, &to_label_matrix(classification)?)
}

pub fn svm_loss_with_label<T: Ord + Copy>(
    input: &Symbol,
    classification: &[T],
) -> Result<Symbol, GraphError> {
    svm_loss(input, &to_label_matrix(classification)?)
}

pub fn svm_loss_with_label_and_label_symbol<T: Ord + Copy>(
    input: &Symbol,
    classification: &[T],
) -> Result<(Symbol, Symbol), GraphError> {
    svm_loss_and_label_symbol(input, &to_label_matrix(classification)?)
}

fn to_label_matrix<T: Ord + Copy>(classification: &[T]) -> Result<Tensor, GraphError> {
    generate_label_matrix(classification)
        .map(|(label_matrix, _)| label_matrix)
        .map_err(|e| GraphError::InvalidOperation(format!("无法由类别标签生成标签矩阵：{e}")))
}
