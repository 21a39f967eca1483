use super::{LossCategory, LossLayer, check_label_matrix};
use crate::kernel::{GraphError, Symbol};
use crate::tensor::Tensor;
use std::any::Any;

/// 多分类SVM合页（hinge）损失
///
/// 设类别数为`k`，先由标签矩阵构造间隔编码矩阵`m`：
/// 正确类别处为`-(k-1)`，其余位置为1。损失为`mean(max(Σ(m·s) + (k-1), 1))`，
/// 完全分开的样本损失为下限1。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SVMLoss;

impl SVMLoss {
    /// 由标签矩阵得到间隔编码矩阵（返回新张量，`label_matrix`本身不变）
    pub fn margin_matrix(label_matrix: &Tensor) -> Tensor {
        let k_minus_1 = label_matrix.shape()[1].saturating_sub(1) as f32;
        (label_matrix * -k_minus_1).where_eq(0., 1.)
    }
}

impl LossLayer for SVMLoss {
    fn name(&self) -> &str {
        "svm"
    }

    fn loss_type(&self) -> LossCategory {
        LossCategory::Classification
    }

    /// 返回的标签符号是间隔编码矩阵对应的常量
    fn loss_function_with_label(
        &self,
        input: &Symbol,
        label_matrix: &Tensor,
    ) -> Result<(Symbol, Symbol), GraphError> {
        check_label_matrix(self.name(), input, label_matrix)?;
        let k_minus_1 = label_matrix.shape()[1] as f32 - 1.;

        let margin = input.constant_like(&Self::margin_matrix(label_matrix))?;
        let offset = input.constant_like(&Tensor::scalar(k_minus_1))?;
        let floor = input.constant_like(&Tensor::scalar(1.))?;
        let loss = margin
            .try_mul(input)?
            .reduce_sum(Some(1))?
            .try_add(&offset)?
            .maximum(&floor)?
            .reduce_mean(None)?;
        Ok((loss, margin))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
