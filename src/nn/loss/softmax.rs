use super::{LossCategory, LossLayer, check_label_matrix};
use crate::kernel::{GraphError, Symbol};
use crate::tensor::Tensor;
use std::any::Any;

/// softmax交叉熵损失
///
/// 对每一行得分`s`与标签`y`，损失为`-log(Σ(y·exp(s)) / Σexp(s))`，再对所有行取均值。
/// `y`不必是一位有效（one-hot）的：任意非负权重都按上式计算，全0的行得到正无穷。
///
/// 实际按`logsumexp(s) - logsumexp(s + ln(y))`构建，两项各自减去所在行的最大值，
/// 因此对任意大小的得分都保持有限。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftMaxLoss;

impl SoftMaxLoss {
    /// 逐行的`log(Σexp(x))`，形状为`[n, 1]`；`floor`为每行平移量的下限
    fn row_log_sum_exp(x: &Symbol, floor: Option<&Symbol>) -> Result<Symbol, GraphError> {
        let row_max = x.reduce_max_keep_dims(Some(1))?;
        // 整行都是负无穷时，平移量取下限，避免出现 -inf - (-inf)
        let shift = match floor {
            Some(floor) => row_max.maximum(floor)?,
            None => row_max,
        };
        x.try_sub(&shift)?
            .exp()?
            .reduce_sum_keep_dims(Some(1))?
            .log()?
            .try_add(&shift)
    }
}

impl LossLayer for SoftMaxLoss {
    fn name(&self) -> &str {
        "softmax"
    }

    fn loss_type(&self) -> LossCategory {
        LossCategory::Classification
    }

    fn loss_function_with_label(
        &self,
        input: &Symbol,
        label_matrix: &Tensor,
    ) -> Result<(Symbol, Symbol), GraphError> {
        check_label_matrix(self.name(), input, label_matrix)?;
        let label = input.constant_like(label_matrix)?;

        // log(Σ(y·exp(s))) = logsumexp(s + ln(y))，y为0处 ln(y) = -inf
        let floor = input.constant_like(&Tensor::scalar(f32::MIN))?;
        let weighted = input.try_add(&label.log()?)?;
        let log_numerator = Self::row_log_sum_exp(&weighted, Some(&floor))?;
        let log_denominator = Self::row_log_sum_exp(input, None)?;

        let loss = log_denominator.try_sub(&log_numerator)?.reduce_mean(None)?;
        Ok((loss, label))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
