/*
 * @Description  : 张量的归约运算（求和、均值、最大值）。
 *                 - 不指定维度时对全部元素归约，返回形状为`[1]`的张量；
 *                 - 指定维度`axis`时，该维度被消去（`keep_dims`为true时保留为1）；
 *                   若消去后阶数为0，则结果形状为`[1]`。
 */

use crate::errors::TensorError;
use crate::tensor::Tensor;
use ndarray::{ArrayD, Axis, IxDyn};

impl Tensor {
    /// 对张量中的所有元素求和并返回一个形状为[1]的标量。
    pub fn sum(&self) -> Tensor {
        Tensor::from(self.data.sum())
    }

    /// 所有元素的均值（空张量得到NaN）
    pub fn mean(&self) -> Tensor {
        Tensor::from(self.data.sum() / self.size() as f32)
    }

    /// 所有元素中的最大值（空张量得到负无穷）
    pub fn max(&self) -> Tensor {
        Tensor::from(self.data.fold(f32::NEG_INFINITY, |acc, &x| acc.max(x)))
    }

    pub fn sum_axis(&self, axis: usize, keep_dims: bool) -> Tensor {
        self.check_axis(axis);
        Self::finish_reduction(self.data.sum_axis(Axis(axis)), axis, keep_dims)
    }

    pub fn mean_axis(&self, axis: usize, keep_dims: bool) -> Tensor {
        self.check_axis(axis);
        let count = self.shape()[axis] as f32;
        Self::finish_reduction(self.data.sum_axis(Axis(axis)) / count, axis, keep_dims)
    }

    pub fn max_axis(&self, axis: usize, keep_dims: bool) -> Tensor {
        self.check_axis(axis);
        let reduced = self
            .data
            .fold_axis(Axis(axis), f32::NEG_INFINITY, |&acc, &x| acc.max(x));
        Self::finish_reduction(reduced, axis, keep_dims)
    }

    /// 返回与自身同形状的掩码：沿`axis`（None表示全部元素）的第一个最大值处为1，其余为0
    pub fn argmax_mask(&self, axis: Option<usize>) -> Tensor {
        let mut mask = ArrayD::<f32>::zeros(self.data.raw_dim());
        match axis {
            None => {
                if let Some(index) = first_max_index(self.data.iter()) {
                    if let Some(x) = mask.iter_mut().nth(index) {
                        *x = 1.0;
                    }
                }
            }
            Some(axis) => {
                self.check_axis(axis);
                for (lane, mut mask_lane) in self
                    .data
                    .lanes(Axis(axis))
                    .into_iter()
                    .zip(mask.lanes_mut(Axis(axis)))
                {
                    if let Some(index) = first_max_index(lane.iter()) {
                        mask_lane[index] = 1.0;
                    }
                }
            }
        }
        Tensor { data: mask }
    }

    /// 归约指定维度后的形状
    pub fn reduced_shape(shape: &[usize], axis: Option<usize>, keep_dims: bool) -> Vec<usize> {
        match (axis, keep_dims) {
            (None, false) => vec![1],
            (None, true) => vec![1; shape.len().max(1)],
            (Some(axis), true) => {
                let mut result = shape.to_vec();
                result[axis] = 1;
                result
            }
            (Some(axis), false) => {
                let mut result = shape.to_vec();
                result.remove(axis);
                if result.is_empty() {
                    vec![1]
                } else {
                    result
                }
            }
        }
    }

    fn check_axis(&self, axis: usize) {
        assert!(
            axis < self.dimension(),
            "{}",
            TensorError::AxisOutOfRange {
                axis,
                dimension: self.dimension(),
            }
        );
    }

    fn finish_reduction(reduced: ArrayD<f32>, axis: usize, keep_dims: bool) -> Tensor {
        let data = if keep_dims {
            reduced.insert_axis(Axis(axis))
        } else if reduced.ndim() == 0 {
            let value = reduced.iter().next().copied().unwrap_or(f32::NAN);
            ArrayD::from_elem(IxDyn(&[1]), value)
        } else {
            reduced
        };
        Tensor { data }
    }
}

fn first_max_index<'a>(values: impl Iterator<Item = &'a f32>) -> Option<usize> {
    values
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &x)| match best {
            Some((_, best_x)) if best_x >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
}
