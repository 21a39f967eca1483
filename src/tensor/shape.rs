use super::Tensor;
use crate::errors::TensorError;
use ndarray::{ArrayViewD, Axis, IxDyn};

impl Tensor {
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let total_elements: usize = self.data.len();
        let new_total_elements: usize = shape.iter().product();
        assert!(
            total_elements == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        // 先按行优先拷贝，使非标准布局（如转置后）的张量也能正确重塑
        Self::new(&self.data_as_vec(), shape)
    }

    /// 在`axis`处插入一个长度为1的维度
    pub fn insert_axis(&self, axis: usize) -> Self {
        assert!(
            axis <= self.dimension(),
            "{}",
            TensorError::AxisOutOfRange {
                axis,
                dimension: self.dimension(),
            }
        );
        Self {
            data: self.data.clone().insert_axis(Axis(axis)),
        }
    }

    /// 矩阵转置，仅接受2阶张量
    pub fn transpose(&self) -> Self {
        assert!(
            self.dimension() == 2,
            "{}",
            TensorError::InconsitentShape
        );
        Self {
            data: self.data.t().to_owned(),
        }
    }

    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓广播↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    /// 按 NumPy 规则计算两个形状广播后的形状，不兼容时返回None
    ///
    /// # 广播规则
    /// - 从右向左对齐维度
    /// - 每个维度必须相等，或其中一个为 1
    /// - 维度数不同时，较短的形状前面补 1
    pub fn broadcast_shape(shape_1: &[usize], shape_2: &[usize]) -> Option<Vec<usize>> {
        let rank = shape_1.len().max(shape_2.len());
        let mut result = vec![0; rank];
        for i in 0..rank {
            let d1 = if i < rank - shape_1.len() {
                1
            } else {
                shape_1[i - (rank - shape_1.len())]
            };
            let d2 = if i < rank - shape_2.len() {
                1
            } else {
                shape_2[i - (rank - shape_2.len())]
            };
            result[i] = match (d1, d2) {
                (a, b) if a == b => a,
                (1, b) => b,
                (a, 1) => a,
                _ => return None,
            };
        }
        Some(result)
    }

    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        Self::broadcast_shape(self.shape(), other.shape()).is_some()
    }

    pub(in crate::tensor) fn broadcast_view(&self, shape: &[usize]) -> ArrayViewD<'_, f32> {
        self.data
            .broadcast(IxDyn(shape))
            .unwrap_or_else(|| panic!("{}", TensorError::IncompatibleShape))
    }

    /// 将张量广播到目标形状（返回拷贝）
    pub fn broadcast_to(&self, shape: &[usize]) -> Self {
        Self {
            data: self.broadcast_view(shape).to_owned(),
        }
    }

    /// 广播的逆运算：对被广播出来的维度求和，使结果形状为`shape`。
    /// 反向传播时用于把梯度折叠回父节点的形状
    pub fn sum_to_shape(&self, shape: &[usize]) -> Self {
        if self.shape() == shape {
            return self.clone();
        }
        assert!(
            Self::broadcast_shape(self.shape(), shape).as_deref() == Some(self.shape()),
            "{}",
            TensorError::IncompatibleShape
        );

        let mut data = self.data.clone();
        // 1. 消去前导的多余维度
        while data.ndim() > shape.len() {
            data = data.sum_axis(Axis(0));
        }
        // 2. 目标为1而当前不为1的维度，求和并保留该维度
        for (axis, &dim) in shape.iter().enumerate() {
            if dim == 1 && data.shape()[axis] != 1 {
                data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
            }
        }
        Self { data }
    }
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑广播↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}
