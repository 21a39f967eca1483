use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Zip;
use std::cmp::PartialEq;

impl From<f32> for Tensor {
    /// 实现 From<f32> trait 用于将`f32`类型转换为形状为`[1]`的张量
    fn from(scalar: f32) -> Self {
        Tensor::scalar(scalar)
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// 为张量批量实现某个二元运算符（含纯数、引用/非引用的全部组合），
/// 张量之间的运算统一走`Tensor::broadcast_zip`
macro_rules! impl_tensor_binary_op {
    ($trait:ident, $method:ident, $operator:expr, $f:expr) => {
        impl std::ops::$trait<Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: Tensor) -> Tensor {
                Tensor::from(self).broadcast_zip(&tensor, $operator, $f)
            }
        }
        impl std::ops::$trait<&Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: &Tensor) -> Tensor {
                Tensor::from(self).broadcast_zip(tensor, $operator, $f)
            }
        }
        impl std::ops::$trait<f32> for Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                self.map(|x| $f(x, scalar))
            }
        }
        impl std::ops::$trait<f32> for &Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                self.map(|x| $f(x, scalar))
            }
        }
        impl std::ops::$trait for Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                self.broadcast_zip(&other, $operator, $f)
            }
        }
        impl std::ops::$trait<&Tensor> for Tensor {
            type Output = Tensor;
            fn $method(self, other: &Tensor) -> Tensor {
                self.broadcast_zip(other, $operator, $f)
            }
        }
        impl std::ops::$trait<Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                self.broadcast_zip(&other, $operator, $f)
            }
        }
        impl std::ops::$trait<&Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: &Tensor) -> Tensor {
                self.broadcast_zip(other, $operator, $f)
            }
        }
    };
}
pub(in crate::tensor) use impl_tensor_binary_op;

impl Tensor {
    /// 两个张量逐元素运算，支持 NumPy 风格广播（broadcasting）
    ///
    /// # Panics
    /// 如果形状不兼容（无法广播）
    pub(in crate::tensor) fn broadcast_zip(
        &self,
        other: &Tensor,
        operator: Operator,
        f: impl Fn(f32, f32) -> f32,
    ) -> Tensor {
        let shape = Self::broadcast_shape(self.shape(), other.shape()).unwrap_or_else(|| {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            )
        });
        let lhs = self.broadcast_view(&shape);
        let rhs = other.broadcast_view(&shape);
        Tensor {
            data: Zip::from(&lhs).and(&rhs).map_collect(|&a, &b| f(a, b)),
        }
    }

    /// 对每个元素施加`f`，返回新张量
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Tensor {
        Tensor {
            data: self.data.mapv(f),
        }
    }

    pub fn exp(&self) -> Tensor {
        self.map(f32::exp)
    }

    /// 自然对数
    pub fn ln(&self) -> Tensor {
        self.map(f32::ln)
    }

    /// 逐元素取两者中的较大值（支持广播）
    pub fn maximum(&self, other: &Tensor) -> Tensor {
        self.broadcast_zip(other, Operator::Maximum, f32::max)
    }

    /// 逐元素比较：`self >= other` 处为1，否则为0（支持广播）
    pub fn ge_mask(&self, other: &Tensor) -> Tensor {
        self.broadcast_zip(other, Operator::Maximum, |a, b| if a >= b { 1.0 } else { 0.0 })
    }

    /// 返回一个拷贝，其中等于`value`的元素被替换为`replacement`
    pub fn where_eq(&self, value: f32, replacement: f32) -> Tensor {
        self.map(|x| if x == value { replacement } else { x })
    }
}
