use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use ndarray::Ix2;

impl Tensor {
    /// 实现矩阵乘法。只接受2阶张量，否则会触发panic。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row），否则也会触发panic。
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        let shape_error = || TensorError::OperatorError {
            operator: Operator::MatMul,
            tensor1_shape: self.shape().to_vec(),
            tensor2_shape: other.shape().to_vec(),
        };
        assert!(
            self.dimension() == 2 && other.dimension() == 2 && self.shape()[1] == other.shape()[0],
            "{}",
            shape_error()
        );
        let lhs = self
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| panic!("{}", shape_error()));
        let rhs = other
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| panic!("{}", shape_error()));
        Tensor {
            data: lhs.dot(&rhs).into_dyn(),
        }
    }
}
