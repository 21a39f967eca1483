/*
 * @Description  : 张量的除法（逐元素，支持广播）。
 *                 张量之间相除遵循 IEEE 754 语义（除以0得到无穷或NaN）；
 *                 但张量除以纯数0会直接panic。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::Div;

impl Div<Tensor> for f32 {
    type Output = Tensor;

    fn div(self, tensor: Tensor) -> Tensor {
        Tensor::from(self).broadcast_zip(&tensor, Operator::Div, |a, b| a / b)
    }
}
impl Div<&Tensor> for f32 {
    type Output = Tensor;

    fn div(self, tensor: &Tensor) -> Tensor {
        Tensor::from(self).broadcast_zip(tensor, Operator::Div, |a, b| a / b)
    }
}

impl Div<f32> for Tensor {
    type Output = Tensor;

    fn div(self, scalar: f32) -> Tensor {
        &self / scalar
    }
}
impl Div<f32> for &Tensor {
    type Output = Tensor;

    fn div(self, scalar: f32) -> Tensor {
        assert!(scalar != 0., "{}", TensorError::DivByZero);
        self.map(|x| x / scalar)
    }
}

impl Div for Tensor {
    type Output = Tensor;

    fn div(self, other: Tensor) -> Tensor {
        self.broadcast_zip(&other, Operator::Div, |a, b| a / b)
    }
}
impl Div<&Tensor> for Tensor {
    type Output = Tensor;

    fn div(self, other: &Tensor) -> Tensor {
        self.broadcast_zip(other, Operator::Div, |a, b| a / b)
    }
}
impl Div<Tensor> for &Tensor {
    type Output = Tensor;

    fn div(self, other: Tensor) -> Tensor {
        self.broadcast_zip(&other, Operator::Div, |a, b| a / b)
    }
}
impl Div<&Tensor> for &Tensor {
    type Output = Tensor;

    fn div(self, other: &Tensor) -> Tensor {
        self.broadcast_zip(other, Operator::Div, |a, b| a / b)
    }
}
