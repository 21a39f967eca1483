/*
 * @Description  : 张量的减法，规则同加法（支持广播），另实现了取负
 */

use super::others::impl_tensor_binary_op;
use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Neg;

impl_tensor_binary_op!(Sub, sub, Operator::Sub, |a: f32, b: f32| a - b);

impl Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        -&self
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map(|x| -x)
    }
}
