/*
 * @Description  : 张量的乘法。这里的乘法是“逐元素”相乘（哈达玛积与数乘的结合），而非线性代数中的矩阵乘法；
 *                 矩阵乘法见`mat_mul.rs`。两个张量间的乘法支持 NumPy 风格广播。
 */

use super::others::impl_tensor_binary_op;
use crate::errors::Operator;
use crate::tensor::Tensor;

impl_tensor_binary_op!(Mul, mul, Operator::Mul, |a: f32, b: f32| a * b);
