/*
 * @Description  : 张量的加法，实现了两个张量“逐元素”（或张量与纯数）相加的运算，并返回一个新的张量。
 *                 该运算支持以下情况：
 *                 1. 其中一个操作数为纯数而另一个为张量：则返回的张量形状与该张量相同。
 *                 2. 两个操作数均为张量：支持 NumPy 风格的广播（broadcasting）。
 */

use super::others::impl_tensor_binary_op;
use crate::errors::Operator;
use crate::tensor::Tensor;

impl_tensor_binary_op!(Add, add, Operator::Add, |a: f32, b: f32| a + b);
