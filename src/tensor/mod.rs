use ndarray::{Array, ArrayD, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::errors::TensorError;

mod ops {
    pub mod add;
    pub mod div;
    pub mod mat_mul;
    pub mod mul;
    pub mod others;
    pub mod reduce;
    pub mod sub;
}

mod print;
mod property;
mod shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: ArrayD<f32>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let expected_len: usize = shape.iter().product();
        assert!(
            data.len() == expected_len,
            "{}：数据长度为{}，而形状{:?}需要{}个元素",
            TensorError::IncompatibleShape,
            data.len(),
            shape,
            expected_len
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec())
            .unwrap_or_else(|_| panic!("{}", TensorError::IncompatibleShape));
        Self { data }
    }

    /// 创建一个所有元素都为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(0.0, shape)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::full(1.0, shape)
    }

    /// 创建一个形状为`[1]`的标量张量
    pub fn scalar(value: f32) -> Self {
        Self::new(&[value], &[1])
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间
    pub fn new_random(min: f32, max: f32, shape: &[usize]) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_random_with_rng(min, max, shape, &mut rng)
    }

    /// 同`new_random`，但使用指定的随机数生成器（便于复现）
    pub fn new_random_with_rng<R: Rng + ?Sized>(
        min: f32,
        max: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let uniform = Uniform::new_inclusive(min, max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }
}
