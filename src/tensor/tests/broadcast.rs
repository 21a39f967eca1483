use crate::assert_panic;
use crate::tensor::Tensor;

#[test]
fn test_broadcast_shape() {
    assert_eq!(Tensor::broadcast_shape(&[2, 3], &[2, 3]), Some(vec![2, 3]));
    assert_eq!(Tensor::broadcast_shape(&[2, 3], &[3]), Some(vec![2, 3]));
    assert_eq!(Tensor::broadcast_shape(&[2, 1], &[1, 4]), Some(vec![2, 4]));
    assert_eq!(Tensor::broadcast_shape(&[1], &[5, 2]), Some(vec![5, 2]));
    assert_eq!(Tensor::broadcast_shape(&[], &[3]), Some(vec![3]));
    assert_eq!(Tensor::broadcast_shape(&[2, 3], &[2]), None);
    assert_eq!(Tensor::broadcast_shape(&[4, 3], &[2, 3]), None);
}

#[test]
fn test_broadcast_to() {
    let tensor = Tensor::new(&[1., 2.], &[2, 1]);
    let broadcasted = tensor.broadcast_to(&[2, 3]);
    assert_eq!(broadcasted, Tensor::new(&[1., 1., 1., 2., 2., 2.], &[2, 3]));
}

#[test]
fn test_sum_to_shape() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    // 同形状直接返回
    assert_eq!(tensor.sum_to_shape(&[2, 3]), tensor);
    // 前导维度被消去
    assert_eq!(tensor.sum_to_shape(&[3]), Tensor::new(&[5., 7., 9.], &[3]));
    // 保留为1的维度
    assert_eq!(tensor.sum_to_shape(&[2, 1]), Tensor::new(&[6., 15.], &[2, 1]));
    assert_eq!(tensor.sum_to_shape(&[1, 3]), Tensor::new(&[5., 7., 9.], &[1, 3]));
    assert_eq!(tensor.sum_to_shape(&[1]), Tensor::new(&[21.], &[1]));
}

#[test]
fn test_sum_to_incompatible_shape() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_panic!(tensor.sum_to_shape(&[2]));
}

#[test]
fn test_reshape_and_transpose() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    let transposed = tensor.transpose();
    assert_eq!(transposed.shape(), &[3, 2]);
    assert_eq!(transposed.data_as_vec(), vec![1., 4., 2., 5., 3., 6.]);
    // 转置后再重塑，按逻辑顺序取元素
    assert_eq!(
        transposed.reshape(&[6]).data_as_vec(),
        vec![1., 4., 2., 5., 3., 6.]
    );
    assert_eq!(tensor.insert_axis(1).shape(), &[2, 1, 3]);
    assert_panic!(tensor.reshape(&[4]));
}
