use crate::assert_panic;
use crate::tensor::Tensor;

#[test]
fn test_reduce_all() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.sum(), Tensor::new(&[21.], &[1]));
    assert_eq!(tensor.mean(), Tensor::new(&[3.5], &[1]));
    assert_eq!(tensor.max(), Tensor::new(&[6.], &[1]));
}

#[test]
fn test_reduce_axis() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_eq!(tensor.sum_axis(0, false), Tensor::new(&[5., 7., 9.], &[3]));
    assert_eq!(tensor.sum_axis(1, false), Tensor::new(&[6., 15.], &[2]));
    assert_eq!(tensor.sum_axis(1, true), Tensor::new(&[6., 15.], &[2, 1]));
    assert_eq!(tensor.mean_axis(1, false), Tensor::new(&[2., 5.], &[2]));
    assert_eq!(tensor.max_axis(0, true), Tensor::new(&[4., 5., 6.], &[1, 3]));
    // 对向量归约后阶数为0，结果形状为[1]
    let vector = Tensor::new(&[1., 2., 3.], &[3]);
    assert_eq!(vector.sum_axis(0, false), Tensor::new(&[6.], &[1]));
}

#[test]
fn test_reduce_axis_out_of_range() {
    let tensor = Tensor::new(&[1., 2.], &[2]);
    assert_panic!(tensor.sum_axis(1, false), "维度1超出范围（张量阶数为1）");
}

#[test]
fn test_reduced_shape() {
    assert_eq!(Tensor::reduced_shape(&[2, 3], None, false), vec![1]);
    assert_eq!(Tensor::reduced_shape(&[2, 3], None, true), vec![1, 1]);
    assert_eq!(Tensor::reduced_shape(&[2, 3], Some(1), false), vec![2]);
    assert_eq!(Tensor::reduced_shape(&[2, 3], Some(0), true), vec![1, 3]);
    assert_eq!(Tensor::reduced_shape(&[3], Some(0), false), vec![1]);
}

#[test]
fn test_argmax_mask() {
    let tensor = Tensor::new(&[1., 3., 3., 7., 2., 0.], &[2, 3]);
    // 并列时只标记第一个最大值
    assert_eq!(
        tensor.argmax_mask(Some(1)),
        Tensor::new(&[0., 1., 0., 1., 0., 0.], &[2, 3])
    );
    assert_eq!(
        tensor.argmax_mask(Some(0)),
        Tensor::new(&[0., 1., 1., 1., 0., 0.], &[2, 3])
    );
    assert_eq!(
        tensor.argmax_mask(None),
        Tensor::new(&[0., 0., 0., 1., 0., 0.], &[2, 3])
    );
}
