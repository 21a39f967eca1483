use crate::tensor::Tensor;

#[test]
fn test_print_matrix() {
    let tensor = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    let expected = "[[  1.0000,   2.0000],\n [  3.0000,   4.0000]]\n形状: [2, 2]\n";
    assert_eq!(format!("{tensor}"), expected);
}

#[test]
fn test_print_vector_and_high_rank() {
    let tensor = Tensor::new(&[1., -2.], &[2]);
    assert_eq!(format!("{tensor}"), "[  1.0000,  -2.0000]\n形状: [2]\n");

    let tensor = Tensor::zeros(&[1, 1, 2]);
    assert_eq!(
        format!("{tensor}"),
        "<对于阶数大于二（rank>2）的张量（形状：[1, 1, 2]）无法展示具体数据>\n"
    );
}
