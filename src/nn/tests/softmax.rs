use super::assert_tensor_near;
use crate::assert_err;
use crate::kernel::{Graph, GraphError};
use crate::nn::{LossCategory, LossLayer, SoftMaxLoss};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_softmax_loss_of_uniform_scores() {
    let graph = Graph::new();
    let scores = graph.variable(&Tensor::zeros(&[2, 3]), Some("scores")).unwrap();
    let label = Tensor::new(&[1., 0., 0., 0., 1., 0.], &[2, 3]);

    let loss = SoftMaxLoss.loss_function(&scores, &label).unwrap();
    assert_eq!(loss.shape(), vec![1]);
    assert_abs_diff_eq!(loss.backward().unwrap(), 3f32.ln(), epsilon = 1e-6);

    // d(loss)/d(scores) = (softmax - label) / n
    let third = 1. / 3.;
    let expected = Tensor::new(
        &[
            (third - 1.) / 2.,
            third / 2.,
            third / 2.,
            third / 2.,
            (third - 1.) / 2.,
            third / 2.,
        ],
        &[2, 3],
    );
    assert_tensor_near(&scores.grad().unwrap().unwrap(), &expected);
}

#[test]
fn test_softmax_loss_value() {
    let graph = Graph::new();
    let scores = graph.constant(&Tensor::new(&[1., 2., 3.], &[1, 3])).unwrap();
    let label = Tensor::new(&[0., 0., 1.], &[1, 3]);

    let loss = SoftMaxLoss.loss_function(&scores, &label).unwrap();
    let expected = (1f32.exp() + 2f32.exp() + 3f32.exp()).ln() - 3.;
    assert_abs_diff_eq!(loss.eval().unwrap().number().unwrap(), expected, epsilon = 1e-5);
}

#[test]
fn test_softmax_loss_stays_finite_for_large_scores() {
    let graph = Graph::new();
    let scores = graph
        .constant(&Tensor::new(&[1000., 0., -1000., 500., -500., 0.], &[2, 3]))
        .unwrap();

    // 预测正确：损失接近0
    let right = Tensor::new(&[1., 0., 0., 1., 0., 0.], &[2, 3]);
    let loss = SoftMaxLoss.loss_function(&scores, &right).unwrap();
    let value = loss.eval().unwrap().number().unwrap();
    assert!(value.is_finite());
    assert_abs_diff_eq!(value, 0., epsilon = 1e-5);

    // 预测错误：损失很大但有限
    let wrong = Tensor::new(&[0., 0., 1., 0., 1., 0.], &[2, 3]);
    let loss = SoftMaxLoss.loss_function(&scores, &wrong).unwrap();
    let value = loss.eval().unwrap().number().unwrap();
    assert!(value.is_finite());
    assert_abs_diff_eq!(value, (2000. + 1000.) / 2., epsilon = 1e-2);
}

#[test]
fn test_softmax_loss_is_non_negative() {
    let graph = Graph::new();
    let scores = graph
        .constant(&Tensor::new(&[0.3, -1.2, 4.5, 2., 2., 2., -7., 0.1, 0.], &[3, 3]))
        .unwrap();
    for class in 0..3 {
        let mut label = vec![0.; 9];
        for row in 0..3 {
            label[row * 3 + class] = 1.;
        }
        let loss = SoftMaxLoss
            .loss_function(&scores, &Tensor::new(&label, &[3, 3]))
            .unwrap();
        let value = loss.eval().unwrap().number().unwrap();
        assert!(value.is_finite() && value >= 0., "类别{class}的损失为{value}");
    }
}

#[test]
fn test_softmax_returns_label_symbol() {
    let graph = Graph::new();
    let scores = graph.variable(&Tensor::zeros(&[2, 2]), None).unwrap();
    let label = Tensor::new(&[0., 1., 1., 0.], &[2, 2]);

    let (_, label_symbol) = SoftMaxLoss.loss_function_with_label(&scores, &label).unwrap();
    assert!(label_symbol.same_graph(&scores));
    assert_eq!(label_symbol.eval().unwrap(), label);
    assert_eq!(SoftMaxLoss.name(), "softmax");
    assert_eq!(SoftMaxLoss.loss_type(), LossCategory::Classification);
}

#[test]
fn test_softmax_rejects_bad_label_matrix() {
    let graph = Graph::new();
    let scores = graph.variable(&Tensor::zeros(&[2, 3]), None).unwrap();

    assert_err!(
        SoftMaxLoss.loss_function(&scores, &Tensor::zeros(&[3, 2])),
        GraphError::ShapeMismatch([2, 3], [3, 2], "softmax损失的标签矩阵形状与输入不一致")
    );
    assert_err!(
        SoftMaxLoss.loss_function(&scores, &Tensor::zeros(&[6])),
        GraphError::DimensionMismatch { expected: 2, got: 1, .. }
    );

    let flat = graph.variable(&Tensor::zeros(&[3]), None).unwrap();
    assert_err!(
        SoftMaxLoss.loss_function(&flat, &Tensor::zeros(&[1, 3])),
        GraphError::DimensionMismatch { expected: 2, got: 1, .. }
    );
}

#[test]
fn test_softmax_loss_with_multi_hot_label() {
    let graph = Graph::new();
    let scores = graph.variable(&Tensor::new(&[1., 2., 3.], &[1, 3]), None).unwrap();
    let label = Tensor::new(&[1., 1., 0.], &[1, 3]);

    // -log((e^1 + e^2) / (e^1 + e^2 + e^3))
    let loss = SoftMaxLoss.loss_function(&scores, &label).unwrap();
    let (e1, e2, e3) = (1f32.exp(), 2f32.exp(), 3f32.exp());
    let expected = (e1 + e2 + e3).ln() - (e1 + e2).ln();
    assert_abs_diff_eq!(expected, 1.094_344_3, epsilon = 1e-5);
    assert_abs_diff_eq!(loss.backward().unwrap(), expected, epsilon = 1e-5);

    // 梯度 = softmax(s) - y·exp(s) / Σ(y·exp(s))
    let total = e1 + e2 + e3;
    let picked = e1 + e2;
    let expected_grad = Tensor::new(
        &[e1 / total - e1 / picked, e2 / total - e2 / picked, e3 / total],
        &[1, 3],
    );
    assert_tensor_near(&scores.grad().unwrap().unwrap(), &expected_grad);
}

#[test]
fn test_softmax_loss_with_weighted_label() {
    let graph = Graph::new();
    let scores = graph
        .constant(&Tensor::new(&[0.5, -1., 2., 1., 1., 1.], &[2, 3]))
        .unwrap();
    let label = Tensor::new(&[0., 2., 0., 0.5, 0., 0.5], &[2, 3]);

    let loss = SoftMaxLoss.loss_function(&scores, &label).unwrap();
    let first = (0.5f32.exp() + (-1f32).exp() + 2f32.exp()).ln() - (2. * (-1f32).exp()).ln();
    let second = 3f32.ln();
    assert_abs_diff_eq!(
        loss.eval().unwrap().number().unwrap(),
        (first + second) / 2.,
        epsilon = 1e-5
    );
}

#[test]
fn test_softmax_loss_of_all_zero_label_row_is_infinite() {
    let graph = Graph::new();
    let scores = graph
        .constant(&Tensor::new(&[1., 2., 3., 0., 0., 0.], &[2, 3]))
        .unwrap();
    let label = Tensor::new(&[0., 0., 0., 1., 0., 0.], &[2, 3]);

    let loss = SoftMaxLoss.loss_function(&scores, &label).unwrap();
    let value = loss.eval().unwrap().number().unwrap();
    assert!(value.is_infinite() && value > 0., "损失为{value}");
}
