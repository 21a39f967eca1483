use crate::assert_err;
use crate::kernel::{Graph, GraphError};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

fn assert_tensor_near(actual: &Tensor, expected: &Tensor) {
    assert_eq!(actual.shape(), expected.shape());
    for (a, e) in actual.data_as_vec().iter().zip(expected.data_as_vec()) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-5);
    }
}

#[test]
fn test_backward_returns_loss_value() {
    let graph = Graph::new();
    let x = graph.placeholder(&[1, 2], Some("x")).unwrap();
    let w = graph
        .variable(&Tensor::new(&[2., 3.], &[1, 2]), Some("w"))
        .unwrap();
    let loss = (&x * &w).reduce_sum(None).unwrap();

    x.set_value(&Tensor::new(&[1., 4.], &[1, 2])).unwrap();
    assert_eq!(loss.backward().unwrap(), 14.);
    assert_eq!(w.grad().unwrap(), Some(Tensor::new(&[1., 4.], &[1, 2])));
    // 占位符同样得到梯度
    assert_eq!(x.grad().unwrap(), Some(Tensor::new(&[2., 3.], &[1, 2])));
    // 损失节点自身的梯度为1
    assert_eq!(loss.grad().unwrap(), Some(Tensor::ones(&[1])));
}

#[test]
fn test_backward_through_shared_node() {
    // y = sum(x * x + x)，dy/dx = 2x + 1
    let graph = Graph::new();
    let x = graph
        .variable(&Tensor::new(&[1., -2., 3.], &[3]), Some("x"))
        .unwrap();
    let y = (&(&x * &x) + &x).reduce_sum(None).unwrap();

    assert_eq!(y.backward().unwrap(), 16.);
    assert_eq!(x.grad().unwrap(), Some(Tensor::new(&[3., -3., 7.], &[3])));
}

#[test]
fn test_backward_broadcast_folds_grad() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::zeros(&[2, 3]), Some("x")).unwrap();
    let b = graph.variable(&Tensor::zeros(&[3]), Some("b")).unwrap();
    let s = graph.variable(&Tensor::scalar(2.), Some("s")).unwrap();
    let y = ((&x + &b) * &s).reduce_sum(None).unwrap();

    y.backward().unwrap();
    assert_eq!(x.grad().unwrap(), Some(Tensor::full(2., &[2, 3])));
    assert_eq!(b.grad().unwrap(), Some(Tensor::full(4., &[3])));
    // s 的梯度为 sum(x + b) = 0
    assert_eq!(s.grad().unwrap(), Some(Tensor::zeros(&[1])));
}

#[test]
fn test_backward_divide() {
    let graph = Graph::new();
    let a = graph.variable(&Tensor::new(&[1., 6.], &[2]), Some("a")).unwrap();
    let b = graph.variable(&Tensor::new(&[2., 3.], &[2]), Some("b")).unwrap();
    let y = (&a / &b).reduce_sum(None).unwrap();

    assert_eq!(y.backward().unwrap(), 2.5);
    assert_tensor_near(&a.grad().unwrap().unwrap(), &Tensor::new(&[0.5, 1. / 3.], &[2]));
    assert_tensor_near(
        &b.grad().unwrap().unwrap(),
        &Tensor::new(&[-0.25, -6. / 9.], &[2]),
    );
}

#[test]
fn test_backward_subtract_and_negative() {
    let graph = Graph::new();
    let a = graph.variable(&Tensor::ones(&[2]), Some("a")).unwrap();
    let b = graph.variable(&Tensor::ones(&[2]), Some("b")).unwrap();
    let y = (&a - &(-&b)).reduce_sum(None).unwrap();

    assert_eq!(y.backward().unwrap(), 4.);
    assert_eq!(a.grad().unwrap(), Some(Tensor::ones(&[2])));
    assert_eq!(b.grad().unwrap(), Some(Tensor::ones(&[2])));
}

#[test]
fn test_backward_mat_mul() {
    let graph = Graph::new();
    let a = graph.variable(&Tensor::new(&[1., 2.], &[1, 2]), Some("a")).unwrap();
    let b = graph.variable(&Tensor::new(&[3., 4.], &[2, 1]), Some("b")).unwrap();
    let y = a.matmul(&b).unwrap().reduce_sum(None).unwrap();

    assert_eq!(y.backward().unwrap(), 11.);
    assert_eq!(a.grad().unwrap(), Some(Tensor::new(&[3., 4.], &[1, 2])));
    assert_eq!(b.grad().unwrap(), Some(Tensor::new(&[1., 2.], &[2, 1])));
}

#[test]
fn test_backward_exp_and_log() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::new(&[0., 1.], &[2]), Some("x")).unwrap();
    let y = x.exp().unwrap().reduce_sum(None).unwrap();
    y.backward().unwrap();
    assert_tensor_near(
        &x.grad().unwrap().unwrap(),
        &Tensor::new(&[1., std::f32::consts::E], &[2]),
    );

    let graph = Graph::new();
    let x = graph.variable(&Tensor::new(&[0.5, 4.], &[2]), Some("x")).unwrap();
    let y = x.log().unwrap().reduce_sum(None).unwrap();
    y.backward().unwrap();
    assert_tensor_near(&x.grad().unwrap().unwrap(), &Tensor::new(&[2., 0.25], &[2]));
}

#[test]
fn test_backward_reductions() {
    // 均值：每个元素的导数为 1/n
    let graph = Graph::new();
    let x = graph.variable(&Tensor::ones(&[2, 2]), Some("x")).unwrap();
    x.reduce_mean(None).unwrap().backward().unwrap();
    assert_eq!(x.grad().unwrap(), Some(Tensor::full(0.25, &[2, 2])));

    // 先沿维度1求均值再求和
    let graph = Graph::new();
    let x = graph.variable(&Tensor::ones(&[2, 4]), Some("x")).unwrap();
    let y = x.reduce_mean(Some(1)).unwrap().reduce_sum(None).unwrap();
    y.backward().unwrap();
    assert_eq!(x.grad().unwrap(), Some(Tensor::full(0.25, &[2, 4])));

    // 最大值：梯度只流向第一个最大值
    let graph = Graph::new();
    let x = graph
        .variable(&Tensor::new(&[1., 3., 3., 2.], &[4]), Some("x"))
        .unwrap();
    assert_eq!(x.reduce_max(None).unwrap().backward().unwrap(), 3.);
    assert_eq!(x.grad().unwrap(), Some(Tensor::new(&[0., 1., 0., 0.], &[4])));

    // 按行取最大值（保留维度）后求和
    let graph = Graph::new();
    let x = graph
        .variable(&Tensor::new(&[1., 4., 2., 7., 0., 7.], &[2, 3]), Some("x"))
        .unwrap();
    let y = x
        .reduce_max_keep_dims(Some(1))
        .unwrap()
        .reduce_sum(None)
        .unwrap();
    assert_eq!(y.backward().unwrap(), 11.);
    assert_eq!(
        x.grad().unwrap(),
        Some(Tensor::new(&[0., 1., 0., 1., 0., 0.], &[2, 3]))
    );
}

#[test]
fn test_backward_maximum() {
    // 与常量1比较：相等时梯度归第一个父节点
    let graph = Graph::new();
    let x = graph
        .variable(&Tensor::new(&[0., 2., 1.], &[3]), Some("x"))
        .unwrap();
    let one = x.constant_like(&Tensor::scalar(1.)).unwrap();
    let y = x.maximum(&one).unwrap().reduce_sum(None).unwrap();

    assert_eq!(y.backward().unwrap(), 4.);
    assert_eq!(x.grad().unwrap(), Some(Tensor::new(&[0., 1., 1.], &[3])));
}

#[test]
fn test_backward_requires_single_element_loss() {
    let graph = Graph::new();
    let x = graph.variable(&Tensor::ones(&[2]), Some("x")).unwrap();
    let y = &x * 2.0;
    assert_err!(
        y.backward(),
        GraphError::InvalidOperation(msg) if msg.contains("只有1个元素")
    );
}

#[test]
fn test_constant_has_no_grad() {
    let graph = Graph::new();
    let c = graph.constant(&Tensor::ones(&[2])).unwrap();
    let w = graph.variable(&Tensor::ones(&[2]), Some("w")).unwrap();
    (&c * &w).reduce_sum(None).unwrap().backward().unwrap();

    assert_err!(c.grad(), GraphError::InvalidOperation(_));
    assert_eq!(w.grad().unwrap(), Some(Tensor::ones(&[2])));
}

#[test]
fn test_variable_grad_accumulates_until_zero_grad() {
    let graph = Graph::new();
    let w = graph.variable(&Tensor::new(&[1., 2.], &[2]), Some("w")).unwrap();
    let y = (&w * 3.0).reduce_sum(None).unwrap();

    y.backward().unwrap();
    y.backward().unwrap();
    assert_eq!(w.grad().unwrap(), Some(Tensor::full(6., &[2])));
    // 中间节点的梯度每次都会重置
    assert_eq!(y.grad().unwrap(), Some(Tensor::ones(&[1])));

    graph.zero_grad();
    assert_eq!(w.grad().unwrap(), None);
}
