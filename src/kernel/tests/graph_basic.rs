use crate::assert_err;
use crate::kernel::{Graph, GraphError, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_node_id_starts_from_one() {
    let graph = Graph::new();
    let a = graph.constant(&Tensor::ones(&[2, 2])).unwrap();
    let b = graph.placeholder(&[2, 2], None).unwrap();
    assert_eq!(a.node_id(), NodeId(1));
    assert_eq!(b.node_id(), NodeId(2));
    assert_eq!(graph.nodes_count(), 2);
}

#[test]
fn test_node_name_generation() {
    let graph = Graph::new();
    let x = graph.placeholder(&[2, 3], Some("x")).unwrap();
    let c = graph.constant(&Tensor::ones(&[2, 3])).unwrap();

    // 1. 显式命名
    assert_eq!(x.name(), "x");
    // 2. 自动命名
    assert_eq!(c.name(), "constant_1");
    let add_1 = x.try_add(&c).unwrap();
    let add_2 = x.try_add(&c).unwrap();
    assert_eq!(add_1.name(), "add_1");
    assert_eq!(add_2.name(), "add_2");
    // 3. 名称重复
    let duplicate = graph.variable(&Tensor::zeros(&[1]), Some("x"));
    assert_err!(
        duplicate,
        GraphError::DuplicateNodeName("节点x在图default_graph中重复")
    );
}

#[test]
fn test_graph_name() {
    assert_eq!(Graph::new().name(), "default_graph");
    assert_eq!(Graph::with_name("loss_graph").name(), "loss_graph");
}

#[test]
fn test_symbols_from_different_graphs() {
    let graph_1 = Graph::new();
    let graph_2 = Graph::new();
    let a = graph_1.scalar(1.0).unwrap();
    let b = graph_2.scalar(2.0).unwrap();

    assert!(!a.same_graph(&b));
    assert_err!(
        a.try_add(&b),
        GraphError::InvalidOperation("不能对来自不同 Graph 的 Symbol 进行加法")
    );
    assert_err!(
        a.maximum(&b),
        GraphError::InvalidOperation("不能对来自不同 Graph 的 Symbol 进行取最大值")
    );
    // 失败的构建不会在图中留下节点
    assert_eq!(graph_1.nodes_count(), 1);
}

#[test]
fn test_broadcast_shape_inference() {
    let graph = Graph::new();
    let matrix = graph.placeholder(&[2, 3], None).unwrap();
    let row = graph.placeholder(&[3], None).unwrap();
    let column = graph.placeholder(&[2, 1], None).unwrap();
    let scalar = graph.scalar(2.0).unwrap();

    assert_eq!(matrix.try_add(&row).unwrap().shape(), vec![2, 3]);
    assert_eq!(row.try_sub(&column).unwrap().shape(), vec![2, 3]);
    assert_eq!(column.try_mul(&scalar).unwrap().shape(), vec![2, 1]);
    assert_eq!(scalar.try_div(&matrix).unwrap().shape(), vec![2, 3]);
}

#[test]
fn test_incompatible_shapes() {
    let graph = Graph::new();
    let a = graph.placeholder(&[2, 3], None).unwrap();
    let b = graph.placeholder(&[3, 2], None).unwrap();

    assert_err!(
        a.try_add(&b),
        GraphError::ShapeMismatch([2, 3], [3, 2], "Add节点的两个父节点形状无法广播")
    );
    assert_err!(
        a.try_mul(&b),
        GraphError::ShapeMismatch([2, 3], [3, 2], "Multiply节点的两个父节点形状无法广播")
    );
    assert_err!(a.maximum(&b), GraphError::ShapeMismatch { .. });
}

#[test]
fn test_mat_mul_shape_check() {
    let graph = Graph::new();
    let a = graph.placeholder(&[2, 3], None).unwrap();
    let b = graph.placeholder(&[3, 4], None).unwrap();
    let v = graph.placeholder(&[3], None).unwrap();

    assert_eq!(a.matmul(&b).unwrap().shape(), vec![2, 4]);
    assert_err!(
        v.matmul(&b),
        GraphError::DimensionMismatch { expected: 2, got: 1, .. }
    );
    assert_err!(
        a.matmul(&a),
        GraphError::ShapeMismatch { got, .. } if got == &vec![2, 3]
    );
}

#[test]
fn test_reduce_shape_inference() {
    let graph = Graph::new();
    let x = graph.placeholder(&[2, 3], None).unwrap();
    let v = graph.placeholder(&[3], None).unwrap();

    assert_eq!(x.reduce_sum(None).unwrap().shape(), vec![1]);
    assert_eq!(x.reduce_sum(Some(1)).unwrap().shape(), vec![2]);
    assert_eq!(x.reduce_mean(Some(0)).unwrap().shape(), vec![3]);
    assert_eq!(x.reduce_max_keep_dims(Some(1)).unwrap().shape(), vec![2, 1]);
    assert_eq!(x.reduce_sum_keep_dims(None).unwrap().shape(), vec![1, 1]);
    // 消去唯一的维度后形状为[1]
    assert_eq!(v.reduce_max(Some(0)).unwrap().shape(), vec![1]);

    assert_err!(
        x.reduce_sum(Some(2)),
        GraphError::DimensionMismatch { expected: 2, got: 2, .. }
    );
}

#[test]
fn test_invalid_placeholder_shape() {
    let graph = Graph::new();
    assert_err!(graph.placeholder(&[], None), GraphError::InvalidOperation(_));
    assert_err!(graph.placeholder(&[2, 0], None), GraphError::InvalidOperation(_));
}

#[test]
fn test_node_parents() {
    let graph = Graph::new();
    let x = graph.placeholder(&[2], Some("x")).unwrap();
    let y = &x * &x;
    let z = (&y + 1.0).exp().unwrap();

    let inner = graph.inner();
    // 同一个父节点按运算数顺序出现两次
    assert_eq!(
        inner.get_node_parents(y.node_id()).unwrap(),
        vec![x.node_id(), x.node_id()]
    );
    assert_eq!(inner.get_node_parents(z.node_id()).unwrap().len(), 1);
    assert_err!(
        inner.get_node_parents(NodeId(99)),
        GraphError::NodeNotFound(NodeId(99))
    );
}

#[test]
fn test_operator_overload_panics_on_invalid_shapes() {
    let graph = Graph::new();
    let a = graph.placeholder(&[2, 3], None).unwrap();
    let b = graph.placeholder(&[4], None).unwrap();
    crate::assert_panic!(&a + &b);
}
