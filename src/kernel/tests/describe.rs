use crate::kernel::{Graph, GraphDescriptor, NodeTypeDescriptor};
use crate::tensor::Tensor;

#[test]
fn test_describe_graph() {
    let graph = Graph::with_name("demo");
    let x = graph.placeholder(&[2, 3], Some("x")).unwrap();
    let w = graph.variable(&Tensor::zeros(&[3, 1]), Some("w")).unwrap();
    let y = x.matmul(&w).unwrap();
    let _loss = y.reduce_mean_keep_dims(Some(0)).unwrap();

    let descriptor = graph.describe();
    assert_eq!(descriptor.name, "demo");
    assert_eq!(descriptor.nodes.len(), 4);

    let ids: Vec<u64> = descriptor.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    let mat_mul = &descriptor.nodes[2];
    assert_eq!(mat_mul.name, "mat_mul_1");
    assert_eq!(mat_mul.node_type, NodeTypeDescriptor::MatMul);
    assert_eq!(mat_mul.output_shape, vec![2, 1]);
    assert_eq!(mat_mul.parents, vec![1, 2]);

    assert_eq!(
        descriptor.nodes[3].node_type,
        NodeTypeDescriptor::ReduceMean {
            axis: Some(0),
            keep_dims: true
        }
    );
    assert_eq!(descriptor.nodes[3].output_shape, vec![1, 1]);
}

#[test]
fn test_descriptor_json() {
    let graph = Graph::new();
    let x = graph.placeholder(&[2], Some("x")).unwrap();
    let _y = x.reduce_sum(None).unwrap();

    let json = graph.describe().to_json().unwrap();
    assert!(json.contains("\"type\": \"ReduceSum\""));
    assert!(json.contains("\"keep_dims\": false"));

    let parsed = GraphDescriptor::from_json(&json).unwrap();
    assert_eq!(parsed, graph.describe());
}
