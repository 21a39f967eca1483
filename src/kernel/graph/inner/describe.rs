use super::GraphInner;
use crate::kernel::nodes::raw_node::TraitNode;
use crate::kernel::{GraphDescriptor, NodeDescriptor};

impl GraphInner {
    /// 导出图的描述符（用于序列化、调试）
    ///
    /// # 示例
    /// ```
    /// use only_symbol::kernel::Graph;
    ///
    /// let graph = Graph::new();
    /// let x = graph.placeholder(&[2, 3], Some("x")).unwrap();
    /// let _y = x.exp().unwrap();
    /// let descriptor = graph.describe();
    /// assert_eq!(descriptor.nodes.len(), 2);
    /// assert!(descriptor.to_json().unwrap().contains("\"Exp\""));
    /// ```
    pub fn describe(&self) -> GraphDescriptor {
        let mut descriptor = GraphDescriptor::new(&self.name);

        // 按 ID 排序节点，确保输出顺序一致
        for node_id in self.nodes() {
            let Some(node) = self.nodes.get(&node_id) else {
                continue;
            };
            let parents = self
                .backward_edges
                .get(&node_id)
                .map(|ids| ids.iter().map(|id| id.0).collect())
                .unwrap_or_default();

            descriptor.add_node(NodeDescriptor {
                id: node_id.0,
                name: node.name().to_string(),
                node_type: node.node_type().descriptor(),
                output_shape: node.value_expected_shape().to_vec(),
                parents,
            });
        }

        descriptor
    }
}
