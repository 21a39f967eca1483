/*
 * @Description  : GraphInner 计算图的底层实现
 *
 * 各 impl 块分散在子模块中：
 * - core.rs: 基础操作 + forward
 * - backward.rs: VJP 反向传播
 * - node_builders.rs: new_*_node
 * - describe.rs: describe
 */

mod backward;
mod core;
mod describe;
mod node_builders;

pub use node_builders::ReduceKind;

use crate::kernel::nodes::NodeHandle;
use crate::kernel::NodeId;
use std::collections::HashMap;

/// 图的完整定义（核心实现）
///
/// 用户通常通过 `Graph` 句柄和 `Symbol` 使用此结构。
pub struct GraphInner {
    pub(in crate::kernel::graph) name: String,
    pub(in crate::kernel::graph) nodes: HashMap<NodeId, NodeHandle>,
    /// 反向边：child_id -> parent_ids（按运算数顺序，同一父节点可出现多次，如`x * x`）
    pub(in crate::kernel::graph) backward_edges: HashMap<NodeId, Vec<NodeId>>,
    /// 最后一次前向传播的 id
    pub(in crate::kernel::graph) last_forward_pass_id: u64,
    /// 最后一次反向传播的 id
    pub(in crate::kernel::graph) last_backward_pass_id: u64,
    pub(in crate::kernel::graph) next_id: u64,
}

impl Default for GraphInner {
    fn default() -> Self {
        Self::new()
    }
}
