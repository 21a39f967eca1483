mod node_handle;
pub(in crate::kernel) mod raw_node;

pub(in crate::kernel) use node_handle::NodeHandle;
pub(in crate::kernel) use raw_node::NodeType;

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点在所属图中的唯一标识（从1开始递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
