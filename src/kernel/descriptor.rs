/*
 * @Description  : 图描述符（Graph Descriptor）
 *                 可序列化的图拓扑快照，用于调试输出和导出
 */

use serde::{Deserialize, Serialize};

/// 图的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescriptor {
    /// 格式版本
    pub version: String,
    pub name: String,
    /// 按节点 ID 升序排列
    pub nodes: Vec<NodeDescriptor>,
}

/// 节点描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: u64,
    pub name: String,
    pub node_type: NodeTypeDescriptor,
    pub output_shape: Vec<usize>,
    /// 父节点 ID 列表（按运算数顺序）
    pub parents: Vec<u64>,
}

/// 节点类型描述（包含类型特定参数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeTypeDescriptor {
    Constant,
    Variable,
    Placeholder,
    Negative,
    Add,
    Subtract,
    Multiply,
    Divide,
    MatMul,
    Exp,
    Log,
    Maximum,
    ReduceSum { axis: Option<usize>, keep_dims: bool },
    ReduceMean { axis: Option<usize>, keep_dims: bool },
    ReduceMax { axis: Option<usize>, keep_dims: bool },
}

impl GraphDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: name.to_string(),
            nodes: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: NodeDescriptor) {
        self.nodes.push(node);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
