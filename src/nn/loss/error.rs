use crate::kernel::GraphError;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LossError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("构建损失时出错：{0}")]
    Graph(#[from] GraphError),
    #[error("损失配置无效：{0}")]
    Config(String),
}
