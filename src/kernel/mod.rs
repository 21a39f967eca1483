/*
 * @Description  : 符号计算内核：计算图、符号（Symbol）、节点、自动微分与优化器。
 *                 损失层（见`crate::nn::loss`）完全由本模块提供的符号运算组合而成。
 */

mod descriptor;
mod error;
mod graph;
mod nodes;
mod ops;
mod optimizer;
mod symbol;

pub use descriptor::{GraphDescriptor, NodeDescriptor, NodeTypeDescriptor};
pub use error::GraphError;
pub use graph::{Graph, GraphInner, ReduceKind};
pub use nodes::NodeId;
pub use ops::{
    exp, log, matmul, maximum, reduce_max, reduce_max_keep_dims, reduce_mean,
    reduce_mean_keep_dims, reduce_sum, reduce_sum_keep_dims,
};
pub use optimizer::GradientDescentOptimizer;
pub use symbol::Symbol;

#[cfg(test)]
mod tests;
