/*
 * @Description  : 计算图
 *
 * 公开 API：
 * - `Graph`: 用户级句柄
 * - `GraphInner`: 底层实现
 */

mod handle;
mod inner;

pub use handle::Graph;
pub use inner::{GraphInner, ReduceKind};
