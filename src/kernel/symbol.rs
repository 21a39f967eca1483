/*
 * @Description  : Symbol - 符号句柄：计算图中代表某个值或某个运算的节点，
 *                 构建时只记录运算关系，值在前向传播时才被计算。支持算子重载和链式调用
 */

use super::graph::{Graph, GraphInner, ReduceKind};
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

/// 符号句柄 - 携带图引用，支持算子重载和链式调用
///
/// - 持有 `Rc<RefCell<GraphInner>>` 引用
/// - Clone 语义（非 Copy），开销仅为一次 Rc clone
///
/// # 使用示例
/// ```
/// use only_symbol::kernel::Graph;
/// use only_symbol::tensor::Tensor;
///
/// let graph = Graph::new();
/// let x = graph.placeholder(&[1, 2], Some("x")).unwrap();
/// let w = graph.variable(&Tensor::new(&[2., 3.], &[1, 2]), Some("w")).unwrap();
/// let y = (&x * &w).reduce_sum(None).unwrap();
///
/// x.set_value(&Tensor::new(&[1., 1.], &[1, 2])).unwrap();
/// assert_eq!(y.backward().unwrap(), 5.);
/// assert_eq!(w.grad().unwrap(), Some(Tensor::new(&[1., 1.], &[1, 2])));
/// ```
#[derive(Clone)]
pub struct Symbol {
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbol").field("id", &self.id).finish()
    }
}

impl Symbol {
    pub(in crate::kernel) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> String {
        self.graph
            .borrow()
            .get_node_name(self.id)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// 节点值的形状，在节点创建时就已确定
    pub fn shape(&self) -> Vec<usize> {
        self.graph
            .borrow()
            .get_node_value_expected_shape(self.id)
            .map(<[usize]>::to_vec)
            .unwrap_or_default()
    }

    /// 检查两个 Symbol 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Symbol 所属的 Graph 句柄
    pub fn get_graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    /// 在同一个图中创建常量
    pub fn constant_like(&self, value: &Tensor) -> Result<Self, GraphError> {
        let id = self.graph.borrow_mut().new_constant_node(value, None)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    // ==================== 执行 ====================

    /// 前向传播：计算本节点及其所有上游节点的值
    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 前向传播并返回本节点的值
    pub fn eval(&self) -> Result<Tensor, GraphError> {
        self.forward()?;
        self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{}在前向传播后仍没有值", self.id))
        })
    }

    /// 反向传播（先自动执行一次 forward），返回损失的标量值
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward(self.id)
    }

    // ==================== 值访问和设置 ====================

    /// 获取节点的当前值（克隆的 Tensor），尚未计算时为None
    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    /// 设置变量或占位符的值
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, value)
    }

    /// 获取节点的梯度（最近一次反向传播累积的结果）
    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_grad(self.id)?.cloned())
    }

    // ==================== 构建运算（返回 Result）====================

    fn unary(
        &self,
        build: impl FnOnce(&mut GraphInner, NodeId) -> Result<NodeId, GraphError>,
    ) -> Result<Self, GraphError> {
        let id = build(&mut *self.graph.borrow_mut(), self.id)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    fn binary(
        &self,
        other: &Self,
        op_name: &str,
        build: impl FnOnce(&mut GraphInner, NodeId, NodeId) -> Result<NodeId, GraphError>,
    ) -> Result<Self, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Symbol 进行{op_name}"
            )));
        }
        let id = build(&mut *self.graph.borrow_mut(), self.id, other.id)?;
        Ok(Self::new(id, Rc::clone(&self.graph)))
    }

    /// 安全的加法（支持广播）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "加法", |g, a, b| g.new_add_node(a, b, None))
    }

    /// 安全的减法（支持广播）
    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "减法", |g, a, b| g.new_subtract_node(a, b, None))
    }

    /// 安全的逐元素乘法（支持广播）
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "乘法", |g, a, b| g.new_multiply_node(a, b, None))
    }

    /// 安全的逐元素除法（支持广播）
    pub fn try_div(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "除法", |g, a, b| g.new_divide_node(a, b, None))
    }

    pub fn try_neg(&self) -> Result<Self, GraphError> {
        self.unary(|g, x| g.new_negative_node(x, None))
    }

    /// 与纯数运算时，先把纯数包装成同图中形状为`[1]`的常量
    fn scalar_like(&self, value: f32) -> Result<Self, GraphError> {
        self.constant_like(&Tensor::scalar(value))
    }

    pub fn exp(&self) -> Result<Self, GraphError> {
        self.unary(|g, x| g.new_exp_node(x, None))
    }

    /// 自然对数
    pub fn log(&self) -> Result<Self, GraphError> {
        self.unary(|g, x| g.new_log_node(x, None))
    }

    /// 逐元素取较大值（支持广播）
    pub fn maximum(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "取最大值", |g, a, b| g.new_maximum_node(a, b, None))
    }

    /// 矩阵乘法
    pub fn matmul(&self, other: &Self) -> Result<Self, GraphError> {
        self.binary(other, "矩阵乘法", |g, a, b| g.new_mat_mul_node(a, b, None))
    }

    fn reduce(
        &self,
        kind: ReduceKind,
        axis: Option<usize>,
        keep_dims: bool,
    ) -> Result<Self, GraphError> {
        self.unary(|g, x| g.new_reduce_node(kind, x, axis, keep_dims, None))
    }

    /// 求和：`axis`为None时对全部元素求和（结果形状为`[1]`），否则消去该维度
    pub fn reduce_sum(&self, axis: Option<usize>) -> Result<Self, GraphError> {
        self.reduce(ReduceKind::Sum, axis, false)
    }

    /// 同`reduce_sum`，但被归约的维度保留为1
    pub fn reduce_sum_keep_dims(&self, axis: Option<usize>) -> Result<Self, GraphError> {
        self.reduce(ReduceKind::Sum, axis, true)
    }

    pub fn reduce_mean(&self, axis: Option<usize>) -> Result<Self, GraphError> {
        self.reduce(ReduceKind::Mean, axis, false)
    }

    pub fn reduce_mean_keep_dims(&self, axis: Option<usize>) -> Result<Self, GraphError> {
        self.reduce(ReduceKind::Mean, axis, true)
    }

    pub fn reduce_max(&self, axis: Option<usize>) -> Result<Self, GraphError> {
        self.reduce(ReduceKind::Max, axis, false)
    }

    pub fn reduce_max_keep_dims(&self, axis: Option<usize>) -> Result<Self, GraphError> {
        self.reduce(ReduceKind::Max, axis, true)
    }
}

// ==================== 算子重载 ====================
// 构建失败（形状不兼容、来自不同的图）时会panic；需要处理错误时请使用`try_*`

macro_rules! impl_symbol_binary_op {
    ($trait:ident, $method:ident, $try_method:ident, $op_desc:literal) => {
        impl $trait for &Symbol {
            type Output = Symbol;

            fn $method(self, other: &Symbol) -> Symbol {
                self.$try_method(other)
                    .unwrap_or_else(|e| panic!("Symbol {}失败：{e}", $op_desc))
            }
        }

        impl $trait for Symbol {
            type Output = Self;

            fn $method(self, other: Self) -> Self {
                $trait::$method(&self, &other)
            }
        }

        impl $trait<Symbol> for &Symbol {
            type Output = Symbol;

            fn $method(self, other: Symbol) -> Symbol {
                $trait::$method(self, &other)
            }
        }

        impl $trait<&Symbol> for Symbol {
            type Output = Self;

            fn $method(self, other: &Symbol) -> Self {
                $trait::$method(&self, other)
            }
        }

        impl $trait<f32> for &Symbol {
            type Output = Symbol;

            fn $method(self, scalar: f32) -> Symbol {
                self.scalar_like(scalar)
                    .and_then(|s| self.$try_method(&s))
                    .unwrap_or_else(|e| panic!("Symbol {}失败：{e}", $op_desc))
            }
        }

        impl $trait<f32> for Symbol {
            type Output = Self;

            fn $method(self, scalar: f32) -> Self {
                $trait::$method(&self, scalar)
            }
        }

        impl $trait<&Symbol> for f32 {
            type Output = Symbol;

            fn $method(self, symbol: &Symbol) -> Symbol {
                symbol
                    .scalar_like(self)
                    .and_then(|s| s.$try_method(symbol))
                    .unwrap_or_else(|e| panic!("Symbol {}失败：{e}", $op_desc))
            }
        }

        impl $trait<Symbol> for f32 {
            type Output = Symbol;

            fn $method(self, symbol: Symbol) -> Symbol {
                $trait::$method(self, &symbol)
            }
        }
    };
}

impl_symbol_binary_op!(Add, add, try_add, "加法");
impl_symbol_binary_op!(Sub, sub, try_sub, "减法");
impl_symbol_binary_op!(Mul, mul, try_mul, "乘法");
impl_symbol_binary_op!(Div, div, try_div, "除法");

impl Neg for &Symbol {
    type Output = Symbol;

    fn neg(self) -> Symbol {
        self.try_neg()
            .unwrap_or_else(|e| panic!("Symbol 取负失败：{e}"))
    }
}

impl Neg for Symbol {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}
