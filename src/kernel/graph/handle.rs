/*
 * @Description  : Graph 句柄（用户级 API）
 */

use super::inner::GraphInner;
use crate::kernel::{GraphDescriptor, GraphError, Symbol};
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 计算图句柄
///
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Symbol 自动持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    pub fn with_name(name: &str) -> Self {
        Self::from_inner(GraphInner::with_name(name))
    }

    fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub(in crate::kernel) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 判断两个句柄是否指向同一个图
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ==================== 创建符号 ====================

    /// 创建常量符号
    pub fn constant(&self, value: &Tensor) -> Result<Symbol, GraphError> {
        let node_id = self.inner.borrow_mut().new_constant_node(value, None)?;
        Ok(Symbol::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建命名常量符号
    pub fn constant_named(&self, value: &Tensor, name: &str) -> Result<Symbol, GraphError> {
        let node_id = self
            .inner
            .borrow_mut()
            .new_constant_node(value, Some(name))?;
        Ok(Symbol::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建形状为`[1]`的标量常量
    pub fn scalar(&self, value: f32) -> Result<Symbol, GraphError> {
        self.constant(&Tensor::scalar(value))
    }

    /// 创建可训练变量，`value`为其初始值
    pub fn variable(&self, value: &Tensor, name: Option<&str>) -> Result<Symbol, GraphError> {
        let node_id = self.inner.borrow_mut().new_variable_node(value, name)?;
        Ok(Symbol::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建占位符，其值须在前向传播前通过`Symbol::set_value`喂入
    pub fn placeholder(&self, shape: &[usize], name: Option<&str>) -> Result<Symbol, GraphError> {
        let node_id = self.inner.borrow_mut().new_placeholder_node(shape, name)?;
        Ok(Symbol::new(node_id, Rc::clone(&self.inner)))
    }

    // ==================== 执行 ====================

    /// 前向传播
    pub fn forward(&self, output: &Symbol) -> Result<(), GraphError> {
        output.forward()
    }

    /// 反向传播
    pub fn backward(&self, loss: &Symbol) -> Result<f32, GraphError> {
        loss.backward()
    }

    /// 清零所有节点的梯度
    pub fn zero_grad(&self) {
        self.inner.borrow_mut().zero_grad();
    }

    /// 所有可训练变量（按创建顺序）
    pub fn trainable_symbols(&self) -> Vec<Symbol> {
        self.inner
            .borrow()
            .get_trainable_nodes()
            .into_iter()
            .map(|id| Symbol::new(id, Rc::clone(&self.inner)))
            .collect()
    }

    // ==================== 描述 ====================

    pub fn name(&self) -> String {
        self.inner.borrow().name().to_string()
    }

    pub fn nodes_count(&self) -> usize {
        self.inner.borrow().nodes_count()
    }

    pub fn describe(&self) -> GraphDescriptor {
        self.inner.borrow().describe()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
