/*
 * @Description  : 叶子节点：常量、可训练变量和占位符。
 *                 叶子节点的值直接保存在`NodeHandle`中，不由父节点计算得到
 */

use super::TraitNode;
use crate::kernel::NodeTypeDescriptor;

/// 常量：值在创建时给定，不接受手动赋值，也不参与求导
#[derive(Clone)]
pub(in crate::kernel) struct Constant {
    shape: Vec<usize>,
}

impl Constant {
    pub(in crate::kernel) fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }
}

impl TraitNode for Constant {
    fn type_name(&self) -> &'static str {
        "constant"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Constant
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }
}

/// 可训练变量，优化器会根据梯度更新它的值
#[derive(Clone)]
pub(in crate::kernel) struct Variable {
    shape: Vec<usize>,
}

impl Variable {
    pub(in crate::kernel) fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }
}

impl TraitNode for Variable {
    fn type_name(&self) -> &'static str {
        "variable"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Variable
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }
}

/// 占位符：只声明形状，值在前向传播前通过`set_value`喂入
#[derive(Clone)]
pub(in crate::kernel) struct Placeholder {
    shape: Vec<usize>,
}

impl Placeholder {
    pub(in crate::kernel) fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
        }
    }
}

impl TraitNode for Placeholder {
    fn type_name(&self) -> &'static str {
        "placeholder"
    }

    fn descriptor(&self) -> NodeTypeDescriptor {
        NodeTypeDescriptor::Placeholder
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }
}
