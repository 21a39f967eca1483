/*
 * @Description  : 符号运算的自由函数形式，与`Symbol`上的同名方法等价
 */

use super::{GraphError, Symbol};

pub fn exp(x: &Symbol) -> Result<Symbol, GraphError> {
    x.exp()
}

pub fn log(x: &Symbol) -> Result<Symbol, GraphError> {
    x.log()
}

pub fn maximum(a: &Symbol, b: &Symbol) -> Result<Symbol, GraphError> {
    a.maximum(b)
}

pub fn matmul(a: &Symbol, b: &Symbol) -> Result<Symbol, GraphError> {
    a.matmul(b)
}

pub fn reduce_sum(x: &Symbol, axis: Option<usize>) -> Result<Symbol, GraphError> {
    x.reduce_sum(axis)
}

pub fn reduce_sum_keep_dims(x: &Symbol, axis: Option<usize>) -> Result<Symbol, GraphError> {
    x.reduce_sum_keep_dims(axis)
}

pub fn reduce_mean(x: &Symbol, axis: Option<usize>) -> Result<Symbol, GraphError> {
    x.reduce_mean(axis)
}

pub fn reduce_mean_keep_dims(x: &Symbol, axis: Option<usize>) -> Result<Symbol, GraphError> {
    x.reduce_mean_keep_dims(axis)
}

pub fn reduce_max(x: &Symbol, axis: Option<usize>) -> Result<Symbol, GraphError> {
    x.reduce_max(axis)
}

pub fn reduce_max_keep_dims(x: &Symbol, axis: Option<usize>) -> Result<Symbol, GraphError> {
    x.reduce_max_keep_dims(axis)
}
