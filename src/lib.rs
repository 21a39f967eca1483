//! # Only Symbol
//!
//! `only_symbol`是一个纯rust实现的符号式（symbolic）计算图，
//! 以及建立在其上的分类损失层（softmax交叉熵、多分类SVM合页损失）。
//!
//! ```
//! use only_symbol::kernel::Graph;
//! use only_symbol::nn::{Loss, LossRegistry};
//! use only_symbol::tensor::Tensor;
//!
//! let graph = Graph::new();
//! let scores = graph.variable(&Tensor::zeros(&[2, 2]), Some("scores")).unwrap();
//! let label = Tensor::new(&[1., 0., 0., 1.], &[2, 2]);
//!
//! let loss = Loss::new("softmax", &LossRegistry::new()).unwrap();
//! let symbol = loss.loss_function(&scores, &label).unwrap();
//! let value = symbol.backward().unwrap();
//! assert!((value - 2f32.ln()).abs() < 1e-6);
//! ```

pub mod errors;
pub mod kernel;
pub mod nn;
pub mod tensor;
pub mod utils;
