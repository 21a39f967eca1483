/*
 * @Description  : 神经网络（neural network）相关模块。
 *                 目前只包含建立在符号计算图（`kernel`）之上的损失层
 */

pub mod loss;

pub use loss::{
    Loss, LossCategory, LossConfig, LossError, LossLayer, LossRegistry, SVMLoss, SoftMaxLoss,
    softmax_loss, softmax_loss_and_label_symbol, softmax_loss_with_label,
    softmax_loss_with_label_and_label_symbol, svm_loss, svm_loss_and_label_symbol,
    svm_loss_with_label, svm_loss_with_label_and_label_symbol,
};

#[cfg(test)]
mod tests;
