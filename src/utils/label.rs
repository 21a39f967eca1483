/*
 * @Description  : 标签矩阵（label matrix）生成：将整数类别向量转换为one-hot矩阵
 */

use crate::errors::TensorError;
use crate::tensor::Tensor;

/// 把类别标签转换为 one-hot 标签矩阵
///
/// 类别列表为`classification`中所有不同取值的升序排列；
/// 返回的矩阵每行对应一个样本、每列对应一个类别，样本所属类别的列为1，其余为0。
///
/// # 返回
/// `(标签矩阵, 类别列表)`，矩阵形状为`[样本数, 类别数]`
///
/// # 示例
/// ```
/// use only_symbol::utils::generate_label_matrix;
///
/// let (matrix, classes) = generate_label_matrix(&[2, 0, 2]).unwrap();
/// assert_eq!(classes, vec![0, 2]);
/// assert_eq!(matrix.shape(), &[3, 2]);
/// assert_eq!(matrix.data_as_vec(), vec![0., 1., 1., 0., 0., 1.]);
/// ```
pub fn generate_label_matrix<T: Ord + Copy>(
    classification: &[T],
) -> Result<(Tensor, Vec<T>), TensorError> {
    if classification.is_empty() {
        return Err(TensorError::EmptyList);
    }

    let mut classes = classification.to_vec();
    classes.sort_unstable();
    classes.dedup();

    let num_classes = classes.len();
    let mut data = vec![0.0; classification.len() * num_classes];
    for (row, label) in classification.iter().enumerate() {
        // `classes`由`classification`去重而来，必能找到
        if let Ok(col) = classes.binary_search(label) {
            data[row * num_classes + col] = 1.0;
        }
    }

    Ok((
        Tensor::new(&data, &[classification.len(), num_classes]),
        classes,
    ))
}
