mod softmax;

use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

fn assert_tensor_near(actual: &Tensor, expected: &Tensor) {
    assert_eq!(actual.shape(), expected.shape());
    for (a, e) in actual.data_as_vec().iter().zip(expected.data_as_vec()) {
        assert_abs_diff_eq!(*a, e, epsilon = 1e-5);
    }
}
