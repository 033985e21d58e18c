use ndarray::ArrayView1;

use crate::error::{Result, TrainerError};

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Can be negative when the predictions are worse than predicting the mean.
/// If the true values are constant, returns 1.0 for a perfect prediction and
/// 0.0 otherwise.
pub fn r2_score(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(TrainerError::InvalidInput(format!(
            "r2_score: {} true values but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(TrainerError::InvalidInput(
            "r2_score: no values to score".to_string(),
        ));
    }

    // Constant truth has no variance to explain.
    let first = y_true[0];
    if y_true.iter().all(|&t| t == first) {
        return Ok(if y_true == y_pred { 1.0 } else { 0.0 });
    }
    Ok(smartcore::metrics::r2(&y_true.to_vec(), &y_pred.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use ndarray::array;

    #[test]
    fn test_perfect_prediction() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(r2_score(y.view(), y.view()).unwrap(), 1.0);
    }

    #[test]
    fn test_mean_prediction_scores_zero() {
        let y = array![1.0, 2.0, 3.0];
        let p = array![2.0, 2.0, 2.0];
        assert_float_absolute_eq!(r2_score(y.view(), p.view()).unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn test_known_value() {
        // ss_res = 0.25 * 4 = 1.0, ss_tot = 5.0
        let y = array![1.0, 2.0, 3.0, 4.0];
        let p = array![1.5, 1.5, 3.5, 3.5];
        assert_float_absolute_eq!(r2_score(y.view(), p.view()).unwrap(), 0.8, 1e-12);
    }

    #[test]
    fn test_worse_than_mean_is_negative() {
        let y = array![1.0, 2.0, 3.0];
        let p = array![3.0, 2.0, 1.0];
        assert!(r2_score(y.view(), p.view()).unwrap() < 0.0);
    }

    #[test]
    fn test_constant_truth() {
        let y = array![5.0, 5.0];
        assert_eq!(r2_score(y.view(), array![5.0, 5.0].view()).unwrap(), 1.0);
        assert_eq!(r2_score(y.view(), array![4.0, 5.0].view()).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let y = array![1.0, 2.0];
        let p = array![1.0];
        assert!(matches!(
            r2_score(y.view(), p.view()),
            Err(TrainerError::InvalidInput(_))
        ));
    }
}
