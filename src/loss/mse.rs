use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        let n = predicted.len() as f64;
        predicted.data.iter().zip(&expected.data)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// ∂L/∂p per element: 2·(predicted - expected) / n
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.len() as f64;
        (predicted - expected).scale(2.0 / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse_value_and_gradient() {
        let p = Matrix::column(vec![1.0, 3.0]);
        let y = Matrix::column(vec![0.0, 1.0]);
        assert_eq!(MseLoss::loss(&p, &y), 2.5);
        assert_eq!(MseLoss::derivative(&p, &y).data, vec![1.0, 2.0]);
    }
}
