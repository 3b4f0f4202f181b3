use crate::math::matrix::Matrix;

pub struct BceLoss;

/// Probabilities are clipped to [EPS, 1 - EPS] before taking logs.
pub const EPS: f64 = 1e-7;

fn clip(p: f64) -> f64 {
    p.clamp(EPS, 1.0 - EPS)
}

impl BceLoss {
    /// Scalar BCE: -mean(y·ln(p) + (1-y)·ln(1-p))
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        let n = predicted.len() as f64;
        predicted.data.iter().zip(&expected.data)
            .map(|(&p, &y)| {
                let p = clip(p);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>() / n
    }

    /// ∂L/∂p per element: (p - y) / (p·(1 - p)) / n
    ///
    /// Paired with a sigmoid output the activation derivative cancels the
    /// denominator and the delta reduces to (p - y) / n.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.len() as f64;
        let data = predicted.data.iter().zip(&expected.data)
            .map(|(&p, &y)| {
                let p = clip(p);
                (p - y) / (p * (1.0 - p)) / n
            })
            .collect();
        Matrix { rows: predicted.rows, cols: predicted.cols, data }
    }
}
