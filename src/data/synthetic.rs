use rand::Rng;

use crate::math::matrix::Matrix;

/// Features with one sample per row, and a single label column.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Matrix,
}

impl Dataset {
    /// Uniform features in [0, 1) and independent coin-flip labels.
    ///
    /// The labels carry no signal, so a model trained on this data should
    /// score close to chance.
    pub fn synthetic<R: Rng + ?Sized>(samples: usize, features: usize, rng: &mut R) -> Dataset {
        Dataset {
            features: random_features(samples, features, rng),
            labels: random_binary_labels(samples, rng),
        }
    }

    pub fn len(&self) -> usize {
        self.features.rows
    }

    pub fn is_empty(&self) -> bool {
        self.features.rows == 0
    }
}

pub fn random_features<R: Rng + ?Sized>(samples: usize, features: usize, rng: &mut R) -> Matrix {
    Matrix::random_uniform(samples, features, 0.0, 1.0, rng)
}

pub fn random_binary_labels<R: Rng + ?Sized>(samples: usize, rng: &mut R) -> Matrix {
    Matrix::column((0..samples).map(|_| rng.gen_range(0..2) as f64).collect())
}
