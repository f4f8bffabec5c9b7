use crate::regression::fiterror::{FitError, FitResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Which dataset the metrics attached to a model were computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricsSource {
    Training,
    Test,
}

impl fmt::Display for MetricsSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricsSource::Training => write!(f, "training"),
            MetricsSource::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    pub r_squared: f64,
    pub mse: f64,
    pub mae: f64,
    pub mape: f64,
}

/// Per-parameter OLS inference, index 0 is the intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientStats {
    pub sigma: f64,
    pub std_errors: Vec<f64>,
    pub t_stats: Vec<f64>,
    pub p_values: Vec<f64>,
}

/// Fitted regression model. Immutable value; evaluation produces a new
/// model via [`SalesModel::with_metrics`] instead of mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub metrics: FitMetrics,
    pub metrics_source: MetricsSource,
    pub trained_at: DateTime<Utc>,
    pub inference: Option<CoefficientStats>,
}

impl fmt::Display for SalesModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SalesModel, intercept: {:.4}, coefficients: {:?}, r2 ({}): {:.4}",
            self.intercept, self.coefficients, self.metrics_source, self.metrics.r_squared
        )
    }
}

impl SalesModel {
    /// Raw prediction: intercept + dot(coefficients, features).
    pub fn calculate(&self, features: &[f64]) -> FitResult<f64> {
        if features.len() != self.coefficients.len() {
            return Err(FitError::FeatureLengthMismatch {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }
        Ok(self.intercept
            + self.coefficients.iter().zip(features).map(|(&b, &x)| b * x).sum::<f64>())
    }

    /// Prediction rounded to the nearest whole unit count.
    pub fn predict(&self, features: &[f64]) -> FitResult<i64> {
        Ok(self.calculate(features)?.round() as i64)
    }

    /// Copy of the model with its metrics replaced and re-tagged;
    /// coefficients, timestamp and inference stay fixed.
    pub fn with_metrics(&self, metrics: FitMetrics, source: MetricsSource) -> Self {
        Self { metrics, metrics_source: source, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SalesModel {
        SalesModel {
            intercept: 2.0,
            coefficients: vec![3.0, 0.5, 1.0],
            metrics: FitMetrics { r_squared: 1.0, mse: 0.0, mae: 0.0, mape: 0.0 },
            metrics_source: MetricsSource::Training,
            trained_at: Utc::now(),
            inference: None,
        }
    }

    #[test]
    fn test_calculate_and_round() {
        let m = model();
        let raw = m.calculate(&[1.0, 2.0, 3.0]).unwrap();
        assert!((raw - 9.0).abs() < 1e-12);
        assert_eq!(m.predict(&[1.0, 2.0, 3.0]).unwrap(), 9);
        // 2 + 3*1 + 0.5*1 + 1*1 = 6.5 rounds away from 6
        assert_eq!(m.predict(&[1.0, 1.0, 1.0]).unwrap(), 7);
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let m = model();
        assert!(matches!(
            m.predict(&[1.0, 2.0]),
            Err(FitError::FeatureLengthMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_with_metrics_keeps_coefficients() {
        let m = model();
        let test_metrics = FitMetrics { r_squared: 0.8, mse: 2.0, mae: 1.0, mape: 5.0 };
        let m2 = m.with_metrics(test_metrics, MetricsSource::Test);
        assert_eq!(m2.metrics_source, MetricsSource::Test);
        assert_eq!(m2.metrics, test_metrics);
        assert_eq!(m2.intercept, m.intercept);
        assert_eq!(m2.coefficients, m.coefficients);
        assert_eq!(m2.trained_at, m.trained_at);
        // original untouched
        assert_eq!(m.metrics_source, MetricsSource::Training);
    }
}
