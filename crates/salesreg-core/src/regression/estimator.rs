use crate::matrix::{inverse, multiply, multiply_vector, transpose};
use crate::regression::fiterror::{FitError, FitResult};
use crate::regression::model::{CoefficientStats, FitMetrics, MetricsSource, SalesModel};
use crate::regression::record::SalesRecord;
use crate::stats::{mae, mape, mse, r_squared};

use chrono::Utc;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Fit a least-squares model to the training rows via the normal equation
/// β = (XᵀX)⁻¹Xᵀy. Metrics on the returned model are in-sample and tagged
/// [`MetricsSource::Training`].
pub fn fit(rows: &[SalesRecord]) -> FitResult<SalesModel> {
    let x_rows: Vec<Vec<f64>> = rows.iter().map(|r| r.features()).collect();
    let y: Vec<f64> = rows.iter().map(|r| r.units_sold).collect();
    fit_design(&x_rows, &y)
}

/// Width-agnostic fit over raw feature rows; `fit` is the typed front door.
pub fn fit_design(x_rows: &[Vec<f64>], y: &[f64]) -> FitResult<SalesModel> {
    let n_features = x_rows.first().map(|r| r.len()).unwrap_or(0);
    let needed = n_features + 1;
    if x_rows.len() < needed {
        return Err(FitError::NotEnoughRows { len: x_rows.len(), needed });
    }

    // design matrix with a leading intercept column, row order preserved
    let x: Vec<Vec<f64>> = x_rows
        .iter()
        .map(|features| {
            let mut row = Vec::with_capacity(needed);
            row.push(1.0);
            row.extend_from_slice(features);
            row
        })
        .collect();

    let xt = transpose(&x)?;
    let xtx = multiply(&xt, &x)?;
    let xtx_inv = inverse(&xtx)?;
    let xty = multiply_vector(&xt, y)?;
    let beta = multiply_vector(&xtx_inv, &xty)?;

    let intercept = beta[0];
    let coefficients = beta[1..].to_vec();

    let y_hat: Vec<f64> =
        x.iter().map(|row| beta.iter().zip(row).map(|(&b, &v)| b * v).sum()).collect();

    let metrics = FitMetrics {
        r_squared: r_squared(y, &y_hat),
        mse: mse(y, &y_hat),
        mae: mae(y, &y_hat),
        mape: mape(y, &y_hat),
    };

    let inference = coefficient_stats(&beta, &xtx_inv, y, &y_hat)?;

    Ok(SalesModel {
        intercept,
        coefficients,
        metrics,
        metrics_source: MetricsSource::Training,
        trained_at: Utc::now(),
        inference,
    })
}

/// Standard errors, t statistics and p-values for each parameter from the
/// OLS variance formula Var(β) = σ²(XᵀX)⁻¹. None when the fit is exact or
/// there are no degrees of freedom left, both common with tiny datasets.
fn coefficient_stats(
    beta: &[f64],
    xtx_inv: &[Vec<f64>],
    y: &[f64],
    y_hat: &[f64],
) -> FitResult<Option<CoefficientStats>> {
    let n = y.len();
    let p = beta.len();
    if n <= p {
        return Ok(None);
    }
    let df = (n - p) as f64;

    let rss: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
    // an (effectively) exact fit leaves nothing to estimate sigma from
    if !rss.is_finite() || rss <= 1e-12 {
        return Ok(None);
    }
    let sigma = (rss / df).sqrt();

    let std_errors: Vec<f64> = (0..p).map(|j| sigma * xtx_inv[j][j].sqrt()).collect();
    if std_errors.iter().any(|se| !se.is_finite() || *se <= 0.0) {
        return Ok(None);
    }

    let t_stats: Vec<f64> = beta.iter().zip(&std_errors).map(|(&b, &se)| b / se).collect();

    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|_| FitError::StatError("failed to construct StudentsT"))?;
    let p_values: Vec<f64> = t_stats.iter().map(|&t| 2.0 * (1.0 - dist.cdf(t.abs()))).collect();

    Ok(Some(CoefficientStats { sigma, std_errors, t_stats, p_values }))
}
