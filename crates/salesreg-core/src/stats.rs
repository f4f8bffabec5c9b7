pub fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// 1 - SS_res/SS_tot with SS_tot taken from the sample mean of `y`.
///
/// A zero-variance target makes this NaN or -inf; that degenerate value is
/// passed through on purpose so callers can detect and display it.
pub fn r_squared(y: &[f64], y_hat: &[f64]) -> f64 {
    let y_mean = mean(y);
    let ss_res: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
    1.0 - ss_res / ss_tot
}

pub fn mse(y: &[f64], y_hat: &[f64]) -> f64 {
    let ss_res: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum();
    ss_res / y.len() as f64
}

pub fn mae(y: &[f64], y_hat: &[f64]) -> f64 {
    let sum: f64 = y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).abs()).sum();
    sum / y.len() as f64
}

/// Mean absolute percentage error.
///
/// Rows with `y_i == 0` are skipped from the sum but the divisor stays the
/// full row count. Different from the usual skip-both convention; kept on
/// purpose so results match the system this replaces.
pub fn mape(y: &[f64], y_hat: &[f64]) -> f64 {
    let sum: f64 = y
        .iter()
        .zip(y_hat)
        .filter(|(&yi, _)| yi != 0.0)
        .map(|(&yi, &yhi)| ((yi - yhi) / yi).abs() * 100.0)
        .sum();
    sum / y.len() as f64
}
