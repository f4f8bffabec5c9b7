use crate::regression::fiterror::{FitError, FitResult};
use crate::regression::model::{FitMetrics, MetricsSource, SalesModel};
use crate::regression::record::{EvaluationRecord, SalesRecord};
use crate::stats::{mae, mape, mse, r_squared};

/// Apply a fitted model to held-out rows.
///
/// Predictions are rounded to whole unit counts and the metrics are
/// computed against those rounded values, using the test set's own mean.
/// Returns the annotated rows plus a new model whose metrics are replaced
/// and tagged [`MetricsSource::Test`]; intercept and coefficients are
/// untouched.
///
/// An empty test set is rejected with [`FitError::NotEnoughRows`]. The
/// system this replaces emitted all-NaN metrics for that case; confirm
/// with downstream consumers before relying on either behavior.
pub fn evaluate(
    model: &SalesModel,
    rows: &[SalesRecord],
) -> FitResult<(Vec<EvaluationRecord>, SalesModel)> {
    if rows.is_empty() {
        return Err(FitError::NotEnoughRows { len: 0, needed: 1 });
    }

    let mut annotated = Vec::with_capacity(rows.len());
    for row in rows {
        let predicted = model.predict(&row.features())?;
        annotated.push(EvaluationRecord::from_record(row, predicted));
    }

    let actual: Vec<f64> = rows.iter().map(|r| r.units_sold).collect();
    let predicted: Vec<f64> = annotated.iter().map(|r| r.predicted_units as f64).collect();

    let metrics = FitMetrics {
        r_squared: r_squared(&actual, &predicted),
        mse: mse(&actual, &predicted),
        mae: mae(&actual, &predicted),
        mape: mape(&actual, &predicted),
    };

    Ok((annotated, model.with_metrics(metrics, MetricsSource::Test)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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
    fn test_evaluate_annotates_and_retags() {
        let m = model();
        let rows = vec![
            // exact: 2 + 3*1 + 0.5*2 + 1*3 = 9
            SalesRecord::new(1.0, 2.0, 3.0, 9.0),
            // exact: 2 + 3*2 + 0.5*4 + 1*1 = 11, observed 13
            SalesRecord::new(2.0, 4.0, 1.0, 13.0),
        ];
        let (annotated, updated) = evaluate(&m, &rows).unwrap();

        assert_eq!(annotated[0].predicted_units, 9);
        assert_eq!(annotated[1].predicted_units, 11);
        assert_eq!(annotated[1].units_sold, 13.0);

        assert_eq!(updated.metrics_source, MetricsSource::Test);
        assert_eq!(updated.intercept, m.intercept);
        assert_eq!(updated.coefficients, m.coefficients);
        // residuals 0 and 2 over two rows
        assert!((updated.metrics.mse - 2.0).abs() < 1e-12);
        assert!((updated.metrics.mae - 1.0).abs() < 1e-12);
        // original model keeps its training tag
        assert_eq!(m.metrics_source, MetricsSource::Training);
    }

    #[test]
    fn test_evaluate_mape_counts_zero_target_rows_in_n() {
        let m = model();
        let rows = vec![
            SalesRecord::new(1.0, 2.0, 3.0, 9.0),  // predicted 9, 0% error
            SalesRecord::new(0.0, 0.0, 0.0, 0.0),  // zero target, skipped from sum
            SalesRecord::new(2.0, 4.0, 1.0, 10.0), // predicted 11, 10% error
        ];
        let (_, updated) = evaluate(&m, &rows).unwrap();
        // (0% + 10%) / 3 rows, not / 2
        assert!((updated.metrics.mape - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_empty_rows() {
        let m = model();
        assert!(matches!(
            evaluate(&m, &[]),
            Err(FitError::NotEnoughRows { len: 0, needed: 1 })
        ));
    }
}
