pub mod matrix;
pub mod regression;
pub mod stats;

pub use regression::{
    evaluate, fit, CoefficientStats, EvaluationRecord, FitError, FitMetrics, FitResult,
    MetricsSource, SalesModel, SalesRecord,
};
