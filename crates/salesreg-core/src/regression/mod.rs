pub mod estimator;
pub mod evaluator;
pub mod fiterror;
pub mod model;
pub mod record;

pub use estimator::fit;
pub use evaluator::evaluate;
pub use fiterror::{FitError, FitResult};
pub use model::{CoefficientStats, FitMetrics, MetricsSource, SalesModel};
pub use record::{EvaluationRecord, SalesRecord};
