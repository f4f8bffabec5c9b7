use serde::{Deserialize, Serialize};

/// One observed row: three predictors plus the units actually sold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub visitors: f64,
    pub page_views: f64,
    pub orders: f64,
    pub units_sold: f64,
}

impl SalesRecord {
    pub fn new(visitors: f64, page_views: f64, orders: f64, units_sold: f64) -> Self {
        Self { visitors, page_views, orders, units_sold }
    }

    /// Feature order is fixed: visitors, page views, orders.
    pub fn features(&self) -> Vec<f64> {
        vec![self.visitors, self.page_views, self.orders]
    }
}

/// A test row annotated with the model's rounded prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub visitors: f64,
    pub page_views: f64,
    pub orders: f64,
    pub units_sold: f64,
    pub predicted_units: i64,
}

impl EvaluationRecord {
    pub fn from_record(record: &SalesRecord, predicted_units: i64) -> Self {
        Self {
            visitors: record.visitors,
            page_views: record.page_views,
            orders: record.orders,
            units_sold: record.units_sold,
            predicted_units,
        }
    }
}
