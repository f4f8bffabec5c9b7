use crate::csv_read::{read_records, write_evaluation_records};

use salesreg_core::regression::{evaluate, fit, FitError, SalesModel};

use std::fs;
use std::path::{Path, PathBuf};

/* =================== Public configuration types =================== */

#[derive(Debug)]
pub struct Config {
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Train(Train),
    Evaluate(Evaluate),
    Predict(Predict),
}

#[derive(Debug, Clone)]
pub struct Train {
    pub inputs: Vec<PathBuf>,
    pub model_out: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Evaluate {
    pub model: PathBuf,
    pub inputs: Vec<PathBuf>,
    pub predictions_out: Option<PathBuf>,
    pub model_out: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Predict {
    pub model: PathBuf,
    pub visitors: f64,
    pub page_views: f64,
    pub orders: f64,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("model file error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fit error: {0}")]
    Fit(#[from] FitError),
    #[error("{0}")]
    Msg(String),
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        match &self.action {
            Action::Train(t) => run_train(t),
            Action::Evaluate(e) => run_evaluate(e),
            Action::Predict(p) => run_predict(p),
        }
    }
}

/* =================== Actions =================== */

fn run_train(t: &Train) -> Result<(), CmdError> {
    let rows = read_records(&t.inputs)?;
    if rows.is_empty() {
        return Err(CmdError::Msg(format!("No training rows found in {:?}", t.inputs)));
    }
    println!("Read {} training rows.", rows.len());

    let model = fit(&rows)?;
    print_model(&model);

    if let Some(path) = &t.model_out {
        save_model(path, &model)?;
        println!("Model written to {}", path.display());
    }
    Ok(())
}

fn run_evaluate(e: &Evaluate) -> Result<(), CmdError> {
    let model = load_model(&e.model)?;
    let rows = read_records(&e.inputs)?;
    println!("Read {} test rows.", rows.len());

    let (annotated, updated) = evaluate(&model, &rows)?;

    println!("visitors\tpage_views\torders\tactual\tpredicted");
    for rec in &annotated {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            rec.visitors, rec.page_views, rec.orders, rec.units_sold, rec.predicted_units
        );
    }
    print_model(&updated);

    if let Some(path) = &e.predictions_out {
        write_evaluation_records(path, &annotated)?;
        println!("Predictions written to {}", path.display());
    }
    if let Some(path) = &e.model_out {
        save_model(path, &updated)?;
        println!("Model written to {}", path.display());
    }
    Ok(())
}

fn run_predict(p: &Predict) -> Result<(), CmdError> {
    let model = load_model(&p.model)?;
    let predicted = model.predict(&[p.visitors, p.page_views, p.orders])?;
    println!("{predicted}");
    Ok(())
}

/* =================== Helpers =================== */

fn load_model(path: &Path) -> Result<SalesModel, CmdError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn save_model(path: &Path, model: &SalesModel) -> Result<(), CmdError> {
    fs::write(path, serde_json::to_string_pretty(model)?)?;
    Ok(())
}

fn print_model(model: &SalesModel) {
    println!("intercept: {:.6}", model.intercept);
    println!(
        "coefficients (visitors, page_views, orders): {:?}",
        model.coefficients
    );
    println!(
        "metrics ({} set): r2 {:.6}, mse {:.6}, mae {:.6}, mape {:.4}%",
        model.metrics_source,
        model.metrics.r_squared,
        model.metrics.mse,
        model.metrics.mae,
        model.metrics.mape
    );
    if let Some(inference) = &model.inference {
        println!("sigma: {:.6}", inference.sigma);
        for (i, ((se, t), p)) in inference
            .std_errors
            .iter()
            .zip(&inference.t_stats)
            .zip(&inference.p_values)
            .enumerate()
        {
            let name = match i {
                0 => "intercept",
                1 => "visitors",
                2 => "page_views",
                3 => "orders",
                _ => "coef",
            };
            println!("  {name}: se {se:.6}, t {t:.4}, p {p:.6}");
        }
    }
}
