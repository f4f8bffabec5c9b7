use clap::{Args, Parser, Subcommand, ValueHint};
use glob::glob;
use std::path::PathBuf;

use crate::cmd::config::{Action, Config, Evaluate as EvaluateCfg, Predict as PredictCfg, Train as TrainCfg};

#[derive(Debug, Parser)]
#[command(
    name = "salesreg",
    about = "Unit Sales Regression Tool",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit a model on training rows
    Train(TrainArgs),

    /// Evaluate a trained model on held-out rows
    Evaluate(EvaluateArgs),

    /// Predict units sold for a single feature vector
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Training CSV files (quote glob patterns)
    #[arg(num_args = 1..,
        value_hint = ValueHint::AnyPath,
        required = true,
        short = 'i', long = "inputs",
        value_name = "Input files")]
    pub inputs: Vec<String>,

    /// Write the trained model as JSON
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub model_out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Trained model JSON
    #[arg(short = 'm', long = "model", value_name = "PATH")]
    pub model: PathBuf,

    /// Test CSV files (quote glob patterns)
    #[arg(num_args = 1..,
        value_hint = ValueHint::AnyPath,
        required = true,
        short = 'i', long = "inputs",
        value_name = "Input files")]
    pub inputs: Vec<String>,

    /// Write annotated rows as CSV
    #[arg(long = "predictions", value_name = "PATH")]
    pub predictions_out: Option<PathBuf>,

    /// Write the model re-tagged with test metrics as JSON
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub model_out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Trained model JSON
    #[arg(short = 'm', long = "model", value_name = "PATH")]
    pub model: PathBuf,

    /// Visitor count
    #[arg(long)]
    pub visitors: f64,

    /// Page view count
    #[arg(long = "page-views")]
    pub page_views: f64,

    /// Order count
    #[arg(long)]
    pub orders: f64,
}

/// Expand inputs into actual files; wildcards go through glob, anything else
/// is taken as a literal path.
pub fn resolve_inputs(inputs: &[String]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for inp in inputs {
        if inp.contains('*') || inp.contains('?') || inp.contains('[') {
            match glob(inp) {
                Ok(paths) => out.extend(paths.filter_map(Result::ok)),
                Err(e) => eprintln!("Invalid glob '{}': {}", inp, e),
            }
        } else {
            out.push(PathBuf::from(inp));
        }
    }
    out
}

// -------- Map CLI -> Config/Action types --------

impl Cli {
    pub fn into_config(self) -> Config {
        match self.command {
            Commands::Train(args) => Config {
                action: Action::Train(TrainCfg {
                    inputs: resolve_inputs(&args.inputs),
                    model_out: args.model_out,
                }),
            },
            Commands::Evaluate(args) => Config {
                action: Action::Evaluate(EvaluateCfg {
                    model: args.model,
                    inputs: resolve_inputs(&args.inputs),
                    predictions_out: args.predictions_out,
                    model_out: args.model_out,
                }),
            },
            Commands::Predict(args) => Config {
                action: Action::Predict(PredictCfg {
                    model: args.model,
                    visitors: args.visitors,
                    page_views: args.page_views,
                    orders: args.orders,
                }),
            },
        }
    }
}
