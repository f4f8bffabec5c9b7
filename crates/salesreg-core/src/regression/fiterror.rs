use crate::matrix::MatrixError;

use std::fmt;

#[derive(Debug)]
pub enum FitError {
    NotEnoughRows { len: usize, needed: usize },
    SingularDesign,
    FeatureLengthMismatch { expected: usize, got: usize },
    Matrix(MatrixError),
    StatError(&'static str),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::NotEnoughRows { len, needed } => {
                write!(f, "not enough rows: got {len}, need at least {needed}")
            },
            FitError::SingularDesign => {
                write!(
                    f,
                    "design matrix is singular: predictors are collinear or show too little variation"
                )
            },
            FitError::FeatureLengthMismatch { expected, got } => {
                write!(f, "feature vector has length {got}, model expects {expected}")
            },
            FitError::Matrix(e) => write!(f, "matrix error: {e}"),
            FitError::StatError(msg) => write!(f, "statistical error: {msg}"),
        }
    }
}

impl std::error::Error for FitError {}

impl From<MatrixError> for FitError {
    fn from(err: MatrixError) -> Self {
        match err {
            MatrixError::Singular => FitError::SingularDesign,
            other => FitError::Matrix(other),
        }
    }
}

pub type FitResult<T> = Result<T, FitError>;
