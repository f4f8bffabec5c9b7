use std::fmt;

/// Pivots with a smaller magnitude than this are treated as zero.
const PIVOT_EPS: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    EmptyInput,
    DimensionMismatch { left: (usize, usize), right: (usize, usize) },
    VectorLengthMismatch { cols: usize, len: usize },
    NotSquare { rows: usize, cols: usize },
    Singular,
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::EmptyInput => write!(f, "matrix has no rows"),
            MatrixError::DimensionMismatch { left, right } => {
                write!(
                    f,
                    "incompatible shapes: {}x{} times {}x{}",
                    left.0, left.1, right.0, right.1
                )
            },
            MatrixError::VectorLengthMismatch { cols, len } => {
                write!(f, "matrix has {cols} columns but vector has length {len}")
            },
            MatrixError::NotSquare { rows, cols } => {
                write!(f, "inverse requires a square matrix, got {rows}x{cols}")
            },
            MatrixError::Singular => write!(f, "matrix is singular or near-singular"),
        }
    }
}

impl std::error::Error for MatrixError {}

pub type MatrixResult<T> = Result<T, MatrixError>;

pub fn transpose(a: &[Vec<f64>]) -> MatrixResult<Vec<Vec<f64>>> {
    if a.is_empty() || a[0].is_empty() {
        return Err(MatrixError::EmptyInput);
    }
    let rows = a.len();
    let cols = a[0].len();
    let mut out = vec![vec![0.0; rows]; cols];
    for (i, row) in a.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            out[j][i] = val;
        }
    }
    Ok(out)
}

pub fn multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> MatrixResult<Vec<Vec<f64>>> {
    if a.is_empty() || a[0].is_empty() || b.is_empty() || b[0].is_empty() {
        return Err(MatrixError::EmptyInput);
    }
    if a[0].len() != b.len() {
        return Err(MatrixError::DimensionMismatch {
            left: (a.len(), a[0].len()),
            right: (b.len(), b[0].len()),
        });
    }
    let n = a.len();
    let m = b[0].len();
    let inner = b.len();
    let mut out = vec![vec![0.0; m]; n];
    for i in 0..n {
        for j in 0..m {
            let mut sum = 0.0;
            for k in 0..inner {
                sum += a[i][k] * b[k][j];
            }
            out[i][j] = sum;
        }
    }
    Ok(out)
}

/// Treats `v` as a column vector; returns `a * v`.
pub fn multiply_vector(a: &[Vec<f64>], v: &[f64]) -> MatrixResult<Vec<f64>> {
    if a.is_empty() || a[0].is_empty() {
        return Err(MatrixError::EmptyInput);
    }
    if a[0].len() != v.len() {
        return Err(MatrixError::VectorLengthMismatch { cols: a[0].len(), len: v.len() });
    }
    Ok(a.iter().map(|row| row.iter().zip(v).map(|(&x, &y)| x * y).sum()).collect())
}

/// Gauss-Jordan inverse with partial pivoting.
///
/// Augments with the identity, swaps in the max-magnitude pivot row before
/// each elimination step, eliminates below in a forward pass and above in a
/// backward pass, then normalizes each row by its pivot. A pivot below
/// `PIVOT_EPS` means the matrix is not invertible.
pub fn inverse(a: &[Vec<f64>]) -> MatrixResult<Vec<Vec<f64>>> {
    if a.is_empty() || a[0].is_empty() {
        return Err(MatrixError::EmptyInput);
    }
    let n = a.len();
    if a.iter().any(|row| row.len() != n) {
        return Err(MatrixError::NotSquare { rows: n, cols: a[0].len() });
    }

    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.extend((0..n).map(|j| if i == j { 1.0 } else { 0.0 }));
            r
        })
        .collect();

    // forward pass
    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if aug[k][i].abs() > aug[max_row][i].abs() {
                max_row = k;
            }
        }
        aug.swap(i, max_row);

        if aug[i][i].abs() < PIVOT_EPS {
            return Err(MatrixError::Singular);
        }

        for k in (i + 1)..n {
            let factor = aug[k][i] / aug[i][i];
            for j in i..(2 * n) {
                aug[k][j] -= factor * aug[i][j];
            }
        }
    }

    // backward pass
    for i in (0..n).rev() {
        for k in (0..i).rev() {
            let factor = aug[k][i] / aug[i][i];
            for j in 0..(2 * n) {
                aug[k][j] -= factor * aug[i][j];
            }
        }
    }

    // normalize each row by its pivot
    for i in 0..n {
        let divisor = aug[i][i];
        for val in aug[i].iter_mut() {
            *val /= divisor;
        }
    }

    Ok(aug.into_iter().map(|row| row[n..].to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &[Vec<f64>], b: &[Vec<f64>], tol: f64) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(ra, rb)| ra.iter().zip(rb).all(|(x, y)| (x - y).abs() < tol))
    }

    #[test]
    fn test_transpose_roundtrip() {
        let a = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let back = transpose(&transpose(&a).unwrap()).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn test_transpose_empty() {
        assert_eq!(transpose(&[]), Err(MatrixError::EmptyInput));
    }

    #[test]
    fn test_multiply_shapes() {
        let a = vec![vec![1.0, 2.0]];
        let b = vec![vec![3.0], vec![4.0]];
        assert_eq!(multiply(&a, &b).unwrap(), vec![vec![11.0]]);

        let bad = vec![vec![1.0, 2.0, 3.0]];
        assert!(matches!(multiply(&a, &bad), Err(MatrixError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_multiply_vector() {
        let a = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(multiply_vector(&a, &[1.0, 1.0]).unwrap(), vec![3.0, 7.0]);
        assert!(matches!(
            multiply_vector(&a, &[1.0]),
            Err(MatrixError::VectorLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_inverse_known() {
        let a = vec![vec![4.0, 7.0], vec![2.0, 6.0]];
        let inv = inverse(&a).unwrap();
        let expected = vec![vec![0.6, -0.7], vec![-0.2, 0.4]];
        assert!(approx_eq(&inv, &expected, 1e-12));
    }

    #[test]
    fn test_inverse_times_original_is_identity() {
        let a = vec![
            vec![2.0, -1.0, 0.0],
            vec![-1.0, 2.0, -1.0],
            vec![0.0, -1.0, 2.0],
        ];
        let inv = inverse(&a).unwrap();
        let prod = multiply(&a, &inv).unwrap();
        let identity = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        assert!(approx_eq(&prod, &identity, 1e-9));
    }

    #[test]
    fn test_inverse_matches_nalgebra() {
        let a = vec![
            vec![3.0, 0.5, 2.0],
            vec![1.0, 4.0, -1.0],
            vec![2.5, 1.0, 5.0],
        ];
        let inv = inverse(&a).unwrap();

        let flat: Vec<f64> = a.iter().flatten().copied().collect();
        let na = nalgebra::DMatrix::from_row_slice(3, 3, &flat);
        let na_inv = na.try_inverse().unwrap();

        for i in 0..3 {
            for j in 0..3 {
                assert!((inv[i][j] - na_inv[(i, j)]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_inverse_singular() {
        let a = vec![vec![1.0, 2.0], vec![1.0, 2.0]];
        assert_eq!(inverse(&a), Err(MatrixError::Singular));
    }

    #[test]
    fn test_inverse_not_square() {
        let a = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        assert!(matches!(inverse(&a), Err(MatrixError::NotSquare { .. })));
    }
}
