//! Dense linear-algebra kernels: LU factorization and solve.
//!
//! The saddle-point iteration matrix is square but not symmetric, so
//! Cholesky is out and the solve goes through a partial-pivot LU (the
//! general-solve path a LAPACK `dgesv` would take). Sizes stay small
//! (n + m, nine for the heavy top), so a straightforward dense
//! factorization is all that's needed.

use nalgebra::{DMatrix, DVector};

use crate::error::StepError;

/// Pivot magnitudes below this count as a singular matrix.
const PIVOT_TOLERANCE: f64 = 1e-30;

/// Overwrite `matrix` with its P*L*U factors: multipliers of the unit
/// lower triangle below the diagonal, U on and above it. `pivots[c]`
/// records the row swapped into place at column c.
///
/// # Errors
///
/// Returns `Err(StepError::LuSingular)` when no usable pivot remains in
/// a column.
pub(crate) fn plu_decompose(matrix: &mut DMatrix<f64>, pivots: &mut [usize]) -> Result<(), StepError> {
    let n = matrix.nrows();

    for col in 0..n {
        // Largest remaining magnitude in this column picks the pivot.
        let mut pivot_row = col;
        let mut pivot_mag = matrix[(col, col)].abs();
        for row in (col + 1)..n {
            let mag = matrix[(row, col)].abs();
            if mag > pivot_mag {
                pivot_row = row;
                pivot_mag = mag;
            }
        }
        if pivot_mag < PIVOT_TOLERANCE {
            return Err(StepError::LuSingular);
        }

        pivots[col] = pivot_row;
        if pivot_row != col {
            matrix.swap_rows(col, pivot_row);
        }

        // Eliminate below the pivot, keeping the multipliers in place.
        let pivot = matrix[(col, col)];
        for row in (col + 1)..n {
            let multiplier = matrix[(row, col)] / pivot;
            matrix[(row, col)] = multiplier;
            for k in (col + 1)..n {
                matrix[(row, k)] -= multiplier * matrix[(col, k)];
            }
        }
    }

    Ok(())
}

/// Solve P*L*U*x = b from the factors left by [`plu_decompose`],
/// replacing `rhs` with the solution. The factors are untouched, so
/// one decomposition serves any number of right-hand sides.
pub(crate) fn plu_solve(factors: &DMatrix<f64>, pivots: &[usize], rhs: &mut DVector<f64>) {
    let n = factors.nrows();

    // Replay the row exchanges on the RHS.
    for col in 0..n {
        if pivots[col] != col {
            rhs.swap_rows(col, pivots[col]);
        }
    }

    // L*y = Pb, unit diagonal: each finished entry scatters down its
    // column.
    for col in 0..n {
        let y = rhs[col];
        for row in (col + 1)..n {
            rhs[row] -= factors[(row, col)] * y;
        }
    }

    // U*x = y, sweeping columns right to left.
    for col in (0..n).rev() {
        rhs[col] /= factors[(col, col)];
        let x = rhs[col];
        for row in 0..col {
            rhs[row] -= factors[(row, col)] * x;
        }
    }
}

/// Solve A*x = b for general (possibly non-symmetric) A, replacing `b`
/// with the solution. `a` is copied for the factorization and left
/// untouched.
///
/// # Errors
///
/// Returns `Err(StepError::LuSingular)` when the matrix is singular to
/// working precision.
///
/// # Panics
///
/// Panics on shape mismatch; passing a non-square matrix or a RHS of
/// the wrong length is a programming error.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &mut DVector<f64>) -> Result<(), StepError> {
    assert_eq!(a.nrows(), a.ncols(), "system matrix must be square");
    assert_eq!(a.nrows(), b.len(), "RHS length must match system size");

    let mut factors = a.clone();
    let mut pivots = vec![0_usize; a.nrows()];
    plu_decompose(&mut factors, &mut pivots)?;
    plu_solve(&factors, &pivots, b);
    Ok(())
}
