//! Non-negative least squares.
//!
//! The Prony moduli are physical spring constants, so the fit solves
//!
//! ```text
//! minimize ‖A x - b‖₂   subject to   x ≥ 0
//! ```
//!
//! with the Lawson–Hanson active-set method: grow a passive set of columns
//! allowed to be positive, solve the unconstrained problem restricted to
//! that set, and step back toward feasibility whenever the restricted
//! solution turns a coordinate negative.
//!
//! Implementation choices:
//! - The restricted subproblem is solved by SVD so that tall and nearly
//!   collinear systems (adjacent relaxation times produce very similar
//!   basis columns) still yield a usable solution.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)
//! - The dual tolerance scales with the matrix norm, so detecting "no
//!   column can improve the fit" is unit-independent.
//! - Total restricted solves are capped at `3n`; hitting the cap reports
//!   failure rather than looping on a degenerate system.

use nalgebra::{DMatrix, DVector};

/// Outcome of a converged non-negative solve.
pub struct NnlsSolution {
    /// Coefficient per column of the design matrix, each `>= 0`.
    pub coefficients: DVector<f64>,
    /// `‖A x - b‖₂` at the solution.
    pub residual_norm: f64,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve `min ‖A x - b‖₂` subject to `x ≥ 0`.
///
/// Returns `None` when the active-set iteration fails to converge or a
/// restricted subproblem is unsolvable. An all-zero solution is a valid
/// outcome, not a failure.
pub fn nnls(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<NnlsSolution> {
    let (m, n) = a.shape();
    if m == 0 || n == 0 || b.len() != m {
        return None;
    }

    let tol = dual_tolerance(a);
    let max_solves = 3 * n;
    let mut solves = 0;

    let mut x = DVector::<f64>::zeros(n);
    let mut passive = vec![false; n];

    loop {
        let residual = b - a * &x;
        let w = a.tr_mul(&residual);

        // Pick the zero-set column whose gradient most wants it positive.
        let mut enter: Option<usize> = None;
        for j in 0..n {
            if passive[j] || w[j] <= tol {
                continue;
            }
            if enter.is_none_or(|e| w[j] > w[e]) {
                enter = Some(j);
            }
        }
        let Some(enter) = enter else {
            // KKT holds at every zero coordinate.
            let residual_norm = residual.norm();
            return Some(NnlsSolution {
                coefficients: x,
                residual_norm,
            });
        };
        passive[enter] = true;

        // Re-solve on the passive set, shrinking it until the restricted
        // solution is feasible.
        loop {
            let cols: Vec<usize> = (0..n).filter(|&j| passive[j]).collect();
            if cols.is_empty() {
                break;
            }

            solves += 1;
            if solves > max_solves {
                return None;
            }

            let sub = a.select_columns(cols.iter());
            let z = solve_least_squares(&sub, b)?;

            if z.iter().all(|&v| v > 0.0) {
                x.fill(0.0);
                for (k, &j) in cols.iter().enumerate() {
                    x[j] = z[k];
                }
                break;
            }

            // Step from x toward z as far as feasibility allows and retire
            // the coordinate that hits zero first.
            let mut alpha = f64::INFINITY;
            let mut leave: Option<usize> = None;
            for (k, &j) in cols.iter().enumerate() {
                if z[k] > 0.0 {
                    continue;
                }
                let denom = x[j] - z[k];
                if denom > 0.0 {
                    let ratio = x[j] / denom;
                    if ratio < alpha {
                        alpha = ratio;
                        leave = Some(j);
                    }
                }
            }

            match leave {
                Some(leave) => {
                    for (k, &j) in cols.iter().enumerate() {
                        x[j] += alpha * (z[k] - x[j]);
                    }
                    x[leave] = 0.0;
                    passive[leave] = false;
                    // The same step can park other coordinates at zero.
                    for (k, &j) in cols.iter().enumerate() {
                        if passive[j] && z[k] <= 0.0 && x[j] <= 0.0 {
                            x[j] = 0.0;
                            passive[j] = false;
                        }
                    }
                }
                None => {
                    // Every violation sits at x = z = 0 already; drop them.
                    for (k, &j) in cols.iter().enumerate() {
                        if z[k] <= 0.0 {
                            x[j] = 0.0;
                            passive[j] = false;
                        }
                    }
                }
            }
        }
    }
}

/// Threshold below which a dual coordinate counts as non-improving.
fn dual_tolerance(a: &DMatrix<f64>) -> f64 {
    let (m, n) = a.shape();
    let norm1 = (0..n)
        .map(|j| a.column(j).iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0_f64, f64::max);
    10.0 * f64::EPSILON * norm1 * m.max(n) as f64
}
