use super::linalg::{axpy_into, cholesky_solve, dot, inf_norm, normal_equations};
use super::options::{EvalBudget, LeastSquaresProblem, LmOptions, LmResult};

fn all_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Damped Gauss-Newton with Marquardt scaling, capped at `opts.iterations` Jacobians.
///
/// Returns `None` if the residuals at `p0` are not finite, a Jacobian is not finite,
/// or no damping up to `opts.lambda_max` gives a solvable step. Running out of
/// iterations is not a failure: the best parameters so far are returned with
/// `converged == false`.
pub(crate) fn levenberg_marquardt(
    p0: &[f64],
    problem: &mut impl LeastSquaresProblem,
    opts: LmOptions,
) -> Option<LmResult> {
    let n = p0.len();
    let m = problem.n_residuals();
    let mut budget = EvalBudget::default();

    let mut p = p0.to_vec();
    let mut r = vec![0.0; m];
    problem.residuals(&p, &mut r, &mut budget)?;
    if !all_finite(&r) {
        return None;
    }
    let mut f = dot(&r, &r);

    let mut jac = vec![0.0; m * n];
    let mut jtj = vec![0.0; n * n];
    let mut jtr = vec![0.0; n];
    let mut system = vec![0.0; n * n];
    let mut step = vec![0.0; n];
    let mut p_trial = vec![0.0; n];
    let mut r_trial = vec![0.0; m];

    let mut lambda = opts.lambda0;
    let mut converged = n == 0;
    let mut iterations = 0;

    while !converged && iterations < opts.iterations {
        iterations += 1;

        problem.jacobian(&p, &mut jac, &mut budget)?;
        if !all_finite(&jac) {
            return None;
        }
        normal_equations(&mut jtj, &mut jtr, &jac, &r, n);
        if inf_norm(&jtr) <= opts.g_abstol {
            converged = true;
            break;
        }

        let mut solved_any = false;
        let mut accepted = false;
        while lambda <= opts.lambda_max {
            system.copy_from_slice(&jtj);
            for i in 0..n {
                system[i * n + i] += lambda * jtj[i * n + i].max(1e-6);
            }
            for (s, &g) in step.iter_mut().zip(jtr.iter()) {
                *s = -g;
            }
            if cholesky_solve(&mut system, &mut step).is_none() {
                lambda *= opts.lambda_up;
                continue;
            }
            solved_any = true;

            axpy_into(&mut p_trial, &p, 1.0, &step);
            let f_trial = match problem.residuals(&p_trial, &mut r_trial, &mut budget) {
                Some(()) if all_finite(&r_trial) => dot(&r_trial, &r_trial),
                _ => f64::INFINITY,
            };

            if f_trial < f {
                let step_norm = dot(&step, &step).sqrt();
                let p_norm = dot(&p, &p).sqrt();
                let rel_decrease = (f - f_trial) / f.max(f64::MIN_POSITIVE);

                std::mem::swap(&mut p, &mut p_trial);
                std::mem::swap(&mut r, &mut r_trial);
                f = f_trial;
                lambda = (lambda * opts.lambda_down).max(f64::MIN_POSITIVE);
                accepted = true;

                if step_norm <= opts.x_reltol * (p_norm + opts.x_reltol) || rel_decrease <= opts.f_reltol {
                    converged = true;
                }
                break;
            }
            lambda *= opts.lambda_up;
        }

        if !solved_any {
            return None;
        }
        if !accepted {
            // No damped step decreases the residual: stationary up to round-off.
            converged = true;
        }
    }

    Some(LmResult {
        minimizer: p,
        minimum: f,
        iterations,
        converged,
        budget,
    })
}
