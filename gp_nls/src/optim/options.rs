#[derive(Clone, Copy, Debug)]
pub(crate) struct LmOptions {
    pub iterations: usize,
    pub lambda0: f64,
    pub lambda_up: f64,
    pub lambda_down: f64,
    pub lambda_max: f64,
    pub g_abstol: f64,
    pub x_reltol: f64,
    pub f_reltol: f64,
}

impl Default for LmOptions {
    fn default() -> Self {
        Self {
            iterations: 10,
            lambda0: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            lambda_max: 1e12,
            g_abstol: 1e-12,
            x_reltol: 1e-10,
            f_reltol: 1e-12,
        }
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct EvalBudget {
    pub f_calls: usize,
    pub j_calls: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct LmResult {
    pub minimizer: Vec<f64>,
    /// Sum of squared residuals at `minimizer`.
    pub minimum: f64,
    pub iterations: usize,
    pub converged: bool,
    pub budget: EvalBudget,
}

/// `min_p ||r(p)||^2` over a fixed number of residuals.
///
/// Both callbacks return `None` when the model cannot be evaluated at `params`.
/// The Jacobian is written row-major, `n_residuals x params.len()`.
pub(crate) trait LeastSquaresProblem {
    fn n_residuals(&self) -> usize;
    fn residuals(&mut self, params: &[f64], out: &mut [f64], budget: &mut EvalBudget) -> Option<()>;
    fn jacobian(&mut self, params: &[f64], out: &mut [f64], budget: &mut EvalBudget) -> Option<()>;
}
