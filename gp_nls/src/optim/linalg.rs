pub(crate) fn inf_norm(v: &[f64]) -> f64 {
    v.iter().copied().map(f64::abs).fold(0.0, |a, b| a.max(b))
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .copied()
        .zip(b.iter().copied())
        .map(|(x, y)| x * y)
        .sum()
}

pub(crate) fn axpy_into(out: &mut [f64], x: &[f64], alpha: f64, s: &[f64]) {
    for ((o, &xi), &si) in out.iter_mut().zip(x.iter()).zip(s.iter()) {
        *o = xi + alpha * si;
    }
}

/// Normal equations of a row-major `m x n` Jacobian: `jtj = J^T J`, `jtr = J^T r`.
pub(crate) fn normal_equations(jtj: &mut [f64], jtr: &mut [f64], jac: &[f64], r: &[f64], n: usize) {
    debug_assert_eq!(jtj.len(), n * n);
    debug_assert_eq!(jtr.len(), n);
    debug_assert_eq!(jac.len(), r.len() * n);

    jtj.fill(0.0);
    jtr.fill(0.0);
    for (row, &ri) in jac.chunks_exact(n).zip(r.iter()) {
        for i in 0..n {
            jtr[i] += row[i] * ri;
            for j in 0..=i {
                jtj[i * n + j] += row[i] * row[j];
            }
        }
    }
    for i in 0..n {
        for j in 0..i {
            jtj[j * n + i] = jtj[i * n + j];
        }
    }
}

/// Solves `a x = b` in place for symmetric positive definite `a` (overwritten by its
/// Cholesky factor). `None` if a pivot is not positive and finite.
pub(crate) fn cholesky_solve(a: &mut [f64], b: &mut [f64]) -> Option<()> {
    let n = b.len();
    debug_assert_eq!(a.len(), n * n);

    for j in 0..n {
        let mut d = a[j * n + j];
        for k in 0..j {
            d -= a[j * n + k] * a[j * n + k];
        }
        if !(d > 0.0 && d.is_finite()) {
            return None;
        }
        let d = d.sqrt();
        a[j * n + j] = d;
        for i in (j + 1)..n {
            let mut s = a[i * n + j];
            for k in 0..j {
                s -= a[i * n + k] * a[j * n + k];
            }
            a[i * n + j] = s / d;
        }
    }

    // L y = b, then L^T x = y.
    for i in 0..n {
        let mut s = b[i];
        for k in 0..i {
            s -= a[i * n + k] * b[k];
        }
        b[i] = s / a[i * n + i];
    }
    for i in (0..n).rev() {
        let mut s = b[i];
        for k in (i + 1)..n {
            s -= a[k * n + i] * b[k];
        }
        b[i] = s / a[i * n + i];
    }
    b.iter().all(|v| v.is_finite()).then_some(())
}
