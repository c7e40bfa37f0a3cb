//! Natural cubic spline interpolation.

/// A natural cubic spline through strictly increasing knots.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivatives at the knots; zero at both ends.
    m: Vec<f64>,
}

impl CubicSpline {
    /// Build the spline through `(x[i], y[i])`. `x` must be strictly
    /// increasing and both slices the same non-zero length.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        let x = x[..n].to_vec();
        let y = y[..n].to_vec();
        let mut m = vec![0.0; n];

        if n > 2 {
            // Tridiagonal system for the interior second derivatives
            let interior = n - 2;
            let mut a = vec![0.0; interior];
            let mut b = vec![0.0; interior];
            let mut c = vec![0.0; interior];
            let mut d = vec![0.0; interior];
            for i in 0..interior {
                let h0 = x[i + 1] - x[i];
                let h1 = x[i + 2] - x[i + 1];
                a[i] = h0;
                b[i] = 2.0 * (h0 + h1);
                c[i] = h1;
                d[i] = 6.0 * ((y[i + 2] - y[i + 1]) / h1 - (y[i + 1] - y[i]) / h0);
            }
            let solution = thomas_algorithm(&a, &b, &c, &d);
            m[1..n - 1].copy_from_slice(&solution);
        }

        Self { x, y, m }
    }

    /// Evaluate the spline at `t`, clamped to the end values outside the knots.
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.x.len();
        match n {
            0 => return f64::NAN,
            1 => return self.y[0],
            _ => {}
        }
        if t <= self.x[0] {
            return self.y[0];
        }
        if t >= self.x[n - 1] {
            return self.y[n - 1];
        }

        let upper = self.x.partition_point(|&knot| knot <= t).min(n - 1);
        let i = upper - 1;
        let h = self.x[upper] - self.x[i];
        let a = (self.x[upper] - t) / h;
        let b = (t - self.x[i]) / h;

        a * self.y[i]
            + b * self.y[upper]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[upper]) * h * h / 6.0
    }
}

/// Thomas algorithm for a tridiagonal system with sub-diagonal `a`, diagonal
/// `b`, super-diagonal `c` and right-hand side `d`.
fn thomas_algorithm(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut cp = vec![0.0; n];
    let mut dp = vec![0.0; n];
    let mut x = vec![0.0; n];
    if n == 0 {
        return x;
    }

    // Forward sweep
    cp[0] = c[0] / b[0];
    dp[0] = d[0] / b[0];
    for i in 1..n {
        let denom = b[i] - a[i] * cp[i - 1];
        cp[i] = c[i] / denom;
        dp[i] = (d[i] - a[i] * dp[i - 1]) / denom;
    }

    // Back substitution
    x[n - 1] = dp[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = dp[i] - cp[i] * x[i + 1];
    }

    x
}
