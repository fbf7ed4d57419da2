use gpslice::{
    error::Error,
    model::GaussianProcess,
    nalgebra::{Cholesky, DMatrix, DVector, Dyn},
    statistics::Estimate,
};

/// A small exact Gaussian process with a squared-exponential kernel
struct RbfProcess {
    inputs: Vec<DVector<f64>>,
    outputs: Vec<f64>,
    length_scale: f64,
    cholesky: Cholesky<f64, Dyn>,
    alpha: DVector<f64>,
}

impl RbfProcess {
    fn fit(inputs: Vec<DVector<f64>>, outputs: Vec<f64>, length_scale: f64, noise: f64) -> Option<Self> {
        let n = inputs.len();
        let mut k = DMatrix::from_fn(n, n, |i, j| rbf(&inputs[i], &inputs[j], length_scale));
        for i in 0..n {
            k[(i, i)] += noise;
        }

        let cholesky = k.cholesky()?;
        let alpha = cholesky.solve(&DVector::from_column_slice(&outputs));
        Some(Self {
            inputs,
            outputs,
            length_scale,
            cholesky,
            alpha,
        })
    }
}

impl GaussianProcess for RbfProcess {
    type Error = std::convert::Infallible;

    fn dims(&self) -> usize {
        self.inputs.first().map_or(0, DVector::len)
    }

    fn raw_data(&self) -> (&[DVector<f64>], &[f64]) {
        (&self.inputs, &self.outputs)
    }

    fn estimate(&self, x: &DVector<f64>) -> Result<Estimate<f64>, Self::Error> {
        let k = DVector::from_iterator(
            self.inputs.len(),
            self.inputs.iter().map(|p| rbf(p, x, self.length_scale)),
        );
        let mean = k.dot(&self.alpha);

        let v = self.cholesky.l_dirty().solve_lower_triangular(&k).unwrap_or(k);
        let variance = rbf(x, x, self.length_scale) - v.dot(&v);
        Ok(Estimate::new(mean, variance))
    }
}

fn rbf(a: &DVector<f64>, b: &DVector<f64>, length_scale: f64) -> f64 {
    (-(a - b).norm_squared() / (2.0 * length_scale * length_scale)).exp()
}

fn main() -> Result<(), Error> {
    //
    // Sample a 3-dimensional function on a coarse lattice
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for i in 0..4 {
        for j in 0..3 {
            let x = DVector::from_vec(vec![f64::from(i), f64::from(j) * 0.5, f64::from(i + j) * 0.25]);
            outputs.push(x[0].sin() + x[1] * x[1] - 0.5 * x[2]);
            inputs.push(x);
        }
    }

    //
    // Fit the process. The kernel matrix is positive definite for distinct inputs
    let Some(model) = RbfProcess::fit(inputs, outputs, 0.8, 1e-6) else {
        eprintln!("Kernel matrix is not positive definite");
        return Ok(());
    };

    //
    // One SVG per input dimension, in a fresh temporary directory
    let dir = gpslice::save_all(&model)?;
    println!("Wrote {} charts to {}", model.dims(), dir.display());
    for dim in 0..model.dims() {
        println!("  {}", dir.join(format!("{dim}.svg")).display());
    }

    Ok(())
}
