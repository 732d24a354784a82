//! 1D Distribution.

use crate::pbrt::*;

/// A piecewise-constant 1D function's PDF and CDF, sampled discretely by
/// binary search over the CDF.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`; `func.len() + 1` entries starting at 0 and ending at 1.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for given piecewise-constant function.
    /// If the function integrates to zero every entry is equally likely.
    ///
    /// - `f` - Piecewise-constant 1D function; must not be empty.
    pub fn new(f: Vec<Float>) -> Self {
        assert!(!f.is_empty(), "Distribution1D needs at least one value");
        assert!(f.iter().all(|&v| v >= 0.0 && v.is_finite()));
        let n = f.len() as Float;

        let mut cdf = Vec::with_capacity(f.len() + 1);
        cdf.push(0.0);
        let mut running = 0.0;
        for v in f.iter() {
            running += v / n;
            cdf.push(running);
        }

        let func_int = running;
        if func_int == 0.0 {
            for (i, c) in cdf.iter_mut().enumerate() {
                *c = i as Float / n;
            }
        } else {
            for c in cdf.iter_mut().skip(1) {
                *c /= func_int;
            }
        }
        // Guard against round-off so the last interval always ends at 1.
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Self { func: f, cdf, func_int }
    }

    /// Returns the number of sample points for the piecewise-constant function.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Return a sample index and its discrete probability from the
    /// distribution given a random sample.
    ///
    /// - `u` - The random sample in [0, 1).
    pub fn sample_discrete(&self, u: Float) -> (usize, Float) {
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        (offset, self.discrete_pdf(offset))
    }

    /// Return the probability of sampling a given index.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        assert!(index < self.count());
        if self.func_int > 0.0 {
            self.func[index] / (self.func_int * self.count() as Float)
        } else {
            1.0 / self.count() as Float
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn probabilities_proportional_to_weights() {
        let d = Distribution1D::new(vec![1.0, 3.0, 0.0, 4.0]);
        assert!(approx_eq!(f32, d.discrete_pdf(0), 0.125));
        assert!(approx_eq!(f32, d.discrete_pdf(1), 0.375));
        assert_eq!(d.discrete_pdf(2), 0.0);
        assert!(approx_eq!(f32, d.discrete_pdf(3), 0.5));
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let d = Distribution1D::new(vec![0.0, 0.0]);
        assert_eq!(d.discrete_pdf(0), 0.5);
        assert_eq!(d.sample_discrete(0.25).0, 0);
        assert_eq!(d.sample_discrete(0.75).0, 1);
    }

    #[test]
    fn zero_weight_entries_never_chosen() {
        let d = Distribution1D::new(vec![1.0, 0.0, 1.0]);
        for i in 0..100 {
            let (idx, pdf) = d.sample_discrete(i as Float / 100.0);
            assert_ne!(idx, 1);
            assert!(approx_eq!(f32, pdf, 0.5));
        }
    }

    proptest! {
        #[test]
        fn probabilities_sum_to_one(f in prop::collection::vec(0.0..10.0f32, 1..16)) {
            let d = Distribution1D::new(f);
            let sum: Float = (0..d.count()).map(|i| d.discrete_pdf(i)).sum();
            prop_assert!(approx_eq!(f32, sum, 1.0, epsilon = 1e-4));
        }

        #[test]
        fn sampling_is_deterministic(
            f in prop::collection::vec(0.0..10.0f32, 1..16),
            u in 0.0..1.0f32,
        ) {
            let d = Distribution1D::new(f);
            let (i1, p1) = d.sample_discrete(u);
            let (i2, p2) = d.sample_discrete(u);
            prop_assert_eq!(i1, i2);
            prop_assert_eq!(p1, p2);
            prop_assert!(i1 < d.count());
            prop_assert!(d.cdf[i1] <= u && u <= d.cdf[i1 + 1]);
        }
    }
}
