//! Rolling window mean.

use regime_core::traits::Indicator;

/// Rolling arithmetic mean over the last N values.
///
/// Output is aligned to the input: index `i` holds the mean of
/// `data[i-N+1 ..= i]`, and the first `N-1` positions are NaN.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
}

impl RollingMean {
    /// Create a new rolling mean with the specified window.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "Window must be greater than 0");
        Self { window }
    }
}

impl Indicator for RollingMean {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut out = vec![f64::NAN; data.len()];
        if data.len() < self.window {
            return out;
        }

        let window_f64 = self.window as f64;

        // Initial sum
        let mut sum: f64 = data[..self.window].iter().sum();
        out[self.window - 1] = sum / window_f64;

        // Sliding window
        for i in self.window..data.len() {
            sum = sum - data[i - self.window] + data[i];
            out[i] = sum / window_f64;
        }

        out
    }

    fn period(&self) -> usize {
        self.window
    }

    fn name(&self) -> &str {
        "rolling_mean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean() {
        let mean = RollingMean::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = mean.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_rolling_mean_insufficient_data() {
        let mean = RollingMean::new(5);
        let result = mean.calculate(&[1.0, 2.0, 3.0]);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_mean_constant_series() {
        let mean = RollingMean::new(4);
        let data = vec![100.0; 10];
        let result = mean.calculate(&data);

        for v in &result[3..] {
            assert!((v - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_window_one_is_identity() {
        let mean = RollingMean::new(1);
        let data = vec![3.0, 1.0, 4.0];
        assert_eq!(mean.calculate(&data), data);
    }
}
