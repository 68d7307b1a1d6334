//! Indicator trait definition.

use crate::error::EngineError;

/// Trait for batch technical indicators.
///
/// Indicators process a price slice and produce a derived series aligned 1:1
/// with the input: positions inside the warm-up prefix hold `f64::NAN`.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically adjusted closes)
    ///
    /// # Returns
    /// A vector the same length as `data`, NaN-padded over the warm-up prefix
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Get the minimum data points required for one defined value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), EngineError> {
        if data.len() < self.period() {
            return Err(EngineError::InsufficientHistory {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct WindowSum {
        period: usize,
    }

    impl Indicator for WindowSum {
        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            let mut out = vec![f64::NAN; data.len()];
            for (i, window) in data.windows(self.period).enumerate() {
                out[i + self.period - 1] = window.iter().sum();
            }
            out
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "window_sum"
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = WindowSum { period: 5 };

        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_indicator_alignment() {
        let indicator = WindowSum { period: 3 };
        let result = indicator.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 6.0).abs() < 1e-10);
        assert!((result[4] - 12.0).abs() < 1e-10);
    }
}
