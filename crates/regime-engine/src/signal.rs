//! Stateful hysteresis band signal.

use regime_core::types::Position;

/// Threshold signal with hysteresis around a moving mean.
///
/// The signal flips Long on a decisive close above the upper band and Flat on
/// a close below the lower band; anywhere inside the band it holds its prior
/// state. Consumed as a left-to-right scan over the series.
#[derive(Debug, Clone)]
pub struct HysteresisSignal {
    buffer: f64,
    state: Position,
}

impl HysteresisSignal {
    /// Create a new signal with the given band buffer fraction.
    pub fn new(buffer: f64) -> Self {
        Self {
            buffer,
            state: Position::Flat,
        }
    }

    /// Update with the day's close and regime mean, returning the decided
    /// position.
    pub fn update(&mut self, price: f64, regime_mean: f64) -> Position {
        let upper = regime_mean * (1.0 + self.buffer);
        let lower = regime_mean * (1.0 - self.buffer);

        if price > upper {
            self.state = Position::Long;
        } else if price < lower {
            self.state = Position::Flat;
        }
        // Inside the band: hold the previous state.

        self.state
    }

    /// Get the current state without updating.
    pub fn current(&self) -> Position {
        self.state
    }

    /// Reset to the initial flat state.
    pub fn reset(&mut self) {
        self.state = Position::Flat;
    }
}
