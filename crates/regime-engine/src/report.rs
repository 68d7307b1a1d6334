//! Backtest report generation.

use regime_core::types::BacktestResult;
use serde::{Deserialize, Serialize};

/// The two headline figures, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDisplay {
    /// Buy-and-hold total return, e.g. "412.87%"
    pub buy_and_hold: String,
    /// Strategy total return, e.g. "287.10%"
    pub strategy: String,
}

/// Presentation wrapper around one engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// The engine output
    pub result: BacktestResult,
}

impl BacktestReport {
    /// Wrap an engine result.
    pub fn new(result: BacktestResult) -> Self {
        Self { result }
    }

    /// Headline figures formatted to two decimal places.
    pub fn display(&self) -> ResultDisplay {
        ResultDisplay {
            buy_and_hold: format!("{:.2}%", self.result.buy_and_hold_return_pct),
            strategy: format!("{:.2}%", self.result.strategy_return_pct),
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let display = self.display();
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                  REGIME BACKTEST REPORT                    \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Symbol:              {}\n", self.result.symbol));
        s.push_str(&format!("  Regime Window:       {} days\n", self.result.window));
        s.push_str(&format!(
            "  Band Buffer:         {:.1}%\n",
            self.result.buffer * 100.0
        ));
        s.push('\n');

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Buy & Hold Return:   {}\n", display.buy_and_hold));
        s.push_str(&format!("  Strategy Return:     {}\n", display.strategy));
        s.push('\n');

        if let (Some(first), Some(last)) = (self.result.series.first(), self.result.series.last()) {
            s.push_str("COVERAGE\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            s.push_str(&format!(
                "  Period:              {} to {}\n",
                first.date(),
                last.date()
            ));
            s.push_str(&format!(
                "  Trading Days:        {}\n",
                self.result.series.len()
            ));
            let long_days = self
                .result
                .series
                .iter()
                .filter(|r| r.applied_signal.is_long())
                .count();
            s.push_str(&format!("  Days Invested:       {}\n", long_days));
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the cumulative curves to CSV.
    pub fn curves_to_csv(&self) -> String {
        let mut csv = String::from("date,buy_hold_cumulative,strategy_cumulative\n");
        for row in self.result.series.iter() {
            csv.push_str(&format!(
                "{},{},{}\n",
                row.date(),
                row.buy_hold_cumulative,
                row.strategy_cumulative
            ));
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regime_core::types::{DerivedRow, DerivedSeries, Position};

    fn sample_result() -> BacktestResult {
        let rows = vec![
            DerivedRow {
                timestamp: 1_705_276_800_000,
                price: 100.0,
                regime_mean: 99.0,
                upper_band: 100.98,
                lower_band: 97.02,
                signal: Position::Long,
                applied_signal: Position::Flat,
                daily_return: 0.01,
                strategy_return: 0.0,
                buy_hold_cumulative: 1.01,
                strategy_cumulative: 1.0,
            },
            DerivedRow {
                timestamp: 1_705_363_200_000,
                price: 102.0,
                regime_mean: 99.2,
                upper_band: 101.184,
                lower_band: 97.216,
                signal: Position::Long,
                applied_signal: Position::Long,
                daily_return: 0.02,
                strategy_return: 0.02,
                buy_hold_cumulative: 1.0302,
                strategy_cumulative: 1.02,
            },
        ];

        BacktestResult {
            symbol: "NVDA".to_string(),
            window: 200,
            buffer: 0.02,
            buy_and_hold_return_pct: 3.02,
            strategy_return_pct: 2.0,
            series: DerivedSeries::new(rows),
        }
    }

    #[test]
    fn test_display_formatting() {
        let report = BacktestReport::new(sample_result());
        let display = report.display();

        assert_eq!(display.buy_and_hold, "3.02%");
        assert_eq!(display.strategy, "2.00%");
    }

    #[test]
    fn test_summary_contents() {
        let report = BacktestReport::new(sample_result());
        let summary = report.summary();

        assert!(summary.contains("NVDA"));
        assert!(summary.contains("200 days"));
        assert!(summary.contains("3.02%"));
        assert!(summary.contains("2.00%"));
        assert!(summary.contains("Days Invested:       1"));
    }

    #[test]
    fn test_curves_csv() {
        let report = BacktestReport::new(sample_result());
        let csv = report.curves_to_csv();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,buy_hold_cumulative,strategy_cumulative"
        );
        assert!(lines.next().unwrap().starts_with("2024-01-15,1.01,"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = BacktestReport::new(sample_result());
        let json = report.to_json().unwrap();
        let parsed: BacktestReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.result.symbol, "NVDA");
        assert_eq!(parsed.result.series.len(), 2);
    }
}
