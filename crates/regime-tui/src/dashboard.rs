//! TUI dashboard using ratatui.
//!
//! One input box for the ticker; Enter runs a backtest through the injected
//! callback and the result renders as two metric tiles and a two-line
//! cumulative-return chart.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use regime_core::types::DerivedSeries;
use regime_core::RegimeError;
use regime_engine::BacktestReport;
use std::io;
use std::time::Duration;

/// Outcome of the most recent run request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running,
    Complete,
    Failed,
}

/// Dashboard state.
pub struct DashboardState {
    /// Ticker input buffer
    pub input: String,
    /// Current run status
    pub status: RunStatus,
    /// User-facing status message
    pub message: String,
    /// Last successful report
    pub report: Option<BacktestReport>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            input: String::new(),
            status: RunStatus::Idle,
            message: "Enter a stock ticker and press Enter to run the backtest.".to_string(),
            report: None,
        }
    }
}

impl DashboardState {
    /// Append a character to the ticker input. Tickers are upper-cased;
    /// anything outside the symbol alphabet is ignored.
    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            if self.input.len() < 12 {
                self.input.push(c.to_ascii_uppercase());
            }
        }
    }

    /// Remove the last input character.
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Transition into the running state, or complain about empty input.
    /// Returns the symbol to run when a run should start.
    pub fn begin_run(&mut self) -> Option<String> {
        if self.input.is_empty() {
            self.message = "Please enter a stock ticker.".to_string();
            return None;
        }
        let symbol = self.input.clone();
        self.status = RunStatus::Running;
        self.message = format!("Running backtest for {}...", symbol);
        Some(symbol)
    }

    /// Record a finished run.
    pub fn finish_run(&mut self, symbol: &str, outcome: Result<BacktestReport, RegimeError>) {
        match outcome {
            Ok(report) => {
                self.status = RunStatus::Complete;
                self.message = format!("Backtest for {} complete!", symbol);
                self.report = Some(report);
            }
            Err(e) if e.is_no_data() => {
                self.status = RunStatus::Failed;
                self.message =
                    format!("Could not retrieve data or run backtest for {}.", symbol);
            }
            Err(e) => {
                self.status = RunStatus::Failed;
                self.message = format!("An error occurred during download: {}", e);
            }
        }
    }
}

/// Extract a plottable (timestamp, value) curve.
fn curve_points<F>(series: &DerivedSeries, value: F) -> Vec<(f64, f64)>
where
    F: Fn(&regime_core::types::DerivedRow) -> f64,
{
    series
        .iter()
        .map(|row| (row.timestamp as f64, value(row)))
        .collect()
}

/// TUI dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until the user quits with Esc.
    ///
    /// `run_backtest` is called synchronously on Enter; the UI blocks for the
    /// duration of the fetch and computation (one request, one pass).
    pub fn run<F>(&self, mut run_backtest: F) -> io::Result<()>
    where
        F: FnMut(&str) -> Result<BacktestReport, RegimeError>,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut run_backtest);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<F>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        run_backtest: &mut F,
    ) -> io::Result<()>
    where
        F: FnMut(&str) -> Result<BacktestReport, RegimeError>,
    {
        let mut state = DashboardState::default();

        loop {
            terminal.draw(|f| self.ui(f, &state))?;

            if !event::poll(Duration::from_millis(self.refresh_ms))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::Backspace => state.backspace(),
                    KeyCode::Char(c) => state.push_char(c),
                    KeyCode::Enter => {
                        if let Some(symbol) = state.begin_run() {
                            // Show the running state before blocking.
                            terminal.draw(|f| self.ui(f, &state))?;
                            let outcome = run_backtest(&symbol);
                            state.finish_run(&symbol, outcome);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Ticker input
                Constraint::Length(3), // Status
                Constraint::Length(4), // Metrics
                Constraint::Min(10),   // Chart
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_input(frame, chunks[1], state);
        self.render_status(frame, chunks[2], state);
        self.render_metrics(frame, chunks[3], state);
        self.render_chart(frame, chunks[4], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "Quantitative Strategy Backtesting Dashboard",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | Press Esc to quit"),
        ])])
        .block(Block::default().borders(Borders::ALL).title("System"));
        frame.render_widget(header, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let input = Paragraph::new(Line::from(vec![
            Span::styled(
                state.input.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("▌", Style::default().fg(Color::DarkGray)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Stock Ticker (e.g. AAPL, MSFT, SPY)"),
        );
        frame.render_widget(input, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let color = match state.status {
            RunStatus::Idle => Color::Gray,
            RunStatus::Running => Color::Yellow,
            RunStatus::Complete => Color::Green,
            RunStatus::Failed => Color::Red,
        };
        let status = Paragraph::new(Line::from(Span::styled(
            state.message.as_str(),
            Style::default().fg(color),
        )))
        .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, area);
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let (buy_hold, strategy) = match &state.report {
            Some(report) => {
                let display = report.display();
                (display.buy_and_hold, display.strategy)
            }
            None => ("--".to_string(), "--".to_string()),
        };

        let buy_hold_tile = Paragraph::new(Line::from(Span::styled(
            buy_hold,
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Buy & Hold Return"),
        );
        frame.render_widget(buy_hold_tile, tiles[0]);

        let strategy_tile = Paragraph::new(Line::from(Span::styled(
            strategy,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Strategy Return"),
        );
        frame.render_widget(strategy_tile, tiles[1]);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let Some(report) = &state.report else {
            let placeholder = Paragraph::new("Run a backtest to see cumulative returns.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Chart"));
            frame.render_widget(placeholder, area);
            return;
        };

        let series = &report.result.series;
        let buy_hold = curve_points(series, |r| r.buy_hold_cumulative);
        let strategy = curve_points(series, |r| r.strategy_cumulative);

        let (x_min, x_max) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.timestamp as f64, last.timestamp as f64),
            _ => (0.0, 1.0),
        };
        let y_min = buy_hold
            .iter()
            .chain(strategy.iter())
            .map(|(_, y)| *y)
            .fold(f64::INFINITY, f64::min);
        let y_max = buy_hold
            .iter()
            .chain(strategy.iter())
            .map(|(_, y)| *y)
            .fold(f64::NEG_INFINITY, f64::max);
        let y_pad = ((y_max - y_min) * 0.05).max(0.01);

        let datasets = vec![
            Dataset::default()
                .name("Buy & Hold")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Gray))
                .data(&buy_hold),
            Dataset::default()
                .name("Adaptive Strategy")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&strategy),
        ];

        let x_labels = match (series.first(), series.last()) {
            (Some(first), Some(last)) => {
                let mid = series.rows()[series.len() / 2];
                vec![
                    first.date().to_string(),
                    mid.date().to_string(),
                    last.date().to_string(),
                ]
            }
            _ => vec![],
        };

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Adaptive Momentum Strategy vs. Buy & Hold for {}",
                report.result.symbol
            )))
            .x_axis(
                Axis::default()
                    .title("Date")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([x_min, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("Cumulative Return")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([y_min - y_pad, y_max + y_pad])
                    .labels(vec![
                        format!("{:.2}", y_min),
                        format!("{:.2}", (y_min + y_max) / 2.0),
                        format!("{:.2}", y_max),
                    ]),
            );

        frame.render_widget(chart, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regime_core::error::{DataError, EngineError};
    use regime_core::types::{BacktestResult, DerivedRow, Position};

    fn sample_report() -> BacktestReport {
        let rows = vec![
            DerivedRow {
                timestamp: 0,
                price: 100.0,
                regime_mean: 99.0,
                upper_band: 100.98,
                lower_band: 97.02,
                signal: Position::Flat,
                applied_signal: Position::Flat,
                daily_return: 0.0,
                strategy_return: 0.0,
                buy_hold_cumulative: 1.0,
                strategy_cumulative: 1.0,
            },
            DerivedRow {
                timestamp: 86_400_000,
                price: 103.0,
                regime_mean: 99.5,
                upper_band: 101.49,
                lower_band: 97.51,
                signal: Position::Long,
                applied_signal: Position::Flat,
                daily_return: 0.03,
                strategy_return: 0.0,
                buy_hold_cumulative: 1.03,
                strategy_cumulative: 1.0,
            },
        ];
        BacktestReport::new(BacktestResult {
            symbol: "SPY".to_string(),
            window: 200,
            buffer: 0.02,
            buy_and_hold_return_pct: 3.0,
            strategy_return_pct: 0.0,
            series: DerivedSeries::new(rows),
        })
    }

    #[test]
    fn test_input_editing() {
        let mut state = DashboardState::default();
        for c in "nvda".chars() {
            state.push_char(c);
        }
        assert_eq!(state.input, "NVDA");

        state.push_char('!');
        state.push_char(' ');
        assert_eq!(state.input, "NVDA");

        state.backspace();
        assert_eq!(state.input, "NVD");
    }

    #[test]
    fn test_input_length_capped() {
        let mut state = DashboardState::default();
        for _ in 0..20 {
            state.push_char('A');
        }
        assert_eq!(state.input.len(), 12);
    }

    #[test]
    fn test_begin_run_requires_input() {
        let mut state = DashboardState::default();
        assert!(state.begin_run().is_none());
        assert_eq!(state.message, "Please enter a stock ticker.");

        state.push_char('S');
        let symbol = state.begin_run();
        assert_eq!(symbol.as_deref(), Some("S"));
        assert_eq!(state.status, RunStatus::Running);
    }

    #[test]
    fn test_finish_run_success() {
        let mut state = DashboardState::default();
        state.finish_run("SPY", Ok(sample_report()));

        assert_eq!(state.status, RunStatus::Complete);
        assert_eq!(state.message, "Backtest for SPY complete!");
        assert!(state.report.is_some());
    }

    #[test]
    fn test_finish_run_no_data_message() {
        let mut state = DashboardState::default();
        state.finish_run("SPY", Err(RegimeError::from(DataError::Empty)));
        assert_eq!(
            state.message,
            "Could not retrieve data or run backtest for SPY."
        );

        state.finish_run(
            "SPY",
            Err(RegimeError::from(EngineError::InsufficientHistory {
                required: 202,
                available: 10,
            })),
        );
        assert_eq!(
            state.message,
            "Could not retrieve data or run backtest for SPY."
        );
    }

    #[test]
    fn test_finish_run_retrieval_failure_is_distinct() {
        let mut state = DashboardState::default();
        state.finish_run(
            "SPY",
            Err(RegimeError::from(DataError::Connection("timeout".into()))),
        );

        assert_eq!(state.status, RunStatus::Failed);
        assert!(state.message.starts_with("An error occurred during download:"));
        assert!(state.report.is_none());
    }

    #[test]
    fn test_curve_points() {
        let report = sample_report();
        let points = curve_points(&report.result.series, |r| r.buy_hold_cumulative);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0], (0.0, 1.0));
        assert_eq!(points[1], (86_400_000.0, 1.03));
    }
}
