//! Ratatui-based interactive chart view.
//!
//! The view is read-only: the pipeline has already run by the time it opens.
//! It renders the accepted readings plus the fitted cubic and blocks until the
//! user dismisses it (`q` or `Esc`).

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::RunOutput;
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::plot::sample_curve;

mod plotters_chart;

use plotters_chart::CurveChart;

/// Show the chart; returns when the user closes the view.
pub fn run(output: &RunOutput, config: &FitConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::internal(format!("Failed to initialize terminal: {e}")))?;

    let view = View::new(output, config);
    view.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::internal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::internal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct View {
    source: String,
    n_points: usize,
    rmse: f64,
    curve: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl View {
    fn new(output: &RunOutput, config: &FitConfig) -> Self {
        let stats = &output.ingest.stats;

        let points: Vec<(f64, f64)> = output.ingest.points.iter().map(|p| (p.x, p.y)).collect();

        // Curve density follows the data: twice the accepted point count.
        let curve = sample_curve(
            &output.fit,
            stats.x_min,
            stats.x_max,
            stats.n_points.saturating_mul(2),
        );

        let (x_bounds, y_bounds) = chart_bounds(&points, &curve);

        Self {
            source: config.csv_path.display().to_string(),
            n_points: stats.n_points,
            rmse: output.fit.quality.rmse,
            curve,
            points,
            x_bounds,
            y_bounds,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::internal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::internal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::internal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("calfit", Style::default().fg(Color::Cyan)),
            Span::raw(" — cubic calibration fit"),
            Span::styled(
                format!("  |  {}  |  n={}  rmse={:.4}", self.source, self.n_points, self.rmse),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(Text::from(line)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Calibration curve").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let widget = CurveChart {
            curve: &self.curve,
            points: &self.points,
            x_bounds: self.x_bounds,
            y_bounds: self.y_bounds,
            x_label: "x reading",
            y_label: "y reading",
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "q / Esc close";
        let p = Paragraph::new(Span::styled(help, Style::default().fg(Color::Gray)))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Bounds covering both series, with a small vertical pad.
fn chart_bounds(points: &[(f64, f64)], curve: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);

    for &(x, y) in points.iter().chain(curve.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
        x_min = 0.0;
        x_max = 1.0;
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    ([x_min, x_max], [y_min - pad, y_max + pad])
}

/// Formats an axis tick value for display.
fn fmt_axis(v: f64) -> String {
    format!("{v:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_bounds_cover_both_series_with_pad() {
        let points = vec![(1.0, 10.0), (5.0, 20.0)];
        let curve = vec![(1.0, 8.0), (5.0, 22.0)];

        let (x_bounds, y_bounds) = chart_bounds(&points, &curve);
        assert_eq!(x_bounds, [1.0, 5.0]);
        assert!(y_bounds[0] < 8.0);
        assert!(y_bounds[1] > 22.0);
    }

    #[test]
    fn chart_bounds_degenerate_input_falls_back() {
        let (x_bounds, y_bounds) = chart_bounds(&[], &[]);
        assert_eq!(x_bounds, [0.0, 1.0]);
        assert!(y_bounds[0] < y_bounds[1]);
    }
}
