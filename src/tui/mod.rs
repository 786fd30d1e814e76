//! Ratatui-based terminal UI.
//!
//! Five sliders drive the calculator; every change recomputes the result panel
//! and the payment-vs-price chart.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};
use tracing::{info, warn};

use crate::calc::{calculate_breakdown, sweep_home_price};
use crate::config::{HOME_PRICE_SLIDER, SLIDERS, Settings};
use crate::domain::{LoanInputs, LoanTerms, PaymentBreakdown, SweepPoint};
use crate::error::{AppError, CalcError, EXIT_TERMINAL};
use crate::io::{ExportFile, export_path, write_export_json};
use crate::report::{fmt_currency, fmt_percent};

mod plotters_chart;

use plotters_chart::PaymentChart;

/// Number of home prices evaluated for the chart.
const CHART_POINTS: usize = 81;

const FIELD_PRICE: usize = 0;
const FIELD_SCORE: usize = 1;
const FIELD_DOWN: usize = 2;
const FIELD_DTI: usize = 3;
const FIELD_RATE: usize = 4;

/// Start the TUI with the given starting inputs (clamped into slider ranges).
pub fn run(start: LoanInputs, settings: Settings) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(start, settings);
    info!(inputs = ?app.inputs(), "tui started");
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_TERMINAL,
                format!("Failed to enter alternate screen: {e}"),
            ));
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

struct App {
    settings: Settings,
    /// Slider values, indexed like `SLIDERS`.
    values: [f64; 5],
    selected_field: usize,
    status: String,
    outcome: Result<PaymentBreakdown, CalcError>,
    sweep: Vec<SweepPoint>,
}

impl App {
    fn new(start: LoanInputs, settings: Settings) -> Self {
        let mut app = Self {
            settings,
            values: slider_values(&start),
            selected_field: 0,
            status: "Ready.".to_string(),
            outcome: Err(CalcError::invalid("inputs", "not calculated yet")),
            sweep: Vec::new(),
        };
        app.recompute();
        app
    }

    fn inputs(&self) -> LoanInputs {
        LoanInputs {
            home_price: self.values[FIELD_PRICE],
            credit_score: self.values[FIELD_SCORE].round() as i32,
            down_payment_pct: self.values[FIELD_DOWN],
            dti_ratio_pct: self.values[FIELD_DTI],
            nominal_annual_rate_pct: self.values[FIELD_RATE],
        }
    }

    fn recompute(&mut self) {
        let inputs = self.inputs();
        self.outcome = calculate_breakdown(&inputs, &LoanTerms::THIRTY_YEAR_FIXED);
        if let Err(err) = &self.outcome {
            warn!(%err, "calculation failed");
        }
        self.sweep = sweep_home_price(&inputs, HOME_PRICE_SLIDER.min, HOME_PRICE_SLIDER.max, CHART_POINTS)
            .unwrap_or_default();
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    /// Apply a key press; returns `true` when the UI should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < SLIDERS.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.step_selected(-1),
            KeyCode::Right => self.step_selected(1),
            KeyCode::PageDown => self.step_selected(-10),
            KeyCode::PageUp => self.step_selected(10),
            KeyCode::Home => self.set_selected(SLIDERS[self.selected_field].min),
            KeyCode::End => self.set_selected(SLIDERS[self.selected_field].max),
            KeyCode::Char('r') => {
                self.values = slider_values(&self.settings.defaults);
                self.recompute();
                self.status = "Reset to defaults.".to_string();
            }
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    fn step_selected(&mut self, steps: i32) {
        let spec = SLIDERS[self.selected_field];
        let next = spec.step_by(self.values[self.selected_field], steps);
        self.set_selected(next);
    }

    fn set_selected(&mut self, value: f64) {
        let spec = SLIDERS[self.selected_field];
        self.values[self.selected_field] = spec.snap(value);
        self.recompute();
        self.status = format!("{}: {}", spec.label, fmt_slider_value(self.selected_field, self.values[self.selected_field]));
    }

    fn export(&mut self) {
        let breakdown = match &self.outcome {
            Ok(b) => *b,
            Err(err) => {
                self.status = format!("Nothing to export: {err}");
                return;
            }
        };
        let now = Local::now();
        let path = export_path(&self.settings.export_dir, &now);
        let export = ExportFile::new(self.inputs(), breakdown, now);
        self.status = match write_export_json(&path, &export) {
            Ok(()) => format!("Wrote export: {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("mortgage", Style::default().fg(Color::Cyan)),
            Span::raw(" — calculator with credit score"),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(48), Constraint::Min(0)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3 * SLIDERS.len() as u16), Constraint::Min(0)])
            .split(columns[0]);

        self.draw_sliders(frame, left[0]);
        self.draw_results(frame, left[1]);
        self.draw_chart(frame, columns[1]);
    }

    fn draw_sliders(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(SLIDERS.iter().map(|_| Constraint::Length(3)))
            .split(area);

        for (i, spec) in SLIDERS.iter().enumerate() {
            let selected = i == self.selected_field;
            let border = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let title = if selected {
                format!("» {}", spec.label)
            } else {
                spec.label.to_string()
            };
            let gauge = Gauge::default()
                .block(Block::default().title(title).borders(Borders::ALL).border_style(border))
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
                .ratio(spec.ratio(self.values[i]))
                .label(fmt_slider_value(i, self.values[i]));
            frame.render_widget(gauge, rows[i]);
        }
    }

    fn draw_results(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Results").borders(Borders::ALL);
        let text = match &self.outcome {
            Ok(b) => {
                let r = b.result();
                Text::from(vec![
                    result_line("Loan Amount", fmt_currency(r.loan_amount)),
                    result_line("Yearly Gross Income", fmt_currency(r.required_yearly_gross_income)),
                    result_line("Total Monthly Payment", fmt_currency(r.total_monthly_payment)),
                    result_line("Adjusted Interest Rate", fmt_percent(r.adjusted_annual_interest_rate_pct)),
                    Line::raw(""),
                    detail_line("principal & interest", fmt_currency(b.principal_and_interest)),
                    detail_line("property tax", fmt_currency(b.monthly_property_tax)),
                    detail_line("insurance", fmt_currency(b.monthly_insurance)),
                ])
            }
            Err(err) => Text::from(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ))),
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Monthly payment by home price").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(series) = chart_series(&self.sweep, self.values[FIELD_PRICE]) else {
            let msg = Paragraph::new("No chart for these inputs.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = PaymentChart {
            curve: &series.curve,
            marker: series.marker,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "home price",
            y_label: "monthly",
            fmt_x: fmt_axis_thousands,
            fmt_y: fmt_axis_dollars,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ step  PgUp/PgDn ×10  Home/End bounds  r reset  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Slider values for a set of inputs, clamped and snapped onto each slider.
fn slider_values(inputs: &LoanInputs) -> [f64; 5] {
    let raw = [
        inputs.home_price,
        inputs.credit_score as f64,
        inputs.down_payment_pct,
        inputs.dti_ratio_pct,
        inputs.nominal_annual_rate_pct,
    ];
    let mut out = [0.0; 5];
    for (i, (spec, value)) in SLIDERS.iter().zip(raw).enumerate() {
        out[i] = spec.snap(value);
    }
    out
}

fn fmt_slider_value(field: usize, value: f64) -> String {
    match field {
        FIELD_PRICE => fmt_currency(value),
        FIELD_SCORE => format!("{value:.0}"),
        FIELD_DTI => format!("{value:.0}%"),
        _ => format!("{value:.1}%"),
    }
}

fn result_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<24}")),
        Span::styled(value, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
    ])
}

fn detail_line(label: &str, value: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {label:<22}{value}"),
        Style::default().fg(Color::Gray),
    ))
}

struct ChartSeries {
    curve: Vec<(f64, f64)>,
    marker: Option<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters from a price sweep.
fn chart_series(sweep: &[SweepPoint], current_price: f64) -> Option<ChartSeries> {
    let first = sweep.first()?;
    let last = sweep.last()?;
    let x_bounds = [first.home_price, last.home_price];
    if !(x_bounds[1] > x_bounds[0]) {
        return None;
    }

    let curve: Vec<(f64, f64)> = sweep
        .iter()
        .map(|p| (p.home_price, p.result.total_monthly_payment))
        .collect();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &curve {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        return None;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-9);
    let y_bounds = [(y_min - pad).max(0.0), y_max + pad];

    // Monthly payment is linear in price, so interpolate between sweep points.
    let marker = curve
        .windows(2)
        .find(|w| current_price >= w[0].0 && current_price <= w[1].0)
        .map(|w| {
            let u = (current_price - w[0].0) / (w[1].0 - w[0].0);
            (current_price, w[0].1 + u * (w[1].1 - w[0].1))
        });

    Some(ChartSeries {
        curve,
        marker,
        x_bounds,
        y_bounds,
    })
}

fn fmt_axis_thousands(v: f64) -> String {
    format!("{:.0}k", v / 1000.0)
}

fn fmt_axis_dollars(v: f64) -> String {
    format!("${v:.0}")
}
