// Terminal rendition of the prediction page
use crate::application::page_view::{ChartSurface, FULL_OPACITY, PageView, ScrollTarget};
use crate::domain::chart::{ChartOptions, ChartSeries};
use crate::domain::prediction::FormField;
use ratatui::buffer::Buffer;
use ratatui::layout::{Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Bar, BarChart, BarGroup, Widget};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

const BAR_WIDTH: u16 = 40;
const GUTTER: u16 = 2;
const BAR_GLYPH: &str = "█";

pub type Output = Arc<Mutex<dyn Write + Send>>;

fn emit(out: &Output, text: &str) {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    let written = writeln!(out, "{}", text).and_then(|()| out.flush());
    if let Err(e) = written {
        tracing::warn!("Failed to write to terminal: {}", e);
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Parse a CSS-like colour into an RGB cell colour. Alpha is blended onto black.
fn parse_color(value: &str) -> Option<Color> {
    let trimmed = value.trim();

    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let inner = trimmed
        .strip_prefix("rgba(")
        .or_else(|| trimmed.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let alpha = match parts.as_slice() {
        [_, _, _] => 1.0,
        [_, _, _, a] => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
        _ => return None,
    };
    let channel = |part: &str| -> Option<u8> {
        let full: u8 = part.parse().ok()?;
        Some((f64::from(full) * alpha).round() as u8)
    };
    Some(Color::Rgb(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
    ))
}

fn cell_color(value: &str) -> Color {
    parse_color(value).unwrap_or_else(|| {
        tracing::debug!("Unrecognized chart colour {:?}, using terminal default", value);
        Color::Reset
    })
}

fn fg(value: &str) -> Style {
    Style::default().fg(cell_color(value))
}

/// Cell styles resolved from the chart options.
struct Palette {
    line: Style,
    area: Style,
    point: Style,
    grid: Style,
    value_title: Style,
    value_ticks: Style,
    time_title: Style,
    time_ticks: Style,
}

impl Palette {
    fn new(options: &ChartOptions) -> Self {
        Self {
            line: fg(&options.line_color),
            area: fg(&options.line_color).bg(cell_color(&options.background_color)),
            point: fg(&options.point_color).add_modifier(Modifier::BOLD),
            grid: fg(&options.grid_color),
            value_title: fg(&options.value_axis.title_color),
            value_ticks: fg(&options.value_axis.tick_color),
            time_title: fg(&options.time_axis.title_color),
            time_ticks: fg(&options.time_axis.tick_color),
        }
    }
}

/// Horizontal bars scaled to the largest value. The tip of each bar is its point.
fn draw_bars(
    buf: &mut Buffer,
    area: Rect,
    values: &[f64],
    max: f64,
    fill: bool,
    palette: &Palette,
) {
    // BarChart takes integers; hundredths keep the ratio between MW values
    let scaled = |value: f64| (value.max(0.0) * 100.0).round() as u64;
    let bars: Vec<Bar> = values
        .iter()
        .map(|&value| Bar::default().value(scaled(value)).text_value(String::new()))
        .collect();

    BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(palette.area)
        .max(scaled(max).max(1))
        .data(BarGroup::default().bars(&bars))
        .render(area, buf);

    for y in area.top()..area.bottom() {
        let Some(tip) = (area.left()..area.right())
            .rev()
            .find(|&x| buf[(x, y)].symbol() == BAR_GLYPH)
        else {
            continue;
        };
        if !fill {
            for x in area.left()..tip {
                buf[(x, y)].set_symbol(" ");
            }
        }
        buf[(tip, y)].set_style(palette.point);
    }
}

/// Lay the chart out on a cell buffer: legend, value-axis heading, one bar
/// per point between its time label and tooltip, then the time-axis title.
pub fn draw_chart(series: &ChartSeries, options: &ChartOptions) -> Buffer {
    let palette = Palette::new(options);
    let tooltips: Vec<String> = series
        .iter()
        .map(|point| options.tooltip_label(point.value))
        .collect();
    let label_width = series.labels().into_iter().map(text_width).max().unwrap_or(0);
    let tooltip_width = tooltips.iter().map(|t| text_width(t)).max().unwrap_or(0);
    let bars_x = GUTTER + label_width + 2;
    let tooltip_x = bars_x + BAR_WIDTH + 2;

    let legend = options
        .show_legend
        .then(|| format!("── {} ──", options.dataset_label));
    let max = series.values().into_iter().fold(0.0_f64, f64::max);
    let scale = (!series.is_empty())
        .then(|| format!("  [max {}]", options.value_tick_label(max)));
    let time_title = options.time_axis.title.as_str();
    let time_x = bars_x + BAR_WIDTH.saturating_sub(text_width(time_title)) / 2;

    let rows = u16::try_from(series.len().max(1)).unwrap_or(u16::MAX);
    let height = u16::from(legend.is_some()) + 1 + rows + 1;
    let width = [
        legend.as_deref().map_or(0, text_width),
        text_width(&options.value_axis.title) + scale.as_deref().map_or(0, text_width),
        tooltip_x + tooltip_width,
        time_x + text_width(time_title),
    ]
    .into_iter()
    .max()
    .unwrap_or(0);

    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let mut y = 0;
    if let Some(legend) = &legend {
        buf.set_string(0, y, legend, palette.line);
        y += 1;
    }
    let (x, _) = buf.set_stringn(0, y, &options.value_axis.title, usize::MAX, palette.value_title);
    if let Some(scale) = &scale {
        buf.set_string(x, y, scale, palette.value_ticks);
    }
    y += 1;

    if series.is_empty() {
        buf.set_string(GUTTER, y, "(no data)", palette.value_ticks);
    } else {
        let bars_area = Rect::new(bars_x, y, BAR_WIDTH, rows);
        draw_bars(&mut buf, bars_area, &series.values(), max, options.fill, &palette);

        for (row_y, (point, tooltip)) in (y..).zip(series.iter().zip(&tooltips)) {
            let label_x = GUTTER + label_width - text_width(&point.label);
            buf.set_string(label_x, row_y, &point.label, palette.time_ticks);
            buf.set_string(bars_x - 1, row_y, "│", palette.grid);
            buf.set_string(bars_x + BAR_WIDTH, row_y, "│", palette.grid);
            buf.set_string(tooltip_x, row_y, tooltip, palette.value_ticks);
        }
    }

    buf.set_string(time_x, height - 1, time_title, palette.time_title);
    buf
}

/// Plain text of a cell buffer, one line per row.
fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_text(series: &ChartSeries, options: &ChartOptions) -> String {
    buffer_text(&draw_chart(series, options))
}

/// The `loadChart` surface: prints each redraw and keeps the last frame.
pub struct TextChartSurface {
    out: Output,
    last_frame: Mutex<String>,
}

impl TextChartSurface {
    pub fn new(out: Output) -> Self {
        Self {
            out,
            last_frame: Mutex::new(String::new()),
        }
    }

    pub fn last_frame(&self) -> String {
        self.last_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ChartSurface for TextChartSurface {
    fn render(&self, series: &ChartSeries, options: &ChartOptions) {
        let frame = render_text(series, options);
        emit(&self.out, &frame);
        *self.last_frame.lock().unwrap_or_else(PoisonError::into_inner) = frame;
    }
}

struct ResultDisplay {
    text: String,
    opacity: f32,
}

pub struct TerminalView {
    out: Output,
    form: Mutex<HashMap<FormField, String>>,
    result: Mutex<ResultDisplay>,
    chart: Option<Arc<TextChartSurface>>,
}

impl TerminalView {
    pub fn new(out: Output, show_chart: bool) -> Self {
        let chart = show_chart.then(|| Arc::new(TextChartSurface::new(out.clone())));
        Self {
            out,
            form: Mutex::new(HashMap::new()),
            result: Mutex::new(ResultDisplay {
                text: "-- MW".to_string(),
                opacity: FULL_OPACITY,
            }),
            chart,
        }
    }

    /// The chart element, if the page has one
    pub fn chart_surface(&self) -> Option<Arc<dyn ChartSurface>> {
        self.chart
            .clone()
            .map(|chart| chart as Arc<dyn ChartSurface>)
    }

    pub fn set_field(&self, field: FormField, value: String) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(field, value);
    }

    #[cfg(test)]
    pub fn result_text(&self) -> String {
        self.result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .text
            .clone()
    }

    /// Dimmed results are marked pending
    fn result_line(&self) -> String {
        let result = self.result.lock().unwrap_or_else(PoisonError::into_inner);
        if result.opacity < FULL_OPACITY {
            format!("Predicted load: {} (pending)", result.text)
        } else {
            format!("Predicted load: {}", result.text)
        }
    }

    pub fn show_form(&self) {
        let form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        let mut lines = vec!["Load forecast inputs:".to_string()];
        for field in FormField::ALL {
            let hint = match field {
                FormField::Date => " (YYYY-MM-DD)",
                FormField::DayType => " (weekday | weekend)",
                FormField::Season => " (summer | monsoon | winter)",
                _ => "",
            };
            let value = form.get(&field).map(String::as_str).unwrap_or("");
            lines.push(format!("  {}{} = {}", field, hint, value));
        }
        drop(form);
        emit(&self.out, &lines.join("\n"));
    }
}

impl PageView for TerminalView {
    fn field_value(&self, field: FormField) -> Option<String> {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&field)
            .cloned()
    }

    fn set_result(&self, text: &str, opacity: f32) {
        {
            let mut result = self.result.lock().unwrap_or_else(PoisonError::into_inner);
            result.text = text.to_string();
            result.opacity = opacity;
        }
        emit(&self.out, &self.result_line());
    }

    fn alert(&self, message: &str) {
        emit(&self.out, &format!("[!] {}", message));
    }

    fn scroll_into_view(&self, target: ScrollTarget) {
        match (target, &self.chart) {
            (ScrollTarget::Chart, Some(chart)) => emit(&self.out, &chart.last_frame()),
            _ => emit(&self.out, &self.result_line()),
        }
    }
}
