// Chart domain models - rolling load series and its presentation
use std::collections::VecDeque;

/// Most recent points kept on the chart
pub const MAX_POINTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Time-of-day label, e.g. "02:05:09 PM"
    pub label: String,
    /// Megawatts
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: String, value: f64) -> Self {
        Self { label, value }
    }
}

/// Bounded FIFO of chart points in insertion (chronological) order.
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    points: VecDeque<SeriesPoint>,
}

impl ChartSeries {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(MAX_POINTS + 1),
        }
    }

    /// Append at the end and evict the oldest point once past capacity.
    pub fn push(&mut self, point: SeriesPoint) -> Option<SeriesPoint> {
        self.points.push_back(point);
        if self.points.len() > MAX_POINTS {
            self.points.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisOptions {
    pub title: String,
    pub tick_color: String,
    pub title_color: String,
}

/// How the load chart is drawn: one shaded series with highlighted points.
///
/// Colours are CSS-style strings (`#rrggbb`, `rgb(..)`, `rgba(..)`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub dataset_label: String,
    pub line_color: String,
    pub background_color: String,
    /// Shade the area under each point, not just the point itself
    pub fill: bool,
    pub point_color: String,
    pub grid_color: String,
    pub show_legend: bool,
    pub value_axis: AxisOptions,
    pub time_axis: AxisOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            dataset_label: "Electrical Load (MW)".to_string(),
            line_color: "#00d9ff".to_string(),
            background_color: "rgba(0, 217, 255, 0.1)".to_string(),
            fill: true,
            point_color: "#ffffff".to_string(),
            grid_color: "rgba(255,255,255,0.1)".to_string(),
            show_legend: true,
            value_axis: AxisOptions {
                title: "Load (MW)".to_string(),
                tick_color: "rgba(255,255,255,0.7)".to_string(),
                title_color: "#00d9ff".to_string(),
            },
            time_axis: AxisOptions {
                title: "Time".to_string(),
                tick_color: "rgba(255,255,255,0.7)".to_string(),
                title_color: "#00d9ff".to_string(),
            },
        }
    }
}

impl ChartOptions {
    pub fn tooltip_label(&self, value: f64) -> String {
        format!("Load: {:.2} MW", value)
    }

    pub fn value_tick_label(&self, value: f64) -> String {
        format!("{} MW", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> SeriesPoint {
        SeriesPoint::new(format!("t{}", i), i as f64 * 10.0)
    }

    #[test]
    fn test_length_is_min_of_n_and_capacity() {
        for n in 0..=25 {
            let mut series = ChartSeries::new();
            for i in 0..n {
                series.push(point(i));
            }

            assert_eq!(series.len(), n.min(MAX_POINTS));

            let expected: Vec<SeriesPoint> = (n.saturating_sub(MAX_POINTS)..n).map(point).collect();
            let actual: Vec<SeriesPoint> = series.iter().cloned().collect();
            assert_eq!(actual, expected, "contents after {} pushes", n);
        }
    }

    #[test]
    fn test_eleventh_point_evicts_oldest() {
        let mut series = ChartSeries::new();
        for i in 0..MAX_POINTS {
            assert_eq!(series.push(point(i)), None);
        }

        let evicted = series.push(point(MAX_POINTS));

        assert_eq!(evicted, Some(point(0)));
        assert_eq!(series.len(), MAX_POINTS);
        assert_eq!(series.iter().next(), Some(&point(1)));
        assert_eq!(series.iter().last(), Some(&point(MAX_POINTS)));
    }

    #[test]
    fn test_labels_and_values_stay_aligned() {
        let mut series = ChartSeries::new();
        for (label, value) in [("a", 10.0), ("b", 20.0), ("c", 30.0)] {
            series.push(SeriesPoint::new(label.to_string(), value));
        }

        assert_eq!(series.labels(), vec!["a", "b", "c"]);
        assert_eq!(series.values(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_chart_text_formats() {
        let options = ChartOptions::default();
        assert_eq!(options.tooltip_label(1234.5), "Load: 1234.50 MW");
        assert_eq!(options.value_tick_label(2000.0), "2000 MW");
        assert_eq!(options.value_axis.title, "Load (MW)");
        assert_eq!(options.time_axis.title, "Time");
    }
}
