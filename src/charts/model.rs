//! Chart Model Module
//! Renderer-independent chart descriptions returned by the analysis functions.

use serde::{Deserialize, Serialize};

/// An RGB series color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColor(pub u8, pub u8, pub u8);

impl SeriesColor {
    pub const BLUE: SeriesColor = SeriesColor(31, 119, 180);
    pub const RED: SeriesColor = SeriesColor(214, 39, 40);
    pub const PURPLE: SeriesColor = SeriesColor(148, 103, 189);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
}

/// One named series of `(x, y)` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub color: SeriesColor,
    /// Draw a marker at every point (line charts only).
    pub markers: bool,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>, color: SeriesColor) -> Self {
        Self {
            name: name.into(),
            points,
            color,
            markers: false,
        }
    }

    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }

    /// Build a series from per-row values, using the row index as x and
    /// skipping missing rows.
    pub fn from_rows(name: impl Into<String>, values: &[Option<f64>], color: SeriesColor) -> Self {
        let points = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
            .collect();
        Self::new(name, points, color)
    }
}

/// Description of a single line or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
    pub grid: bool,
    /// Preferred output size in pixels.
    pub size: (u32, u32),
}

impl Chart {
    pub fn line(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, title.into(), x_label.into(), y_label.into())
    }

    pub fn bar(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, title.into(), x_label.into(), y_label.into())
    }

    fn new(kind: ChartKind, title: String, x_label: String, y_label: String) -> Self {
        Self {
            kind,
            title,
            x_label,
            y_label,
            series: Vec::new(),
            grid: true,
            size: (1000, 600),
        }
    }

    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Smallest box containing every point, or `None` for an empty chart.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let &(x0, y0) = points.next()?;
        let bounds = points.fold(((x0, x0), (y0, y0)), |((xl, xh), (yl, yh)), &(x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        });
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_skips_missing_and_keeps_row_index() {
        let series = ChartSeries::from_rows("USD", &[Some(1.0), None, Some(3.0)], SeriesColor::RED);
        assert_eq!(series.points, vec![(0.0, 1.0), (2.0, 3.0)]);
        assert!(!series.markers);
    }

    #[test]
    fn bounds_cover_all_series() {
        let chart = Chart::line("t", "x", "y")
            .with_series(ChartSeries::new("a", vec![(0.0, 5.0), (1.0, -2.0)], SeriesColor::RED))
            .with_series(ChartSeries::new("b", vec![(4.0, 1.0)], SeriesColor::BLUE));
        assert_eq!(chart.bounds(), Some(((0.0, 4.0), (-2.0, 5.0))));
        assert_eq!(Chart::bar("t", "x", "y").bounds(), None);
    }

    #[test]
    fn chart_survives_json() {
        let chart = Chart::bar("Difference", "Index", "Difference")
            .with_series(ChartSeries::new("diff", vec![(0.0, -50.0)], SeriesColor::PURPLE))
            .with_size(1200, 600);
        let json = serde_json::to_string(&chart).unwrap();
        let back: Chart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chart);
    }
}
