//! Terminal time-series line charts.
//!
//! Plots a numeric series indexed by timestamps onto a Braille-dot character
//! grid: every cell packs 2x4 dots, so a 60x10 chart has a 120x40 pixel
//! resolution. Axes auto-scale to the data range.

use chrono::{DateTime, Utc};

/// Unicode Braille block base; dot bits are OR-ed onto it.
const BRAILLE_BASE: u32 = 0x2800;

/// Bit for the dot at (dx, dy) inside a cell, dx in 0..2, dy in 0..4.
fn dot_bit(dx: usize, dy: usize) -> u8 {
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        _ => 0x80,
    }
}

/// Dot-addressable character grid.
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Pixel width (2 dots per cell).
    fn px_width(&self) -> usize {
        self.width * 2
    }

    /// Pixel height (4 dots per cell).
    fn px_height(&self) -> usize {
        self.height * 4
    }

    /// Set the pixel at (x, y); y = 0 is the top row.
    fn set(&mut self, x: usize, y: usize) {
        if x >= self.px_width() || y >= self.px_height() {
            return;
        }
        let cell = (y / 4) * self.width + x / 2;
        self.cells[cell] |= dot_bit(x % 2, y % 4);
    }

    /// Straight segment between two pixels.
    fn line(&mut self, (x0, y0): (usize, usize), (x1, y1): (usize, usize)) {
        let dx = x1 as i64 - x0 as i64;
        let dy = y1 as i64 - y0 as i64;
        let steps = dx.abs().max(dy.abs()).max(1);

        for step in 0..=steps {
            let x = x0 as i64 + dx * step / steps;
            let y = y0 as i64 + dy * step / steps;
            self.set(x as usize, y as usize);
        }
    }

    fn row(&self, y: usize) -> String {
        (0..self.width)
            .map(|x| {
                let bits = self.cells[y * self.width + x];
                char::from_u32(BRAILLE_BASE + bits as u32).unwrap_or(' ')
            })
            .collect()
    }
}

/// A titled, auto-scaled line chart.
#[derive(Debug, Clone)]
pub struct LineChart {
    title: String,
    width: usize,
    height: usize,
}

impl LineChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: 60,
            height: 10,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width.max(10);
        self.height = height.max(2);
        self
    }

    /// Render the series to a multi-line string.
    ///
    /// Points are sorted by timestamp before plotting; an empty series renders
    /// a placeholder instead of failing.
    pub fn render(&self, points: &[(DateTime<Utc>, f64)]) -> String {
        if points.is_empty() {
            return format!("{}\n  (no data)", self.title);
        }

        let mut points: Vec<(i64, f64)> = points
            .iter()
            .map(|(t, v)| (t.timestamp(), *v))
            .collect();
        points.sort_by_key(|(t, _)| *t);

        let t_min = points.first().map(|(t, _)| *t).unwrap_or(0);
        let t_max = points.last().map(|(t, _)| *t).unwrap_or(0);
        let v_min = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let v_max = points
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut canvas = Canvas::new(self.width, self.height);
        let px_w = (canvas.px_width() - 1) as f64;
        let px_h = (canvas.px_height() - 1) as f64;

        let to_pixel = |(t, v): (i64, f64)| {
            let x = if t_max == t_min {
                px_w / 2.0
            } else {
                (t - t_min) as f64 / (t_max - t_min) as f64 * px_w
            };
            let y = if v_max == v_min {
                px_h / 2.0
            } else {
                // y grows downward on the canvas
                px_h - (v - v_min) / (v_max - v_min) * px_h
            };
            (x.round() as usize, y.round() as usize)
        };

        let pixels: Vec<(usize, usize)> = points.iter().map(|&p| to_pixel(p)).collect();
        for pair in pixels.windows(2) {
            canvas.line(pair[0], pair[1]);
        }
        if let Some(&only) = pixels.first() {
            canvas.set(only.0, only.1);
        }

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');

        for y in 0..self.height {
            let label = if y == 0 {
                format!("{:>9.1}", v_max)
            } else if y == self.height - 1 {
                format!("{:>9.1}", v_min)
            } else {
                " ".repeat(9)
            };
            out.push_str(&format!("{} |{}\n", label, canvas.row(y)));
        }

        let from = DateTime::from_timestamp(t_min, 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let to = DateTime::from_timestamp(t_max, 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{} {:<w$}{}",
            " ".repeat(11),
            from,
            to,
            w = self.width.saturating_sub(to.chars().count()),
        ));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, value: f64) -> (DateTime<Utc>, f64) {
        (Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(), value)
    }

    #[test]
    fn test_empty_series_renders_placeholder() {
        let chart = LineChart::new("likes");
        let out = chart.render(&[]);
        assert!(out.contains("likes"));
        assert!(out.contains("(no data)"));
    }

    #[test]
    fn test_render_contains_title_and_bounds() {
        let chart = LineChart::new("likes over time");
        let out = chart.render(&[at(1, 2.0), at(2, 10.0), at(3, 5.0)]);

        assert!(out.starts_with("likes over time"));
        assert!(out.contains("10.0"));
        assert!(out.contains("2.0"));
        assert!(out.contains("2024-05-01"));
        assert!(out.contains("2024-05-03"));
    }

    #[test]
    fn test_render_row_count_matches_height() {
        let chart = LineChart::new("t").with_size(30, 6);
        let out = chart.render(&[at(1, 1.0), at(2, 2.0)]);
        // title + 6 chart rows + x-axis line
        assert_eq!(out.lines().count(), 8);
    }

    #[test]
    fn test_constant_series_does_not_panic() {
        let chart = LineChart::new("flat");
        let out = chart.render(&[at(1, 3.0), at(2, 3.0), at(3, 3.0)]);
        assert!(out.contains("3.0"));
    }

    #[test]
    fn test_single_point_plots_midline() {
        let chart = LineChart::new("one");
        let out = chart.render(&[at(1, 7.0)]);
        // One dot somewhere in the grid.
        assert!(out.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_time() {
        let chart = LineChart::new("s");
        // Reversed order must not panic and must use the true time bounds.
        let out = chart.render(&[at(9, 1.0), at(1, 4.0)]);
        assert!(out.contains("2024-05-01"));
        assert!(out.contains("2024-05-09"));
    }
}
