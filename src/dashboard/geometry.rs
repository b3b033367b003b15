//! Geometry for the hand-drawn dashboard charts.
//!
//! Values are mapped into a fixed SVG drawing surface so the charts can be
//! rendered without any client-side charting library.

use crate::lenient::finite_or_zero;

/// Width of the line chart's SVG view box.
pub const VIEW_WIDTH: f64 = 600.0;
/// Height of the line chart's SVG view box.
pub const VIEW_HEIGHT: f64 = 300.0;

/// Room for the y-axis labels.
pub const PADDING_LEFT: f64 = 90.0;
pub const PADDING_RIGHT: f64 = 20.0;
pub const PADDING_TOP: f64 = 20.0;
/// Room for the x-axis labels.
pub const PADDING_BOTTOM: f64 = 30.0;

const TICK_COUNT: usize = 5;

const AREA_WIDTH: f64 = VIEW_WIDTH - PADDING_LEFT - PADDING_RIGHT;
const AREA_HEIGHT: f64 = VIEW_HEIGHT - PADDING_TOP - PADDING_BOTTOM;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A labelled horizontal grid line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f64,
}

/// Everything needed to draw a line chart of a series of values.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub points: Vec<Point>,
    pub ticks: Vec<Tick>,
    /// The y coordinate of zero, present when the series crosses zero.
    pub zero_line: Option<f64>,
}

impl LineChart {
    /// Lay out `values` left to right, scaled to their min/max range.
    ///
    /// Returns `None` for an empty series. A single value is centred
    /// horizontally and a series with no range is centred vertically.
    pub fn new(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let values: Vec<f64> = values.iter().copied().map(finite_or_zero).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let scale = Scale { min, max };

        let points = values
            .iter()
            .enumerate()
            .map(|(index, value)| Point {
                x: x_position(index, values.len()),
                y: scale.y(*value),
            })
            .collect();

        let ticks = if scale.range() > 0.0 {
            (0..TICK_COUNT)
                .map(|i| {
                    let value = min + scale.range() * i as f64 / (TICK_COUNT - 1) as f64;
                    Tick {
                        value,
                        y: scale.y(value),
                    }
                })
                .collect()
        } else {
            vec![Tick {
                value: min,
                y: scale.y(min),
            }]
        };

        let zero_line = (min < 0.0 && max > 0.0).then(|| scale.y(0.0));

        Some(Self {
            points,
            ticks,
            zero_line,
        })
    }

    /// The SVG path data joining the points.
    pub fn path(&self) -> String {
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let command = if index == 0 { 'M' } else { 'L' };
                format!("{command} {:.1} {:.1}", point.x, point.y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

struct Scale {
    min: f64,
    max: f64,
}

impl Scale {
    fn range(&self) -> f64 {
        self.max - self.min
    }

    fn y(&self, value: f64) -> f64 {
        let range = self.range();
        if range <= 0.0 {
            return PADDING_TOP + AREA_HEIGHT / 2.0;
        }

        let normalized = (value - self.min) / range;
        PADDING_TOP + (1.0 - normalized) * AREA_HEIGHT
    }
}

fn x_position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return PADDING_LEFT + AREA_WIDTH / 2.0;
    }

    PADDING_LEFT + index as f64 / (count - 1) as f64 * AREA_WIDTH
}

/// The length of a bar as a percentage of the longest bar.
///
/// A non-positive maximum or amount gives a zero-length bar.
pub fn bar_percentage(amount: f64, max: f64) -> f64 {
    let amount = finite_or_zero(amount);
    let max = finite_or_zero(max);

    if max <= 0.0 || amount <= 0.0 {
        return 0.0;
    }

    (amount / max * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::{
        AREA_HEIGHT, AREA_WIDTH, LineChart, PADDING_LEFT, PADDING_TOP, bar_percentage,
    };

    const EPSILON: f64 = 1e-9;

    #[test]
    fn empty_series_has_no_chart() {
        assert_eq!(LineChart::new(&[]), None);
    }

    #[test]
    fn points_span_the_drawing_area() {
        let chart = LineChart::new(&[100.0, 300.0, 200.0]).unwrap();

        let first = chart.points[0];
        let last = chart.points[2];
        assert!((first.x - PADDING_LEFT).abs() < EPSILON);
        assert!((last.x - (PADDING_LEFT + AREA_WIDTH)).abs() < EPSILON);
        // The minimum sits on the bottom edge, the maximum on the top edge.
        assert!((first.y - (PADDING_TOP + AREA_HEIGHT)).abs() < EPSILON);
        assert!((chart.points[1].y - PADDING_TOP).abs() < EPSILON);
        assert!((last.y - (PADDING_TOP + AREA_HEIGHT / 2.0)).abs() < EPSILON);
    }

    #[test]
    fn single_point_is_centred() {
        let chart = LineChart::new(&[5000.0]).unwrap();

        assert_eq!(chart.points.len(), 1);
        assert!((chart.points[0].x - (PADDING_LEFT + AREA_WIDTH / 2.0)).abs() < EPSILON);
        assert!((chart.points[0].y - (PADDING_TOP + AREA_HEIGHT / 2.0)).abs() < EPSILON);
        assert_eq!(chart.ticks.len(), 1);
        assert_eq!(chart.path(), format!("M {:.1} {:.1}", chart.points[0].x, chart.points[0].y));
    }

    #[test]
    fn flat_series_is_centred_vertically() {
        let chart = LineChart::new(&[10.0, 10.0, 10.0]).unwrap();

        for point in &chart.points {
            assert!((point.y - (PADDING_TOP + AREA_HEIGHT / 2.0)).abs() < EPSILON);
        }
        assert_eq!(chart.zero_line, None);
    }

    #[test]
    fn five_ticks_from_min_to_max() {
        let chart = LineChart::new(&[0.0, 400.0]).unwrap();

        let values: Vec<f64> = chart.ticks.iter().map(|tick| tick.value).collect();
        assert_eq!(values, [0.0, 100.0, 200.0, 300.0, 400.0]);
        assert!((chart.ticks[0].y - (PADDING_TOP + AREA_HEIGHT)).abs() < EPSILON);
        assert!((chart.ticks[4].y - PADDING_TOP).abs() < EPSILON);
    }

    #[test]
    fn zero_line_only_when_range_crosses_zero() {
        let crossing = LineChart::new(&[-100.0, 300.0]).unwrap();
        let positive = LineChart::new(&[100.0, 300.0]).unwrap();

        let zero_y = crossing.zero_line.unwrap();
        assert!((zero_y - (PADDING_TOP + AREA_HEIGHT * 0.75)).abs() < EPSILON);
        assert_eq!(positive.zero_line, None);
    }

    #[test]
    fn non_finite_values_are_plotted_as_zero() {
        let chart = LineChart::new(&[f64::NAN, 100.0]).unwrap();

        assert!((chart.points[0].y - (PADDING_TOP + AREA_HEIGHT)).abs() < EPSILON);
    }

    #[test]
    fn path_joins_points_in_order() {
        let chart = LineChart::new(&[0.0, 1.0]).unwrap();

        assert_eq!(chart.path(), "M 90.0 270.0 L 580.0 20.0");
    }

    #[test]
    fn bars_scale_to_the_maximum() {
        assert_eq!(bar_percentage(50.0, 200.0), 25.0);
        assert_eq!(bar_percentage(200.0, 200.0), 100.0);
        assert_eq!(bar_percentage(50.0, 0.0), 0.0);
        assert_eq!(bar_percentage(50.0, -10.0), 0.0);
        assert_eq!(bar_percentage(-5.0, 100.0), 0.0);
        assert_eq!(bar_percentage(f64::NAN, 100.0), 0.0);
    }
}
