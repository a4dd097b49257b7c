use serde::Serialize;

/// Vertex of an SVG polyline, in canvas units with the origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    /// Render as an SVG `points` attribute.
    pub fn format_points(points: &[ChartPoint]) -> String {
        points
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Map `values` onto a `width` x `height` canvas.
///
/// X is spread evenly left to right; the largest value sits at `y = 0`.
/// A flat series is drawn at mid-height.
pub fn svg_polyline_points(width: f64, height: f64, values: &[f64]) -> Vec<ChartPoint> {
    if values.is_empty() {
        return Vec::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let y = if range.abs() < f64::EPSILON {
                height / 2.0
            } else {
                height - (value - min) / range * height
            };
            ChartPoint {
                x: i as f64 * step,
                y,
            }
        })
        .collect()
}
