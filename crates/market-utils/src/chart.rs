use core_types::ChartDataPoint;

/// Number of horizontal steps the detail chart is divided into.
const CHART_X_STEPS: f64 = 6.0;

/// Turns daily candles into SVG polyline points (`"x,y"` joined by newlines).
///
/// Close prices are scaled into `chart_height - 2` pixels so the stroke stays inside
/// the view box; the oldest point sits at `x = 0`. A flat series is drawn along the
/// bottom edge.
pub fn plot_chart_points(data: &[ChartDataPoint], chart_height: u32, chart_width: u32) -> String {
    if data.is_empty() {
        return String::new();
    }

    let chart_area = f64::from(chart_height.saturating_sub(2));
    let step = f64::from(chart_width) / CHART_X_STEPS;

    let (min, max) = data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
        (min.min(p.c), max.max(p.c))
    });
    let range = max - min;

    data.iter()
        .enumerate()
        .map(|(i, point)| {
            let y = if range > 0.0 {
                (point.c - min) * chart_area / range
            } else {
                0.0
            };
            let x = i as f64 * step;
            format!("{},{}", x, chart_area - y)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
