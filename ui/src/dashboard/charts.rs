//! Chart projection and rendering.
//!
//! A `ChartSeries` is the owned, already-projected state of one chart:
//! period labels on the x axis, one numeric value per period. Rendering is
//! plain SVG, so resizing is free and export can reuse the same markup.

use dioxus::prelude::*;

use crate::core::format;

const VIEW_WIDTH: f64 = 600.0;
const VIEW_HEIGHT: f64 = 260.0;
const PAD_X: f64 = 18.0;
const PAD_Y: f64 = 20.0;

/// The four dashboard metric categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Revenue,
    Occupancy,
    UsedTickets,
    Cancellations,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Revenue,
        Metric::Occupancy,
        Metric::UsedTickets,
        Metric::Cancellations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue by Period",
            Metric::Occupancy => "Auditorium Occupancy",
            Metric::UsedTickets => "Used Tickets",
            Metric::Cancellations => "Cancellations",
        }
    }

    /// Stable identifier used in CSS hooks and export filenames.
    pub fn slug(self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Occupancy => "occupancy",
            Metric::UsedTickets => "used-tickets",
            Metric::Cancellations => "cancellations",
        }
    }

    pub fn accent(self) -> &'static str {
        match self {
            Metric::Revenue => "#28a745",
            Metric::Occupancy => "#17a2b8",
            Metric::UsedTickets => "#ffc107",
            Metric::Cancellations => "#dc3545",
        }
    }

    fn area_fill(self) -> &'static str {
        match self {
            Metric::Revenue => "rgba(40, 167, 69, 0.25)",
            Metric::Occupancy => "rgba(23, 162, 184, 0.25)",
            Metric::UsedTickets => "rgba(255, 193, 7, 0.25)",
            Metric::Cancellations => "rgba(220, 53, 69, 0.25)",
        }
    }

    pub fn axis_name(self) -> &'static str {
        match self {
            Metric::Revenue => "Dollars ($)",
            _ => "Percentage (%)",
        }
    }

    /// Percentage metrics pin the y axis to 100.
    pub fn is_percentage(self) -> bool {
        !matches!(self, Metric::Revenue)
    }

    pub fn format_value(self, value: f64) -> String {
        if self.is_percentage() {
            format::format_percent(value)
        } else {
            format::format_currency(value)
        }
    }
}

/// Owned chart state for one metric category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub metric: Metric,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// The explicit empty state a chart shows before data arrives or when
    /// its category came back without rows.
    pub fn empty(metric: Metric) -> Self {
        Self {
            metric,
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn from_points(metric: Metric, points: Vec<(String, f64)>) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Self {
            metric,
            labels,
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Chart heading; flags the empty state explicitly rather than showing
    /// a blank plot.
    pub fn title(&self) -> String {
        if self.is_empty() {
            format!("{} (no data)", self.metric.title())
        } else {
            self.metric.title().to_string()
        }
    }

    fn y_ceiling(&self) -> f64 {
        if self.metric.is_percentage() {
            return 100.0;
        }
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    /// `(x, y)` view-box coordinates, one per period.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        let count = self.values.len();
        if count == 0 {
            return Vec::new();
        }
        let ceiling = self.y_ceiling();
        let inner_w = VIEW_WIDTH - 2.0 * PAD_X;
        let inner_h = VIEW_HEIGHT - 2.0 * PAD_Y;
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let x = if count == 1 {
                    VIEW_WIDTH / 2.0
                } else {
                    PAD_X + inner_w * idx as f64 / (count - 1) as f64
                };
                let clamped = value.clamp(0.0, ceiling);
                let y = VIEW_HEIGHT - PAD_Y - inner_h * clamped / ceiling;
                (x, y)
            })
            .collect()
    }

    pub fn polyline_points(&self) -> String {
        self.plot_points()
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Closed path under the series line, for the area fill.
    pub fn area_path(&self) -> String {
        let points = self.plot_points();
        let Some((first, _)) = points.first() else {
            return String::new();
        };
        let (last, _) = points[points.len() - 1];
        let baseline = VIEW_HEIGHT - PAD_Y;
        let mut path = format!("M {first:.1} {baseline:.1}");
        for (x, y) in &points {
            path.push_str(&format!(" L {x:.1} {y:.1}"));
        }
        path.push_str(&format!(" L {last:.1} {baseline:.1} Z"));
        path
    }

    /// At most `max` x-axis labels, evenly sampled so dense ranges stay legible.
    pub fn sampled_labels(&self, max: usize) -> Vec<String> {
        if self.labels.len() <= max || max == 0 {
            return self.labels.clone();
        }
        let step = (self.labels.len() + max - 1) / max;
        self.labels.iter().step_by(step).cloned().collect()
    }

    /// Standalone SVG document for rasterized export.
    pub fn svg_markup(&self) -> String {
        let accent = self.metric.accent();
        let fill = self.metric.area_fill();
        let title = self.title();
        let polyline = self.polyline_points();
        let area = self.area_path();
        let labels = self
            .sampled_labels(8)
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let x = 40.0 + idx as f64 * 70.0;
                format!(
                    "<text x='{x:.0}' y='250' fill='#a0aec0' font-family='sans-serif' font-size='11'>{label}</text>"
                )
            })
            .collect::<Vec<_>>()
            .join("\n  ");
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='600' height='260' viewBox='0 0 600 260'>\n  \
             <rect width='600' height='260' fill='#1a202c'/>\n  \
             <text x='18' y='18' fill='#e2e8f0' font-family='sans-serif' font-size='15' font-weight='700'>{title}</text>\n  \
             <path d='{area}' fill='{fill}'/>\n  \
             <polyline points='{polyline}' fill='none' stroke='{accent}' stroke-width='3'/>\n  \
             {labels}\n</svg>"
        )
    }
}

#[component]
pub fn MetricChart(series: ChartSeries) -> Element {
    let slug = series.metric.slug();
    let accent = series.metric.accent();
    let area_fill = series.metric.area_fill();
    let title = series.title();
    let axis = series.metric.axis_name();

    if series.is_empty() {
        return rsx! {
            div { class: "metric-card__chart metric-card__chart--empty",
                h3 { class: "metric-card__title", "{title}" }
                p { class: "metric-card__placeholder",
                    "No data for the selected range and filters."
                }
            }
        };
    }

    let polyline = series.polyline_points();
    let area = series.area_path();
    let markers = series.plot_points();
    let labels = series.sampled_labels(8);
    let last_value = series
        .values
        .last()
        .map(|value| series.metric.format_value(*value))
        .unwrap_or_default();

    rsx! {
        div { class: "metric-card__chart metric-card__chart--{slug}",
            div { class: "metric-card__chart-header",
                h3 { class: "metric-card__title", "{title}" }
                span { class: "metric-card__axis", "{axis}" }
            }
            svg {
                class: "metric-card__plot",
                view_box: "0 0 600 260",
                role: "img",
                "aria-label": "{title}, latest {last_value}",
                path { d: "{area}", fill: "{area_fill}" }
                polyline {
                    points: "{polyline}",
                    fill: "none",
                    stroke: "{accent}",
                    stroke_width: "3",
                }
                for (x, y) in markers.into_iter() {
                    circle { cx: "{x}", cy: "{y}", r: "4", fill: "{accent}" }
                }
            }
            div { class: "metric-card__labels",
                for label in labels.into_iter() {
                    span { class: "metric-card__label", "{label}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> ChartSeries {
        ChartSeries {
            metric: Metric::Revenue,
            labels: values.iter().map(|v| format!("p{v}")).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn empty_series_titles_the_empty_state() {
        let chart = ChartSeries::empty(Metric::Occupancy);
        assert!(chart.is_empty());
        assert_eq!(chart.title(), "Auditorium Occupancy (no data)");
        assert!(chart.polyline_points().is_empty());
        assert!(chart.area_path().is_empty());
    }

    #[test]
    fn points_span_the_view_box() {
        let chart = series(&[0.0, 50.0, 100.0]);
        let points = chart.plot_points();
        assert_eq!(points.len(), 3);
        assert!((points[0].0 - 18.0).abs() < 0.5);
        assert!((points[2].0 - 582.0).abs() < 0.5);
        // Larger values sit higher on screen (smaller y).
        assert!(points[2].1 < points[0].1);
    }

    #[test]
    fn percentage_axis_is_pinned_to_hundred() {
        let mut chart = series(&[10.0]);
        chart.metric = Metric::Cancellations;
        let baseline = chart.plot_points()[0].1;
        chart.values = vec![100.0];
        let top = chart.plot_points()[0].1;
        assert!(top < baseline);
        assert!((top - 20.0).abs() < 0.5);
    }

    #[test]
    fn single_point_is_centered() {
        let chart = series(&[42.0]);
        let points = chart.plot_points();
        assert_eq!(points.len(), 1);
        assert!((points[0].0 - 300.0).abs() < 0.5);
    }

    #[test]
    fn label_sampling_caps_density() {
        let chart = ChartSeries {
            metric: Metric::Revenue,
            labels: (0..40).map(|i| i.to_string()).collect(),
            values: vec![1.0; 40],
        };
        assert!(chart.sampled_labels(8).len() <= 8);
        assert_eq!(chart.sampled_labels(8)[0], "0");
    }

    #[test]
    fn svg_markup_embeds_accent_and_title() {
        let chart = series(&[1.0, 2.0]);
        let markup = chart.svg_markup();
        assert!(markup.contains("#28a745"));
        assert!(markup.contains("Revenue by Period"));
        assert!(markup.starts_with("<svg"));
    }
}
