mod charts;
pub use charts::{ChartSeries, Metric, MetricChart};

mod summary;
pub use summary::{
    cancellation_summary, occupancy_summary, revenue_summary, used_tickets_summary,
};

mod data;
pub use data::{CategoryCard, DashboardData};

mod form;
pub use form::{toggle_id, FilterForm, FilterOptions};

mod export;
pub use export::{export_chart_png, export_document, DocumentKind};
