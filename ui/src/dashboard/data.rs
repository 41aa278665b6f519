//! Owned dashboard state: four chart/summary pairs.
//!
//! The refresh controller builds a fresh `DashboardData` from each applied
//! response and swaps it into a signal; nothing here is module-level mutable
//! state, so there is a single writer per chart by construction.

use api::series::MetricsResponse;

use super::charts::{ChartSeries, Metric};
use super::summary::{
    self, cancellation_summary, occupancy_summary, revenue_summary, used_tickets_summary,
};

/// One metric category's chart plus its recomputed textual summary.
/// `summary == None` renders the "no data" notice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryCard {
    pub chart: ChartSeries,
    pub summary: Option<summary::SummaryParts>,
}

impl CategoryCard {
    fn empty(metric: Metric) -> Self {
        Self {
            chart: ChartSeries::empty(metric),
            summary: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub revenue: CategoryCard,
    pub occupancy: CategoryCard,
    pub used_tickets: CategoryCard,
    pub cancellations: CategoryCard,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            revenue: CategoryCard::empty(Metric::Revenue),
            occupancy: CategoryCard::empty(Metric::Occupancy),
            used_tickets: CategoryCard::empty(Metric::UsedTickets),
            cancellations: CategoryCard::empty(Metric::Cancellations),
        }
    }
}

impl DashboardData {
    /// Project a data-carrying response. Each category is handled
    /// independently: an empty series gets the explicit empty chart state
    /// and no summary, without affecting the other three.
    pub fn from_response(response: &MetricsResponse) -> Self {
        let revenue_rows = response.revenue_series();
        let occupancy_rows = response.occupancy_series();
        let used_rows = response.used_tickets_series();
        let cancel_rows = response.cancellations_series();

        Self {
            revenue: CategoryCard {
                chart: ChartSeries::from_points(
                    Metric::Revenue,
                    revenue_rows
                        .iter()
                        .map(|row| (row.period.clone(), row.revenue))
                        .collect(),
                ),
                summary: revenue_summary(revenue_rows),
            },
            occupancy: CategoryCard {
                chart: ChartSeries::from_points(
                    Metric::Occupancy,
                    occupancy_rows
                        .iter()
                        .map(|row| (row.period.clone(), row.occupancy_pct))
                        .collect(),
                ),
                summary: occupancy_summary(occupancy_rows),
            },
            used_tickets: CategoryCard {
                chart: ChartSeries::from_points(
                    Metric::UsedTickets,
                    used_rows
                        .iter()
                        .map(|row| (row.period.clone(), row.used_pct))
                        .collect(),
                ),
                summary: used_tickets_summary(used_rows),
            },
            cancellations: CategoryCard {
                chart: ChartSeries::from_points(
                    Metric::Cancellations,
                    cancel_rows
                        .iter()
                        .map(|row| (row.period.clone(), row.cancel_pct))
                        .collect(),
                ),
                summary: cancellation_summary(cancel_rows),
            },
        }
    }

    /// Empty-result path: all four summaries drop to the "no data" notice
    /// while charts keep whatever they were showing.
    pub fn clear_summaries(&mut self) {
        self.revenue.summary = None;
        self.occupancy.summary = None;
        self.used_tickets.summary = None;
        self.cancellations.summary = None;
    }

    pub fn card(&self, metric: Metric) -> &CategoryCard {
        match metric {
            Metric::Revenue => &self.revenue,
            Metric::Occupancy => &self.occupancy,
            Metric::UsedTickets => &self.used_tickets,
            Metric::Cancellations => &self.cancellations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_only_response_leaves_other_cards_empty() {
        let response: MetricsResponse = serde_json::from_value(serde_json::json!({
            "ingresos": [
                {"Periodo": "2024-01", "Ingresos": 100.0, "BoletosVendidos": 5},
                {"Periodo": "2024-02", "Ingresos": 200.0, "BoletosVendidos": 10}
            ]
        }))
        .unwrap();

        let data = DashboardData::from_response(&response);
        assert!(!data.revenue.chart.is_empty());
        let parts = data.revenue.summary.as_ref().unwrap();
        assert_eq!(parts[0].1, "$300.00");
        assert_eq!(parts[1].1, "15");
        assert_eq!(parts[2].1, "$150.00");

        for metric in [Metric::Occupancy, Metric::UsedTickets, Metric::Cancellations] {
            let card = data.card(metric);
            assert!(card.chart.is_empty());
            assert!(card.summary.is_none());
            assert!(card.chart.title().contains("(no data)"));
        }
    }

    #[test]
    fn charts_use_period_labels_in_order() {
        let response: MetricsResponse = serde_json::from_value(serde_json::json!({
            "ocupacion": [
                {"Periodo": "2024-01-01", "PorcentajeOcupacion": 25.0},
                {"Periodo": "2024-01-02", "PorcentajeOcupacion": 75.0}
            ]
        }))
        .unwrap();
        let data = DashboardData::from_response(&response);
        assert_eq!(
            data.occupancy.chart.labels,
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()]
        );
        assert_eq!(data.occupancy.chart.values, vec![25.0, 75.0]);
    }

    #[test]
    fn clear_summaries_keeps_chart_state() {
        let response: MetricsResponse = serde_json::from_value(serde_json::json!({
            "ingresos": [{"Periodo": "2024-01", "Ingresos": 10.0, "BoletosVendidos": 1}]
        }))
        .unwrap();
        let mut data = DashboardData::from_response(&response);
        data.clear_summaries();
        assert!(data.revenue.summary.is_none());
        assert!(!data.revenue.chart.is_empty());
    }
}
