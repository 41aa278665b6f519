//! Per-category textual summaries recomputed on every refresh.
//!
//! Each helper returns `None` for an empty series; the caller renders the
//! "no data" notice in that case. Revenue aggregates an absolute total plus
//! mean; the percentage categories average the period percentages and sum
//! their auxiliary totals.

use api::series::{CancellationPoint, OccupancyPoint, RevenuePoint, UsedTicketsPoint};

use crate::core::format;

/// `(label, formatted value)` segments, rendered left to right.
pub type SummaryParts = Vec<(String, String)>;

pub fn revenue_summary(rows: &[RevenuePoint]) -> Option<SummaryParts> {
    if rows.is_empty() {
        return None;
    }
    let total: f64 = rows.iter().map(|row| row.revenue).sum();
    let tickets: u64 = rows.iter().map(|row| row.tickets_sold).sum();
    let mean = total / rows.len() as f64;
    Some(vec![
        ("Total".to_string(), format::format_currency(total)),
        ("Tickets".to_string(), format::format_count(tickets)),
        ("Average".to_string(), format::format_currency(mean)),
    ])
}

pub fn occupancy_summary(rows: &[OccupancyPoint]) -> Option<SummaryParts> {
    if rows.is_empty() {
        return None;
    }
    let mean_pct = rows.iter().map(|row| row.occupancy_pct).sum::<f64>() / rows.len() as f64;
    let capacity: u64 = rows.iter().map(|row| row.capacity).sum();
    let sold: u64 = rows.iter().map(|row| row.tickets_sold).sum();
    Some(vec![
        (
            "Average occupancy".to_string(),
            format::format_percent(mean_pct),
        ),
        (
            "Total capacity".to_string(),
            format!("{} seats", format::format_count(capacity)),
        ),
        ("Tickets sold".to_string(), format::format_count(sold)),
    ])
}

pub fn used_tickets_summary(rows: &[UsedTicketsPoint]) -> Option<SummaryParts> {
    if rows.is_empty() {
        return None;
    }
    let mean_pct = rows.iter().map(|row| row.used_pct).sum::<f64>() / rows.len() as f64;
    let total: u64 = rows.iter().map(|row| row.tickets_total).sum();
    let used: u64 = rows.iter().map(|row| row.tickets_used).sum();
    Some(vec![
        ("Average used".to_string(), format::format_percent(mean_pct)),
        ("Total tickets".to_string(), format::format_count(total)),
        ("Total used".to_string(), format::format_count(used)),
    ])
}

pub fn cancellation_summary(rows: &[CancellationPoint]) -> Option<SummaryParts> {
    if rows.is_empty() {
        return None;
    }
    let mean_pct = rows.iter().map(|row| row.cancel_pct).sum::<f64>() / rows.len() as f64;
    let sold: u64 = rows.iter().map(|row| row.tickets_sold).sum();
    let cancelled: u64 = rows.iter().map(|row| row.tickets_cancelled).sum();
    Some(vec![
        (
            "Average cancelled".to_string(),
            format::format_percent(mean_pct),
        ),
        ("Tickets sold".to_string(), format::format_count(sold)),
        (
            "Tickets cancelled".to_string(),
            format::format_count(cancelled),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue_rows() -> Vec<RevenuePoint> {
        vec![
            RevenuePoint {
                period: "2024-01".to_string(),
                revenue: 100.0,
                tickets_sold: 5,
            },
            RevenuePoint {
                period: "2024-02".to_string(),
                revenue: 200.0,
                tickets_sold: 10,
            },
        ]
    }

    #[test]
    fn revenue_totals_tickets_and_mean() {
        let parts = revenue_summary(&revenue_rows()).unwrap();
        assert_eq!(parts[0], ("Total".to_string(), "$300.00".to_string()));
        assert_eq!(parts[1], ("Tickets".to_string(), "15".to_string()));
        assert_eq!(parts[2], ("Average".to_string(), "$150.00".to_string()));
    }

    #[test]
    fn empty_series_yield_none() {
        assert!(revenue_summary(&[]).is_none());
        assert!(occupancy_summary(&[]).is_none());
        assert!(used_tickets_summary(&[]).is_none());
        assert!(cancellation_summary(&[]).is_none());
    }

    #[test]
    fn occupancy_averages_percentages_and_sums_totals() {
        let rows = vec![
            OccupancyPoint {
                period: "w1".to_string(),
                occupancy_pct: 40.0,
                capacity: 200,
                tickets_sold: 80,
            },
            OccupancyPoint {
                period: "w2".to_string(),
                occupancy_pct: 60.0,
                capacity: 200,
                tickets_sold: 120,
            },
        ];
        let parts = occupancy_summary(&rows).unwrap();
        assert_eq!(parts[0].1, "50.00%");
        assert_eq!(parts[1].1, "400 seats");
        assert_eq!(parts[2].1, "200");
    }

    #[test]
    fn cancellations_report_both_totals() {
        let rows = vec![CancellationPoint {
            period: "2024-01".to_string(),
            cancel_pct: 12.5,
            tickets_sold: 1000,
            tickets_cancelled: 125,
        }];
        let parts = cancellation_summary(&rows).unwrap();
        assert_eq!(parts[0].1, "12.50%");
        assert_eq!(parts[1].1, "1,000");
        assert_eq!(parts[2].1, "125");
    }

    #[test]
    fn used_tickets_average_is_of_percentages_not_totals() {
        let rows = vec![
            UsedTicketsPoint {
                period: "d1".to_string(),
                used_pct: 100.0,
                tickets_total: 10,
                tickets_used: 10,
            },
            UsedTicketsPoint {
                period: "d2".to_string(),
                used_pct: 0.0,
                tickets_total: 1000,
                tickets_used: 0,
            },
        ];
        let parts = used_tickets_summary(&rows).unwrap();
        // Unweighted mean of the period percentages, as the source reports.
        assert_eq!(parts[0].1, "50.00%");
        assert_eq!(parts[1].1, "1,010");
    }
}
