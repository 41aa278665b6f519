//! Metric series records as the backend emits them.
//!
//! Each category has its own row shape; the `Periodo` label plus one primary
//! value plus auxiliary totals. The backend omits null fields, so every
//! numeric column defaults to zero.

use serde::{Deserialize, Serialize};

/// One revenue bucket: total income and tickets sold for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    #[serde(rename = "Periodo")]
    pub period: String,
    #[serde(rename = "Ingresos", default)]
    pub revenue: f64,
    #[serde(rename = "BoletosVendidos", default)]
    pub tickets_sold: u64,
}

/// One occupancy bucket: percentage of seats filled plus the raw totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyPoint {
    #[serde(rename = "Periodo")]
    pub period: String,
    #[serde(rename = "PorcentajeOcupacion", default)]
    pub occupancy_pct: f64,
    #[serde(rename = "CapacidadTotal", default)]
    pub capacity: u64,
    #[serde(rename = "BoletosVendidos", default)]
    pub tickets_sold: u64,
}

/// One used-tickets bucket: share of issued tickets actually redeemed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedTicketsPoint {
    #[serde(rename = "Periodo")]
    pub period: String,
    #[serde(rename = "PorcentajeUsados", default)]
    pub used_pct: f64,
    #[serde(rename = "BoletosTotales", default)]
    pub tickets_total: u64,
    #[serde(rename = "BoletosUsados", default)]
    pub tickets_used: u64,
}

/// One cancellations bucket: share of sold tickets later cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationPoint {
    #[serde(rename = "Periodo")]
    pub period: String,
    #[serde(rename = "PorcentajeCancelaciones", default)]
    pub cancel_pct: f64,
    #[serde(rename = "BoletosVendidos", default)]
    pub tickets_sold: u64,
    #[serde(rename = "BoletosCancelados", default)]
    pub tickets_cancelled: u64,
}

/// Top-level payload of `POST /admin/dashboard/data`. Either an `error`
/// envelope or any subset of the four metric arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "ingresos", default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Vec<RevenuePoint>>,
    #[serde(rename = "ocupacion", default, skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<Vec<OccupancyPoint>>,
    #[serde(
        rename = "boletos_usados",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub used_tickets: Option<Vec<UsedTicketsPoint>>,
    #[serde(
        rename = "cancelaciones",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cancellations: Option<Vec<CancellationPoint>>,
}

/// How a transport-successful payload should be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseKind {
    /// The backend reported a semantic error; prior chart state stays put.
    Business(String),
    /// No recognized metric key present at all.
    Empty,
    /// At least one metric key present (its series may still be empty).
    Data,
}

impl MetricsResponse {
    pub fn classify(&self) -> ResponseKind {
        if let Some(message) = &self.error {
            return ResponseKind::Business(message.clone());
        }
        let recognized = self.revenue.is_some()
            || self.occupancy.is_some()
            || self.used_tickets.is_some()
            || self.cancellations.is_some();
        if recognized {
            ResponseKind::Data
        } else {
            ResponseKind::Empty
        }
    }

    pub fn revenue_series(&self) -> &[RevenuePoint] {
        self.revenue.as_deref().unwrap_or(&[])
    }

    pub fn occupancy_series(&self) -> &[OccupancyPoint] {
        self.occupancy.as_deref().unwrap_or(&[])
    }

    pub fn used_tickets_series(&self) -> &[UsedTicketsPoint] {
        self.used_tickets.as_deref().unwrap_or(&[])
    }

    pub fn cancellations_series(&self) -> &[CancellationPoint] {
        self.cancellations.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_shaped_payload() {
        let raw = serde_json::json!({
            "ingresos": [
                {"Periodo": "2024-01", "Ingresos": 100.0, "BoletosVendidos": 5},
                {"Periodo": "2024-02", "Ingresos": 200.0, "BoletosVendidos": 10}
            ],
            "ocupacion": [
                {"Periodo": "2024-01", "PorcentajeOcupacion": 62.5,
                 "CapacidadTotal": 400, "BoletosVendidos": 250}
            ]
        });
        let resp: MetricsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.classify(), ResponseKind::Data);
        assert_eq!(resp.revenue_series().len(), 2);
        assert_eq!(resp.revenue_series()[1].revenue, 200.0);
        assert_eq!(resp.occupancy_series()[0].capacity, 400);
        assert!(resp.used_tickets_series().is_empty());
        assert!(resp.cancellations_series().is_empty());
    }

    #[test]
    fn omitted_numeric_fields_default_to_zero() {
        let raw = serde_json::json!({"cancelaciones": [{"Periodo": "2024-01"}]});
        let resp: MetricsResponse = serde_json::from_value(raw).unwrap();
        let row = &resp.cancellations_series()[0];
        assert_eq!(row.cancel_pct, 0.0);
        assert_eq!(row.tickets_cancelled, 0);
    }

    #[test]
    fn error_envelope_classifies_as_business() {
        let resp: MetricsResponse =
            serde_json::from_value(serde_json::json!({"error": "Acceso denegado"})).unwrap();
        assert_eq!(
            resp.classify(),
            ResponseKind::Business("Acceso denegado".to_string())
        );
    }

    #[test]
    fn bare_object_classifies_as_empty() {
        let resp: MetricsResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(resp.classify(), ResponseKind::Empty);
    }

    #[test]
    fn present_but_empty_series_is_still_data() {
        let resp: MetricsResponse =
            serde_json::from_value(serde_json::json!({"ingresos": []})).unwrap();
        assert_eq!(resp.classify(), ResponseKind::Data);
        assert!(resp.revenue_series().is_empty());
    }
}
