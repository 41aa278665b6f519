//! Filter criteria sent to the metrics endpoint.
//!
//! Field names follow the backend's wire contract (`fecha_inicio`,
//! `cine_ids`, ...); the Rust-side names stay descriptive. Criteria are
//! built fresh from form state on every refresh and never persisted.

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use crate::error::RefreshError;

time::serde::format_description!(ymd, Date, "[year]-[month]-[day]");

/// Aggregation bucket size for every metric series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    #[serde(rename = "dia")]
    Day,
    #[serde(rename = "semana")]
    Week,
    #[serde(rename = "mes")]
    Month,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    pub fn wire_value(self) -> &'static str {
        match self {
            Granularity::Day => "dia",
            Granularity::Week => "semana",
            Granularity::Month => "mes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Day => "Day",
            Granularity::Week => "Week",
            Granularity::Month => "Month",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "dia" => Some(Granularity::Day),
            "semana" => Some(Granularity::Week),
            "mes" => Some(Granularity::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "fecha_inicio", with = "ymd")]
    pub start_date: Date,
    #[serde(rename = "fecha_fin", with = "ymd")]
    pub end_date: Date,
    #[serde(rename = "agrupacion")]
    pub granularity: Granularity,
    #[serde(rename = "cine_ids", default, skip_serializing_if = "Vec::is_empty")]
    pub cinema_ids: Vec<u32>,
    #[serde(rename = "genero_ids", default, skip_serializing_if = "Vec::is_empty")]
    pub genre_ids: Vec<u32>,
    #[serde(rename = "pelicula_ids", default, skip_serializing_if = "Vec::is_empty")]
    pub movie_ids: Vec<u32>,
    #[serde(rename = "funcion_ids", default, skip_serializing_if = "Vec::is_empty")]
    pub showtime_ids: Vec<u32>,
    #[serde(rename = "dias_semana", default, skip_serializing_if = "Vec::is_empty")]
    pub weekday_ids: Vec<u32>,
}

impl FilterCriteria {
    /// A 30-day trailing window ending today, day granularity, no id filters.
    /// This is the state the clear-filters action restores.
    pub fn default_window() -> Self {
        let end_date = today();
        let start_date = end_date - Duration::days(30);
        Self {
            start_date,
            end_date,
            granularity: Granularity::Day,
            cinema_ids: Vec::new(),
            genre_ids: Vec::new(),
            movie_ids: Vec::new(),
            showtime_ids: Vec::new(),
            weekday_ids: Vec::new(),
        }
    }

    /// Rejects a reversed date range. Missing dates are caught earlier, while
    /// the form state is still raw strings.
    pub fn validate(&self) -> Result<(), RefreshError> {
        if self.start_date > self.end_date {
            return Err(RefreshError::Validation(
                "The start date must not be after the end date".to_string(),
            ));
        }
        Ok(())
    }

    /// Query-string form used by the server-rendered export routes. List
    /// fields use the repeated `name[]=value` convention the backend expects.
    pub fn query_string(&self) -> String {
        let mut pairs: Vec<String> = vec![
            format!("fecha_inicio={}", format_date(self.start_date)),
            format!("fecha_fin={}", format_date(self.end_date)),
            format!("agrupacion={}", self.granularity.wire_value()),
        ];
        push_list(&mut pairs, "cine_ids", &self.cinema_ids);
        push_list(&mut pairs, "genero_ids", &self.genre_ids);
        push_list(&mut pairs, "pelicula_ids", &self.movie_ids);
        push_list(&mut pairs, "funcion_ids", &self.showtime_ids);
        push_list(&mut pairs, "dias_semana", &self.weekday_ids);
        pairs.join("&")
    }
}

/// Parse a date in the `YYYY-MM-DD` form the date inputs produce.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, &format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

fn push_list(pairs: &mut Vec<String>, key: &str, ids: &[u32]) {
    for id in ids {
        // %5B%5D is the encoded `[]` suffix.
        pairs.push(format!("{key}%5B%5D={id}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn criteria() -> FilterCriteria {
        FilterCriteria {
            start_date: date!(2024 - 01 - 01),
            end_date: date!(2024 - 01 - 31),
            granularity: Granularity::Week,
            cinema_ids: vec![1, 3],
            genre_ids: Vec::new(),
            movie_ids: vec![7],
            showtime_ids: Vec::new(),
            weekday_ids: vec![6, 7],
        }
    }

    #[test]
    fn serializes_to_backend_body_keys() {
        let body = serde_json::to_value(criteria()).unwrap();
        assert_eq!(body["fecha_inicio"], "2024-01-01");
        assert_eq!(body["fecha_fin"], "2024-01-31");
        assert_eq!(body["agrupacion"], "semana");
        assert_eq!(body["cine_ids"], serde_json::json!([1, 3]));
        assert_eq!(body["pelicula_ids"], serde_json::json!([7]));
        // Empty lists are omitted entirely, matching the form serializer.
        assert!(body.get("genero_ids").is_none());
        assert!(body.get("funcion_ids").is_none());
    }

    #[test]
    fn query_string_uses_repeated_bracket_keys() {
        let qs = criteria().query_string();
        assert!(qs.starts_with("fecha_inicio=2024-01-01&fecha_fin=2024-01-31&agrupacion=semana"));
        assert!(qs.contains("cine_ids%5B%5D=1"));
        assert!(qs.contains("cine_ids%5B%5D=3"));
        assert!(qs.contains("dias_semana%5B%5D=7"));
        assert!(!qs.contains("genero_ids"));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let mut c = criteria();
        c.end_date = date!(2023 - 12 - 01);
        assert!(matches!(c.validate(), Err(RefreshError::Validation(_))));
    }

    #[test]
    fn default_window_spans_thirty_days() {
        let c = FilterCriteria::default_window();
        assert_eq!(c.end_date - c.start_date, Duration::days(30));
        assert_eq!(c.granularity, Granularity::Day);
        assert!(c.cinema_ids.is_empty());
        c.validate().unwrap();
    }

    #[test]
    fn date_parsing_round_trips() {
        let parsed = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(parsed), "2024-02-29");
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("").is_none());
    }
}
