//! Raw filter form state and the option lists backing the multi-selects.
//!
//! The form keeps what the inputs hold (dates as strings); building a
//! `FilterCriteria` is where required-field validation happens, so an
//! incomplete form never reaches the network layer.

use api::filters::{self, FilterCriteria, Granularity};
use api::RefreshError;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterForm {
    pub start_date: String,
    pub end_date: String,
    pub granularity: Granularity,
    pub cinema_ids: Vec<u32>,
    pub genre_ids: Vec<u32>,
    pub movie_ids: Vec<u32>,
    pub showtime_ids: Vec<u32>,
    pub weekday_ids: Vec<u32>,
}

impl Default for FilterForm {
    fn default() -> Self {
        Self::default_window()
    }
}

impl FilterForm {
    /// Pre-filled 30-day trailing window, the state the page first renders
    /// with and the one the clear action restores.
    pub fn default_window() -> Self {
        let window = FilterCriteria::default_window();
        Self {
            start_date: filters::format_date(window.start_date),
            end_date: filters::format_date(window.end_date),
            granularity: Granularity::Day,
            cinema_ids: Vec::new(),
            genre_ids: Vec::new(),
            movie_ids: Vec::new(),
            showtime_ids: Vec::new(),
            weekday_ids: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default_window();
    }

    /// Validate and convert into wire criteria. Either date missing or
    /// unparseable is a `Validation` error and blocks the request.
    pub fn criteria(&self) -> Result<FilterCriteria, RefreshError> {
        if self.start_date.trim().is_empty() || self.end_date.trim().is_empty() {
            return Err(RefreshError::Validation(
                "Start and end dates are required".to_string(),
            ));
        }
        let start_date = filters::parse_date(self.start_date.trim()).ok_or_else(|| {
            RefreshError::Validation("The start date is not a valid date".to_string())
        })?;
        let end_date = filters::parse_date(self.end_date.trim()).ok_or_else(|| {
            RefreshError::Validation("The end date is not a valid date".to_string())
        })?;

        let criteria = FilterCriteria {
            start_date,
            end_date,
            granularity: self.granularity,
            cinema_ids: self.cinema_ids.clone(),
            genre_ids: self.genre_ids.clone(),
            movie_ids: self.movie_ids.clone(),
            showtime_ids: self.showtime_ids.clone(),
            weekday_ids: self.weekday_ids.clone(),
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Toggle an id inside a checkbox-group selection.
pub fn toggle_id(ids: &mut Vec<u32>, id: u32) {
    if let Some(position) = ids.iter().position(|existing| *existing == id) {
        ids.remove(position);
    } else {
        ids.push(id);
    }
}

/// Option lists for the filter groups. The weekday list is fixed; the rest
/// come from whatever catalogue the hosting shell provides (an empty list
/// hides that group).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub cinemas: Vec<(u32, String)>,
    pub genres: Vec<(u32, String)>,
    pub movies: Vec<(u32, String)>,
    pub showtimes: Vec<(u32, String)>,
    pub weekdays: Vec<(u32, String)>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            cinemas: Vec::new(),
            genres: Vec::new(),
            movies: Vec::new(),
            showtimes: Vec::new(),
            weekdays: vec![
                (1, "Monday".to_string()),
                (2, "Tuesday".to_string()),
                (3, "Wednesday".to_string()),
                (4, "Thursday".to_string()),
                (5, "Friday".to_string()),
                (6, "Saturday".to_string()),
                (7, "Sunday".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dates_block_the_request() {
        let mut form = FilterForm::default_window();
        form.start_date.clear();
        assert!(matches!(
            form.criteria(),
            Err(RefreshError::Validation(_))
        ));

        let mut form = FilterForm::default_window();
        form.end_date = "   ".to_string();
        assert!(matches!(
            form.criteria(),
            Err(RefreshError::Validation(_))
        ));
    }

    #[test]
    fn garbage_dates_are_validation_errors() {
        let mut form = FilterForm::default_window();
        form.end_date = "not-a-date".to_string();
        assert!(matches!(
            form.criteria(),
            Err(RefreshError::Validation(_))
        ));
    }

    #[test]
    fn default_window_produces_valid_criteria() {
        let criteria = FilterForm::default_window().criteria().unwrap();
        assert_eq!(criteria.granularity, Granularity::Day);
        assert!(criteria.start_date < criteria.end_date);
    }

    #[test]
    fn clear_resets_selections_and_window() {
        let mut form = FilterForm::default_window();
        form.cinema_ids = vec![1, 2];
        form.granularity = Granularity::Month;
        form.start_date = "2020-01-01".to_string();
        form.clear();
        assert!(form.cinema_ids.is_empty());
        assert_eq!(form.granularity, Granularity::Day);
        assert_eq!(form, FilterForm::default_window());
    }

    #[test]
    fn toggle_id_adds_then_removes() {
        let mut ids = Vec::new();
        toggle_id(&mut ids, 3);
        assert_eq!(ids, vec![3]);
        toggle_id(&mut ids, 5);
        toggle_id(&mut ids, 3);
        assert_eq!(ids, vec![5]);
    }
}
