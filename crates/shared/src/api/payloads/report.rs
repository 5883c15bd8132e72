use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{api::error::ValidationError, model::Category, report::ReportFilter};

/// Raw query string of the report endpoint. Everything arrives as text so
/// malformed values can be reported per parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub min_weight: Option<String>,
    pub max_weight: Option<String>,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `None` for absent and blank parameters
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(errors: &mut ValidationError, name: &str, value: &Option<String>) -> Option<NaiveDate> {
    let value = present(value)?;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("{name} must be a date in YYYY-MM-DD format, got \"{value}\""));
            None
        },
    }
}

fn parse_weight(errors: &mut ValidationError, name: &str, value: &Option<String>) -> Option<f64> {
    let value = present(value)?;
    match value.parse::<f64>() {
        Ok(weight) if weight.is_finite() => Some(weight),
        _ => {
            errors.push(format!("{name} must be a number, got \"{value}\""));
            None
        },
    }
}

fn parse_category(errors: &mut ValidationError, value: &Option<String>) -> Option<Category> {
    let value = present(value)?;
    if value.eq_ignore_ascii_case("all") {
        return None;
    }
    match value.parse::<Category>() {
        Ok(category) => Some(category),
        Err(e) => {
            errors.push(e.to_string());
            None
        },
    }
}

impl TryFrom<ReportQuery> for ReportFilter {
    type Error = ValidationError;

    fn try_from(query: ReportQuery) -> Result<Self, Self::Error> {
        let mut errors = ValidationError::default();

        let filter = ReportFilter {
            start_date: parse_date(&mut errors, "startDate", &query.start_date),
            end_date: parse_date(&mut errors, "endDate", &query.end_date),
            category: parse_category(&mut errors, &query.category),
            min_weight: parse_weight(&mut errors, "minWeight", &query.min_weight),
            max_weight: parse_weight(&mut errors, "maxWeight", &query.max_weight),
        };

        errors.into_result().map(|_| filter)
    }
}
