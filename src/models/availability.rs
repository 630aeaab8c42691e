//! Availability slot model matching the backend availability resource.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Start of the sentinel window that marks an all-day slot.
pub const ALL_DAY_START: &str = "00:00";
/// End of the sentinel window that marks an all-day slot.
pub const ALL_DAY_END: &str = "23:59";

const TIME_FORMAT: &str = "%H:%M";

/// A persisted availability record for a professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub professional_id: String,
}

impl AvailabilitySlot {
    /// Whether the slot uses the all-day sentinel window.
    pub fn is_all_day(&self) -> bool {
        self.start_time == ALL_DAY_START && self.end_time == ALL_DAY_END
    }
}

/// Time window applied to every date of a create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityWindow {
    AllDay,
    Hours { start: NaiveTime, end: NaiveTime },
}

impl AvailabilityWindow {
    /// Parse an `HH:mm` pair into an hours window.
    pub fn hours(start: &str, end: &str) -> Result<Self, AppError> {
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        if end <= start {
            return Err(AppError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(AvailabilityWindow::Hours { start, end })
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, AvailabilityWindow::AllDay)
    }

    /// Wire representation of the window; all day leaves both times unset.
    fn time_fields(&self) -> (Option<String>, Option<String>) {
        match self {
            AvailabilityWindow::AllDay => (None, None),
            AvailabilityWindow::Hours { start, end } => (
                Some(start.format(TIME_FORMAT).to_string()),
                Some(end.format(TIME_FORMAT).to_string()),
            ),
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid time '{}', expected HH:mm", value)))
}

/// Request body for creating availability slots in bulk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityRequest {
    pub dates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub is_all_day: bool,
    pub professional_id: String,
}

impl CreateAvailabilityRequest {
    pub fn new(dates: &[NaiveDate], window: &AvailabilityWindow, professional_id: &str) -> Self {
        let (start_time, end_time) = window.time_fields();
        Self {
            dates: dates.iter().map(|d| d.to_string()).collect(),
            start_time,
            end_time,
            is_all_day: window.is_all_day(),
            professional_id: professional_id.to_string(),
        }
    }
}

/// Request body for deleting several slots at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAvailabilityRequest {
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_all_day_request_omits_times() {
        let req = CreateAvailabilityRequest::new(
            &[day("2024-03-01"), day("2024-03-02")],
            &AvailabilityWindow::AllDay,
            "pro-1",
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["dates"], serde_json::json!(["2024-03-01", "2024-03-02"]));
        assert_eq!(json["isAllDay"], true);
        assert_eq!(json["professionalId"], "pro-1");
        assert!(json.get("startTime").is_none());
        assert!(json.get("endTime").is_none());
    }

    #[test]
    fn test_hours_request_formats_times() {
        let window = AvailabilityWindow::hours("09:00", "17:30").unwrap();
        let req = CreateAvailabilityRequest::new(&[day("2024-03-01")], &window, "pro-1");
        assert_eq!(req.start_time.as_deref(), Some("09:00"));
        assert_eq!(req.end_time.as_deref(), Some("17:30"));
        assert!(!req.is_all_day);
    }

    #[test]
    fn test_hours_rejects_inverted_window() {
        let err = AvailabilityWindow::hours("18:00", "09:00").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_hours_rejects_garbage() {
        assert!(AvailabilityWindow::hours("nine", "17:00").is_err());
    }

    #[test]
    fn test_slot_deserializes_and_detects_all_day() {
        let slot: AvailabilitySlot = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "date": "2024-03-01",
            "startTime": "00:00",
            "endTime": "23:59",
            "professionalId": "pro-1"
        }))
        .unwrap();
        assert_eq!(slot.date, day("2024-03-01"));
        assert!(slot.is_all_day());
    }
}
