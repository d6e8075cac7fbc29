//! Option tables served by the backend for form pickers.

use serde::{Deserialize, Serialize};

/// Label returned for a day that is not in the loaded table.
pub const UNKNOWN_DAY_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekOption {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTypeOption {
    pub value: String,
    pub label: String,
}

/// Day-of-week and schedule-type labels, fetched once per store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionTables {
    pub days_of_week: Vec<DayOfWeekOption>,
    pub schedule_types: Vec<ScheduleTypeOption>,
}

impl OptionTables {
    /// Label for a day of week, or "Unknown".
    pub fn day_label(&self, day_of_week: u8) -> String {
        self.days_of_week
            .iter()
            .find(|d| d.value == day_of_week)
            .map(|d| d.label.clone())
            .unwrap_or_else(|| UNKNOWN_DAY_LABEL.to_string())
    }

    /// Label for a schedule type, or the raw value itself.
    pub fn schedule_type_label(&self, schedule_type: &str) -> String {
        self.schedule_types
            .iter()
            .find(|t| t.value == schedule_type)
            .map(|t| t.label.clone())
            .unwrap_or_else(|| schedule_type.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> OptionTables {
        OptionTables {
            days_of_week: vec![DayOfWeekOption {
                value: 0,
                label: "Monday".to_string(),
            }],
            schedule_types: vec![ScheduleTypeOption {
                value: "weekly".to_string(),
                label: "Every week".to_string(),
            }],
        }
    }

    #[test]
    fn test_day_label_lookup() {
        assert_eq!(tables().day_label(0), "Monday");
        assert_eq!(tables().day_label(4), "Unknown");
    }

    #[test]
    fn test_day_label_unknown_for_every_day_in_empty_table() {
        let empty = OptionTables::default();
        for day in 0..=u8::MAX {
            assert_eq!(empty.day_label(day), UNKNOWN_DAY_LABEL);
        }
    }

    #[test]
    fn test_schedule_type_label_falls_back_to_raw_value() {
        assert_eq!(tables().schedule_type_label("weekly"), "Every week");
        assert_eq!(tables().schedule_type_label("biweekly"), "biweekly");
    }
}
