// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local form validation, run before any request leaves the client.

use crate::error::{AppError, Result};
use crate::models::{
    Car, NewRecurringRide, NewRide, RecurringRidePatch, RecurringRideStatus, RidePatch,
};
use crate::time_utils::parse_timestamp;
use chrono::NaiveTime;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Accepts `HH:MM` or `HH:MM:SS` (24-hour clock).
pub fn validate_start_time(value: &str) -> std::result::Result<(), ValidationError> {
    let ok = NaiveTime::parse_from_str(value, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok();
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("start_time")
            .with_message(Cow::Borrowed("Start time must be in HH:MM format")))
    }
}

/// Check a recurring-ride creation form.
///
/// When the selected car is known, the offered seats must also fit in it.
pub fn check_new_recurring_ride(data: &NewRecurringRide, car: Option<&Car>) -> Result<()> {
    if data.start_location.trim().is_empty() || data.end_location.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter both start and end locations".to_string(),
        ));
    }
    data.validate()?;
    if !data.total_fare.is_finite() {
        return Err(AppError::Validation("Fare must be a number".to_string()));
    }
    if let Some(car) = car {
        check_seat_capacity(data.seats_available, car)?;
    }
    Ok(())
}

/// Check a one-off ride creation form.
pub fn check_new_ride(data: &NewRide, car: Option<&Car>) -> Result<()> {
    if data.start_location.trim().is_empty() || data.end_location.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter both start and end locations".to_string(),
        ));
    }
    data.validate()?;
    if !data.total_fare.is_finite() {
        return Err(AppError::Validation("Fare must be a number".to_string()));
    }
    if parse_timestamp(&data.start_time).is_none() {
        return Err(AppError::Validation(
            "Start time must be a date and time".to_string(),
        ));
    }
    if let Some(car) = car {
        check_seat_capacity(data.seats_available, car)?;
    }
    Ok(())
}

/// Check the fields a recurring-ride update sets. Unset fields are not
/// looked at.
pub fn check_recurring_ride_patch(patch: &RecurringRidePatch, car: Option<&Car>) -> Result<()> {
    let blank = |field: &Option<String>| field.as_deref().is_some_and(|v| v.trim().is_empty());
    if blank(&patch.start_location) || blank(&patch.end_location) {
        return Err(AppError::Validation(
            "Please enter both start and end locations".to_string(),
        ));
    }
    patch.validate()?;
    if patch.total_fare.is_some_and(|fare| !fare.is_finite()) {
        return Err(AppError::Validation("Fare must be a number".to_string()));
    }
    if let (Some(seats), Some(car)) = (patch.seats_available, car) {
        check_seat_capacity(seats, car)?;
    }
    Ok(())
}

/// Check the fields a ride update sets.
pub fn check_ride_patch(patch: &RidePatch, car: Option<&Car>) -> Result<()> {
    patch.validate()?;
    if let Some(start_time) = &patch.start_time {
        if parse_timestamp(start_time).is_none() {
            return Err(AppError::Validation(
                "Start time must be a date and time".to_string(),
            ));
        }
    }
    if let (Some(seats), Some(car)) = (patch.seats_available, car) {
        check_seat_capacity(seats, car)?;
    }
    Ok(())
}

/// Seats offered on a ride may not exceed the car's capacity.
pub fn check_seat_capacity(seats: u32, car: &Car) -> Result<()> {
    if car.seats > 0 && seats > car.seats {
        return Err(AppError::Validation(format!(
            "{} only has {} seats",
            car.label(),
            car.seats
        )));
    }
    Ok(())
}

/// Reject status changes the driver is not allowed to make.
pub fn check_status_transition(from: RecurringRideStatus, to: RecurringRideStatus) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewRecurringRide {
        NewRecurringRide {
            car_id: 1,
            start_location: "A".to_string(),
            end_location: "B".to_string(),
            day_of_week: 0,
            start_time: "08:00".to_string(),
            seats_available: 2,
            total_fare: 10.0,
            schedule_type: None,
        }
    }

    fn car(seats: u32) -> Car {
        Car {
            id: 1,
            owner_id: Some(1),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: None,
            color: None,
            license_plate: "ABC123".to_string(),
            seats,
            ac_available: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(check_new_recurring_ride(&form(), Some(&car(4))).is_ok());
    }

    #[test]
    fn test_blank_location_rejected() {
        let data = NewRecurringRide {
            end_location: "   ".to_string(),
            ..form()
        };
        let err = check_new_recurring_ride(&data, None).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("Please enter both start and end locations".to_string())
        );
    }

    #[test]
    fn test_day_of_week_out_of_range() {
        let data = NewRecurringRide {
            day_of_week: 7,
            ..form()
        };
        assert!(matches!(
            check_new_recurring_ride(&data, None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_start_time_format() {
        assert!(validate_start_time("08:00").is_ok());
        assert!(validate_start_time("23:59:00").is_ok());
        assert!(validate_start_time("8am").is_err());
        assert!(validate_start_time("24:00").is_err());
    }

    #[test]
    fn test_negative_fare_and_zero_seats_rejected() {
        let data = NewRecurringRide {
            total_fare: -1.0,
            ..form()
        };
        assert!(check_new_recurring_ride(&data, None).is_err());

        let data = NewRecurringRide {
            seats_available: 0,
            ..form()
        };
        assert!(check_new_recurring_ride(&data, None).is_err());
    }

    #[test]
    fn test_seats_exceeding_car_capacity_rejected() {
        let data = NewRecurringRide {
            seats_available: 5,
            ..form()
        };
        let err = check_new_recurring_ride(&data, Some(&car(4))).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("Honda Civic (4 seats) only has 4 seats".to_string())
        );
    }

    #[test]
    fn test_missing_car_rejected() {
        let data = NewRecurringRide {
            car_id: 0,
            ..form()
        };
        assert_eq!(
            check_new_recurring_ride(&data, None).unwrap_err(),
            AppError::Validation("Please select a car for your ride".to_string())
        );
    }

    #[test]
    fn test_new_ride_requires_timestamp() {
        let ride = NewRide {
            car_id: 1,
            start_location: "Palo Alto".to_string(),
            end_location: "Mountain View".to_string(),
            start_time: "08:00".to_string(),
            seats_available: 2,
            total_fare: 15.0,
        };
        assert!(check_new_ride(&ride, None).is_err());

        let ride = NewRide {
            start_time: "2025-03-10T08:00:00Z".to_string(),
            ..ride
        };
        assert!(check_new_ride(&ride, Some(&car(5))).is_ok());
    }

    #[test]
    fn test_recurring_patch_checks_only_set_fields() {
        assert!(check_recurring_ride_patch(&RecurringRidePatch::default(), None).is_ok());
        assert!(check_recurring_ride_patch(
            &RecurringRidePatch::status(RecurringRideStatus::Paused),
            None
        )
        .is_ok());

        let out_of_range = RecurringRidePatch {
            day_of_week: Some(9),
            total_fare: Some(-5.0),
            seats_available: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            check_recurring_ride_patch(&out_of_range, None),
            Err(AppError::Validation(_))
        ));

        let bad_time = RecurringRidePatch {
            start_time: Some("8am".to_string()),
            ..Default::default()
        };
        assert!(check_recurring_ride_patch(&bad_time, None).is_err());

        let blank = RecurringRidePatch {
            end_location: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(check_recurring_ride_patch(&blank, None).is_err());
    }

    #[test]
    fn test_patch_seats_checked_against_car() {
        let patch = RecurringRidePatch {
            seats_available: Some(6),
            ..Default::default()
        };
        assert!(check_recurring_ride_patch(&patch, None).is_ok());
        assert!(check_recurring_ride_patch(&patch, Some(&car(4))).is_err());

        let ride_patch = RidePatch {
            seats_available: Some(6),
            ..Default::default()
        };
        assert!(check_ride_patch(&ride_patch, Some(&car(4))).is_err());
        assert!(check_ride_patch(&ride_patch, Some(&car(7))).is_ok());
    }

    #[test]
    fn test_ride_patch_rejects_zero_seats_and_bad_time() {
        let zero = RidePatch {
            seats_available: Some(0),
            ..Default::default()
        };
        assert!(check_ride_patch(&zero, None).is_err());

        let time = RidePatch {
            start_time: Some("tomorrow".to_string()),
            ..Default::default()
        };
        assert!(check_ride_patch(&time, None).is_err());
    }

    #[test]
    fn test_cancelled_cannot_be_reactivated() {
        let err = check_status_transition(
            RecurringRideStatus::Cancelled,
            RecurringRideStatus::Active,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Cannot change recurring ride status from cancelled to active");
    }
}
