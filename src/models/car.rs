//! Car model.

use serde::{Deserialize, Serialize};

/// A driver's car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    #[serde(default)]
    pub license_plate: String,
    /// Passenger seat capacity
    #[serde(default)]
    pub seats: u32,
    pub ac_available: Option<bool>,
    pub photo_url: Option<String>,
}

impl Car {
    /// Short label for pickers, e.g. "Honda Civic (5 seats)".
    pub fn label(&self) -> String {
        format!("{} {} ({} seats)", self.make, self.model, self.seats)
    }
}

/// New car form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub license_plate: String,
    pub seats: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Partial car update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CarPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}
