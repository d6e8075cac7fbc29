// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Offline fixture provider.
//!
//! Demo data that lets a front end render without a backend. Only used when
//! the configuration selects [`DataSource::Fixtures`](crate::config::DataSource);
//! a failed request never falls back to it.

use crate::models::{
    Car, Conversation, DayOfWeekOption, Message, OptionTables, RecurringRide,
    RecurringRideStatus, Ride, RideHistoryEntry, RideRequest, RideRequestStatus, RideRole,
    RideStatus, ScheduleTypeOption, UserSummary,
};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Duration, Utc};

/// User id the demo data treats as "you".
pub const DEMO_USER_ID: i64 = 1;

const DAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const SCHEDULE_TYPES: [(&str, &str); 4] = [
    ("weekly", "Every week"),
    ("daily", "Every day"),
    ("weekdays", "Every weekday"),
    ("weekends", "Every weekend"),
];

/// Demo datasets, with timestamps relative to a fixed "now".
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    now: DateTime<Utc>,
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl FixtureProvider {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    fn offset(&self, delta: Duration) -> String {
        format_utc_rfc3339(self.now + delta)
    }

    fn person(id: i64, name: &str) -> UserSummary {
        UserSummary {
            id,
            name: name.to_string(),
            photo_url: None,
            phone: None,
        }
    }

    fn peer_name(peer_id: i64) -> &'static str {
        if peer_id == 2 {
            "John Doe"
        } else {
            "Jane Smith"
        }
    }

    fn car(id: i64, make: &str, model: &str, color: &str) -> Car {
        Car {
            id,
            owner_id: None,
            make: make.to_string(),
            model: model.to_string(),
            year: None,
            color: Some(color.to_string()),
            license_plate: String::new(),
            seats: 5,
            ac_available: None,
            photo_url: None,
        }
    }

    pub fn option_tables(&self) -> OptionTables {
        OptionTables {
            days_of_week: DAY_LABELS
                .iter()
                .zip(0u8..)
                .map(|(label, value)| DayOfWeekOption {
                    value,
                    label: label.to_string(),
                })
                .collect(),
            schedule_types: SCHEDULE_TYPES
                .iter()
                .map(|(value, label)| ScheduleTypeOption {
                    value: value.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    /// Open rides shown in search.
    pub fn open_rides(&self) -> Vec<Ride> {
        vec![
            Ride {
                id: 1,
                driver_id: 2,
                car_id: 1,
                start_location: "Stanford University".to_string(),
                end_location: "San Francisco".to_string(),
                start_time: self.offset(Duration::hours(2)),
                seats_available: 3,
                total_fare: 25.0,
                status: RideStatus::Active,
                created_at: Some(self.offset(Duration::zero())),
                driver: Some(Self::person(2, "John Doe")),
                car: Some(Self::car(1, "Tesla", "Model 3", "White")),
            },
            Ride {
                id: 2,
                driver_id: 3,
                car_id: 2,
                start_location: "Palo Alto".to_string(),
                end_location: "Mountain View".to_string(),
                start_time: self.offset(Duration::hours(4)),
                seats_available: 2,
                total_fare: 15.0,
                status: RideStatus::Active,
                created_at: Some(self.offset(Duration::zero())),
                driver: Some(Self::person(3, "Jane Smith")),
                car: Some(Self::car(2, "Honda", "Civic", "Blue")),
            },
        ]
    }

    /// Rides offered by the demo user.
    pub fn my_rides(&self) -> Vec<Ride> {
        vec![Ride {
            id: 101,
            driver_id: DEMO_USER_ID,
            car_id: 1,
            start_location: "Stanford University".to_string(),
            end_location: "San Francisco".to_string(),
            start_time: self.offset(Duration::days(1)),
            seats_available: 3,
            total_fare: 25.0,
            status: RideStatus::Active,
            created_at: Some(self.offset(Duration::zero())),
            driver: None,
            car: None,
        }]
    }

    pub fn ride_details(&self, ride_id: i64) -> Ride {
        let mut driver = Self::person(2, "John Doe");
        driver.phone = Some("+1234567890".to_string());
        let mut car = Self::car(1, "Tesla", "Model 3", "White");
        car.license_plate = "ABC123".to_string();

        Ride {
            id: ride_id,
            driver_id: 2,
            car_id: 1,
            start_location: "Stanford University".to_string(),
            end_location: "San Francisco".to_string(),
            start_time: self.offset(Duration::hours(2)),
            seats_available: 3,
            total_fare: 25.0,
            status: RideStatus::Active,
            created_at: Some(self.offset(Duration::zero())),
            driver: Some(driver),
            car: Some(car),
        }
    }

    pub fn my_requests(&self) -> Vec<RideRequest> {
        vec![RideRequest {
            id: 1,
            rider_id: DEMO_USER_ID,
            ride_id: 1,
            status: RideRequestStatus::Pending,
            message: Some("Hi, I would like to join your ride!".to_string()),
            requested_at: Some(self.offset(Duration::zero())),
            rider: None,
        }]
    }

    pub fn ride_history(&self) -> Vec<RideHistoryEntry> {
        vec![
            RideHistoryEntry {
                id: 1,
                user_id: DEMO_USER_ID,
                ride_id: 50,
                role: RideRole::Driver,
                joined_at: Some(self.offset(-Duration::days(7))),
                completed_at: Some(self.offset(-Duration::days(7) + Duration::hours(2))),
                rating_given: Some(5),
                rating_received: Some(4),
            },
            RideHistoryEntry {
                id: 2,
                user_id: DEMO_USER_ID,
                ride_id: 51,
                role: RideRole::Rider,
                joined_at: Some(self.offset(-Duration::days(3))),
                completed_at: Some(self.offset(-Duration::days(3) + Duration::hours(1))),
                rating_given: Some(4),
                rating_received: Some(5),
            },
        ]
    }

    /// Active recurring rides, optionally for one day only.
    pub fn recurring_rides(&self, day_of_week: Option<u8>) -> Vec<RecurringRide> {
        let rides = vec![
            self.recurring(1, 2, "Stanford University", "San Francisco", 0, "08:00"),
            self.recurring(2, 3, "Palo Alto", "Mountain View", 2, "17:30"),
        ];
        rides
            .into_iter()
            .filter(|r| day_of_week.map_or(true, |d| r.day_of_week == d))
            .collect()
    }

    pub fn my_recurring_rides(&self) -> Vec<RecurringRide> {
        vec![self.recurring(
            201,
            DEMO_USER_ID,
            "Menlo Park",
            "Sunnyvale",
            4,
            "07:45",
        )]
    }

    fn recurring(
        &self,
        id: i64,
        driver_id: i64,
        from: &str,
        to: &str,
        day_of_week: u8,
        start_time: &str,
    ) -> RecurringRide {
        RecurringRide {
            id,
            driver_id,
            car_id: 1,
            start_location: from.to_string(),
            end_location: to.to_string(),
            day_of_week,
            start_time: start_time.to_string(),
            seats_available: 3,
            total_fare: 12.0,
            schedule_type: "weekly".to_string(),
            status: RecurringRideStatus::Active,
            created_at: Some(self.offset(-Duration::days(14))),
            updated_at: Some(self.offset(-Duration::days(14))),
            driver: None,
            car: None,
        }
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        vec![
            Conversation {
                id: 1,
                user: Self::person(2, "John Doe"),
                last_message: Message {
                    id: 1,
                    sender_id: 2,
                    receiver_id: DEMO_USER_ID,
                    content: "Hey! Are you ready for the ride tomorrow?".to_string(),
                    ride_id: Some(1),
                    created_at: self.offset(-Duration::minutes(30)),
                    sender: None,
                    receiver: None,
                },
                unread_count: 2,
                ride_id: Some(1),
            },
            Conversation {
                id: 2,
                user: Self::person(3, "Jane Smith"),
                last_message: Message {
                    id: 2,
                    sender_id: DEMO_USER_ID,
                    receiver_id: 3,
                    content: "Thanks for the ride yesterday!".to_string(),
                    ride_id: Some(2),
                    created_at: self.offset(-Duration::hours(2)),
                    sender: None,
                    receiver: None,
                },
                unread_count: 0,
                ride_id: Some(2),
            },
        ]
    }

    /// A short back-and-forth with `peer_id`, oldest first.
    pub fn conversation_with(&self, peer_id: i64) -> Vec<Message> {
        let peer = Self::person(peer_id, Self::peer_name(peer_id));
        let me = Self::person(DEMO_USER_ID, "You");
        let lines = [
            (true, "Hi! I saw your ride request. What time should we meet?", 120),
            (false, "Great! How about 8:00 AM at the main entrance?", 90),
            (true, "Perfect! See you then. I'll be driving a white Tesla Model 3.", 60),
            (false, "Sounds good! Looking forward to it.", 30),
        ];

        lines
            .iter()
            .zip(1i64..)
            .map(|(&(from_peer, content, minutes_ago), id)| {
                let (sender, receiver_id) = if from_peer {
                    (peer.clone(), DEMO_USER_ID)
                } else {
                    (me.clone(), peer_id)
                };
                Message {
                    id,
                    sender_id: sender.id,
                    receiver_id,
                    content: content.to_string(),
                    ride_id: None,
                    created_at: self.offset(-Duration::minutes(minutes_ago)),
                    sender: Some(sender),
                    receiver: None,
                }
            })
            .collect()
    }
}
