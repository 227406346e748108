//! Trip domain types.
//!
//! [`Trip`] is the record the trip API reports; [`NewTrip`] is the subset a
//! creation form submits. The server owns every field after creation; clients
//! re-fetch instead of mutating locally.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lifecycle::TripStatus;

/// Pickup times use the `datetime-local` wire shape, minute precision.
const PICKUP_TIME_MINUTES: &str = "%Y-%m-%dT%H:%M";
/// Servers may echo pickup times back with seconds attached.
const PICKUP_TIME_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Unique trip identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub Uuid);

impl TripId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for compact display.
    #[must_use]
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl std::fmt::Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Vehicle class requested for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    /// Courier bike.
    #[serde(rename = "bike")]
    Bike,
    /// Passenger car.
    #[serde(rename = "car")]
    Car,
    /// Panel van.
    #[serde(rename = "van")]
    Van,
    /// 1 ton truck.
    #[serde(rename = "truck_1")]
    Truck1,
    /// 1.5 ton truck.
    #[serde(rename = "truck_1.5")]
    Truck1p5,
    /// 2 ton truck.
    #[serde(rename = "truck_2")]
    Truck2,
    /// 4 ton truck.
    #[serde(rename = "truck_4")]
    Truck4,
}

impl VehicleType {
    /// Every vehicle class, in selection order.
    pub const ALL: [Self; 7] = [
        Self::Bike,
        Self::Car,
        Self::Van,
        Self::Truck1,
        Self::Truck1p5,
        Self::Truck2,
        Self::Truck4,
    ];

    /// Wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bike => "bike",
            Self::Car => "car",
            Self::Van => "van",
            Self::Truck1 => "truck_1",
            Self::Truck1p5 => "truck_1.5",
            Self::Truck2 => "truck_2",
            Self::Truck4 => "truck_4",
        }
    }

    /// Human-readable label for selection UIs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Bike => "Bike",
            Self::Car => "Car",
            Self::Van => "Van",
            Self::Truck1 => "1 ton Truck",
            Self::Truck1p5 => "1.5 ton Truck",
            Self::Truck2 => "2 ton Truck",
            Self::Truck4 => "4 ton Truck",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A haulage request as the trip API reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier, immutable.
    pub id: TripId,
    /// Optional display name assigned by the server.
    #[serde(default)]
    pub name: Option<String>,
    /// Current lifecycle stage. Server-authoritative.
    pub status: TripStatus,
    /// Quoted price, if bidding has produced one.
    #[serde(default)]
    pub bid: Option<String>,
    /// Floors involved in the load, when relevant.
    #[serde(default)]
    pub number_of_floors: Option<u32>,
    /// What is being hauled.
    pub load_description: String,
    /// Requested vehicle class.
    pub vehicle_type: VehicleType,
    /// Pickup address.
    pub pickup_location: String,
    /// Dropoff address.
    pub dropoff_location: String,
    /// Requested pickup time (local, no zone).
    #[serde(with = "pickup_time_format")]
    pub pickup_time: NaiveDateTime,
    /// Contact number at the dropoff. Withheld from UIs while unaccepted.
    pub dropoff_contact_number: String,
    /// Last server-side modification stamp.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl Trip {
    /// Drop-off contact number, or `None` while the trip is unaccepted.
    ///
    /// Contact details are withheld until a driver has claimed the trip.
    #[must_use]
    pub fn visible_contact(&self) -> Option<&str> {
        match self.status {
            TripStatus::Pending => None,
            TripStatus::Accepted | TripStatus::InProgress | TripStatus::Completed => {
                Some(&self.dropoff_contact_number)
            },
        }
    }

    /// Heading for list views. Falls back to a short id when the server
    /// provides no name.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Trip {}", self.id.short()),
        }
    }
}

/// Fields submitted to create a trip.
///
/// Serializes to exactly the creation payload the trip API expects; the new
/// trip starts `PENDING` server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrip {
    /// Pickup address.
    pub pickup_location: String,
    /// Dropoff address.
    pub dropoff_location: String,
    /// Requested pickup time (local, no zone).
    #[serde(with = "pickup_time_format")]
    pub pickup_time: NaiveDateTime,
    /// Contact number at the dropoff.
    pub dropoff_contact_number: String,
    /// What is being hauled.
    pub load_description: String,
    /// Requested vehicle class.
    pub vehicle_type: VehicleType,
}

/// Parse a pickup time in the `datetime-local` shape creation forms use.
///
/// Accepts minute precision (`2024-01-01T10:00`) and second precision.
///
/// # Errors
///
/// Returns the underlying parse error if the text matches neither shape.
pub fn parse_pickup_time(raw: &str) -> Result<NaiveDateTime, chrono::format::ParseError> {
    NaiveDateTime::parse_from_str(raw, PICKUP_TIME_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, PICKUP_TIME_MINUTES))
}

/// Serde shim for the `datetime-local` wire shape.
///
/// Always emits minute precision; accepts seconds on input.
mod pickup_time_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        time: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(super::PICKUP_TIME_MINUTES))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_pickup_time(&raw).map_err(D::Error::custom)
    }
}
