use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::customer::CustomerId;
use crate::service::ServiceId;

/// Unique identifier for a booking, wrapping a UUID v7.
///
/// The high 48 bits are the creation timestamp in milliseconds and the
/// remaining 74 variable bits are random, so ids sort by creation time and
/// concurrent creations do not need a shared counter. Collisions are treated
/// as negligible and are not checked beyond the primary key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    /// Create a new BookingId using UUID v7 (time-sortable, random tail).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a BookingId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Symbols used in confirmation codes. 0/O, 1/I and L are left out so codes
/// survive being read aloud or copied by hand.
const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKMNPQRSTUVWXYZ";

/// Characters per half of a confirmation code (`XXXX-XXXX`).
const CODE_HALF_LEN: usize = 4;

/// Short, human-typable code handed to the customer after booking.
///
/// Generated independently of the [`BookingId`]; it is a convenience handle,
/// not a key. 8 symbols from a 31-symbol alphabet give roughly 39.6 bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmationCode(pub String);

impl ConfirmationCode {
    /// Generate a fresh random code such as `K7QM-3XRA`.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut code = String::with_capacity(CODE_HALF_LEN * 2 + 1);
        for i in 0..CODE_HALF_LEN * 2 {
            if i == CODE_HALF_LEN {
                code.push('-');
            }
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            code.push(CODE_ALPHABET[idx] as char);
        }
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Booking lifecycle states.
///
/// - Pending: created by the booking workflow, awaiting operator confirmation
/// - Confirmed: accepted by the operator
/// - InProgress: the wash is underway
/// - Completed: finished (terminal)
/// - Cancelled: withdrawn before completion (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    /// Whether no further transitions are allowed from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::InProgress => write!(f, "in_progress"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "in_progress" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("invalid booking status: '{other}'")),
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

/// Size class of a vehicle, used to scale the service base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Compact,
    Standard,
    Suv,
    Truck,
    Van,
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleClass::Compact => write!(f, "compact"),
            VehicleClass::Standard => write!(f, "standard"),
            VehicleClass::Suv => write!(f, "suv"),
            VehicleClass::Truck => write!(f, "truck"),
            VehicleClass::Van => write!(f, "van"),
        }
    }
}

impl FromStr for VehicleClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(VehicleClass::Compact),
            "standard" => Ok(VehicleClass::Standard),
            "suv" => Ok(VehicleClass::Suv),
            "truck" => Ok(VehicleClass::Truck),
            "van" => Ok(VehicleClass::Van),
            other => Err(format!("invalid vehicle class: '{other}'")),
        }
    }
}

impl Default for VehicleClass {
    fn default() -> Self {
        VehicleClass::Standard
    }
}

/// Description of the vehicle to be washed, as submitted with the booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub year: u16,
    pub color: String,
    pub license_plate: String,
    #[serde(default)]
    pub vehicle_class: VehicleClass,
}

/// Where the wash takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Mobile service: a crew drives to the customer's address.
    Mobile {
        address: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    /// The customer brings the vehicle to one of the wash sites.
    InStore { site: String },
}

impl Location {
    pub fn is_mobile(&self) -> bool {
        matches!(self, Location::Mobile { .. })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Mobile { address, .. } => write!(f, "mobile: {address}"),
            Location::InStore { site } => write!(f, "in store: {site}"),
        }
    }
}

/// A scheduled wash.
///
/// The price is fixed from the pricing quote at creation time and no
/// lifecycle operation changes it. Bookings are never deleted, only moved
/// through [`BookingStatus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_id: CustomerId,
    pub service_id: ServiceId,
    pub vehicle: VehicleInfo,
    pub location: Location,
    pub scheduled_at: DateTime<Utc>,
    /// Service duration at the time of booking.
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Last calendar year a booking window may reach. Stored slot keys are
/// fixed-width only for four-digit years.
pub const MAX_BOOKING_YEAR: i32 = 9999;

/// End of a window of `duration_minutes` starting at `start`.
///
/// `None` when the window starts before year 0, overflows, or ends after
/// [`MAX_BOOKING_YEAR`].
pub fn window_end(start: DateTime<Utc>, duration_minutes: u32) -> Option<DateTime<Utc>> {
    if start.year() < 0 {
        return None;
    }
    let end = start.checked_add_signed(Duration::minutes(i64::from(duration_minutes)))?;
    (end.year() <= MAX_BOOKING_YEAR).then_some(end)
}

impl Booking {
    /// End of the window this booking occupies, if it is representable.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        window_end(self.scheduled_at, self.duration_minutes)
    }
}

/// Request to book a service. Everything except `notes` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: CustomerId,
    pub service_id: ServiceId,
    pub vehicle: VehicleInfo,
    pub location: Location,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Result of a successful booking.
///
/// `estimated_price` duplicates `booking.price`; callers rely on both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub estimated_price: Decimal,
    pub confirmation_code: ConfirmationCode,
}
