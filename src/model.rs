use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::limits::{FOUR_WHEELER_MAX_SEATS, TWO_WHEELER_SEATS};

/// Unix milliseconds. Used for creation timestamps only.
pub type Ms = i64;

const MS_PER_DAY: Ms = 86_400_000;
const MS_PER_MINUTE: Ms = 60_000;

/// Wall-clock time of day with minute precision. No date component.
///
/// Ordering is chronological within a single day; there is no wraparound,
/// so 23:50 and 00:10 are 1420 minutes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ParseClockTimeError> {
        if hour > 23 {
            return Err(ParseClockTimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ParseClockTimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(&self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }

    /// Time of day (UTC) for a Unix millisecond timestamp.
    pub fn from_unix_ms(ms: Ms) -> Self {
        let minutes = ms.rem_euclid(MS_PER_DAY) / MS_PER_MINUTE;
        Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    /// Strict `HH:MM`, zero-padded, 24-hour clock.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(ParseClockTimeError::Malformed(s.to_string()));
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(ParseClockTimeError::Malformed(s.to_string()));
        }
        let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ParseClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseClockTimeError {
    Malformed(String),
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
}

impl fmt::Display for ParseClockTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseClockTimeError::Malformed(s) => write!(f, "expected HH:MM, got {s:?}"),
            ParseClockTimeError::HourOutOfRange(h) => write!(f, "hour {h} out of range 00-23"),
            ParseClockTimeError::MinuteOutOfRange(m) => {
                write!(f, "minute {m} out of range 00-59")
            }
        }
    }
}

impl std::error::Error for ParseClockTimeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    #[serde(rename = "Bike")]
    TwoWheeler,
    #[serde(rename = "Car")]
    FourWheeler,
}

impl VehicleKind {
    /// Seats a ride of this kind may offer.
    pub fn seat_range(&self) -> RangeInclusive<u32> {
        match self {
            VehicleKind::TwoWheeler => TWO_WHEELER_SEATS..=TWO_WHEELER_SEATS,
            VehicleKind::FourWheeler => 1..=FOUR_WHEELER_MAX_SEATS,
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleKind::TwoWheeler => f.write_str("two-wheeler"),
            VehicleKind::FourWheeler => f.write_str("four-wheeler"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideStatus {
    Open,
    Full,
}

/// A published ride. Only `vacant_seats` and `bookers` change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: Ulid,
    pub poster_id: String,
    pub vehicle_kind: VehicleKind,
    pub vehicle_tag: String,
    pub capacity: u32,
    pub vacant_seats: u32,
    pub departure: ClockTime,
    pub pickup_point: String,
    pub destination: String,
    /// Requesters holding a seat, in booking order.
    pub bookers: Vec<String>,
    pub created_at: Ms,
}

impl Ride {
    pub fn status(&self) -> RideStatus {
        if self.vacant_seats > 0 {
            RideStatus::Open
        } else {
            RideStatus::Full
        }
    }

    pub fn is_booked_by(&self, requester_id: &str) -> bool {
        self.bookers.iter().any(|b| b == requester_id)
    }
}

/// Submission for `Engine::publish_ride`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRide {
    pub poster_id: String,
    pub vehicle_kind: VehicleKind,
    pub vehicle_tag: String,
    pub capacity: u32,
    pub departure: ClockTime,
    pub pickup_point: String,
    pub destination: String,
}

/// Rides a requester posted and rides they hold a seat on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RideHistory {
    pub posted: Vec<Ride>,
    pub booked: Vec<Ride>,
}

/// State transitions. Mutations validate, build one event, then apply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RidePublished { ride: Ride },
    SeatBooked { ride_id: Ulid, requester_id: String },
}
