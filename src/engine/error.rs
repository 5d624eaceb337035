use ulid::Ulid;

use crate::model::{ClockTime, VehicleKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // publish_ride
    DuplicateVehicle(String),
    DuplicatePosting {
        poster_id: String,
        departure: ClockTime,
    },
    BookerTimeConflict {
        poster_id: String,
        /// The ride the poster is already booked on.
        booked_ride: Ulid,
    },
    InvalidCapacity {
        kind: VehicleKind,
        capacity: u32,
    },

    // book_seat
    RideNotFound(Ulid),
    SelfBookingForbidden(Ulid),
    AlreadyBooked(Ulid),
    RideFull(Ulid),
    ScheduleConflict {
        requester_id: String,
        /// The ride at the same departure the requester already holds.
        conflicting_ride: Ulid,
    },

    InvalidInput(&'static str),
    LimitExceeded(&'static str),
    IdSpaceExhausted,
}

impl EngineError {
    /// Short stable label, used as the `reason` metric label.
    pub fn label(&self) -> &'static str {
        match self {
            EngineError::DuplicateVehicle(_) => "duplicate_vehicle",
            EngineError::DuplicatePosting { .. } => "duplicate_posting",
            EngineError::BookerTimeConflict { .. } => "booker_time_conflict",
            EngineError::InvalidCapacity { .. } => "invalid_capacity",
            EngineError::RideNotFound(_) => "ride_not_found",
            EngineError::SelfBookingForbidden(_) => "self_booking_forbidden",
            EngineError::AlreadyBooked(_) => "already_booked",
            EngineError::RideFull(_) => "ride_full",
            EngineError::ScheduleConflict { .. } => "schedule_conflict",
            EngineError::InvalidInput(_) => "invalid_input",
            EngineError::LimitExceeded(_) => "limit_exceeded",
            EngineError::IdSpaceExhausted => "id_space_exhausted",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::DuplicateVehicle(tag) => {
                write!(f, "vehicle {tag} already used by another ride")
            }
            EngineError::DuplicatePosting { poster_id, departure } => {
                write!(f, "{poster_id} already has a ride at {departure}")
            }
            EngineError::BookerTimeConflict { poster_id, booked_ride } => write!(
                f,
                "{poster_id} has a booked ride ({booked_ride}) within 60 minutes of this time"
            ),
            EngineError::InvalidCapacity { kind, capacity } => {
                let range = kind.seat_range();
                write!(
                    f,
                    "{kind} cannot offer {capacity} seats (allowed {}-{})",
                    range.start(),
                    range.end()
                )
            }
            EngineError::RideNotFound(id) => write!(f, "ride not found: {id}"),
            EngineError::SelfBookingForbidden(id) => {
                write!(f, "cannot book your own ride: {id}")
            }
            EngineError::AlreadyBooked(id) => write!(f, "already booked on ride: {id}"),
            EngineError::RideFull(id) => write!(f, "no vacant seats on ride: {id}"),
            EngineError::ScheduleConflict { requester_id, conflicting_ride } => write!(
                f,
                "{requester_id} already has a ride at this time: {conflicting_ride}"
            ),
            EngineError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            EngineError::IdSpaceExhausted => write!(f, "ride id space exhausted"),
        }
    }
}

impl std::error::Error for EngineError {}
