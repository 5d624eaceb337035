use ulid::Ulid;

use crate::limits::*;
use crate::model::*;

use super::EngineError;
use super::store::RideStore;

/// True if `a` lies inside the closed ±60-minute window around `b`.
/// Linear minute arithmetic; the window does not wrap past midnight.
pub(crate) fn within_window(a: ClockTime, b: ClockTime) -> bool {
    (a.minutes_since_midnight() - b.minutes_since_midnight()).abs() <= CONFLICT_WINDOW_MINUTES
}

fn require_text(value: &str, max_len: usize, field: &'static str, too_long: &'static str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidInput(field));
    }
    if value.len() > max_len {
        return Err(EngineError::LimitExceeded(too_long));
    }
    Ok(())
}

pub(crate) fn validate_requester(requester_id: &str) -> Result<(), EngineError> {
    require_text(
        requester_id,
        MAX_REQUESTER_ID_LEN,
        "requester id is empty",
        "requester id too long",
    )
}

/// Shape checks the form layer should already have done.
pub(crate) fn validate_new_ride(ride: &NewRide) -> Result<(), EngineError> {
    validate_requester(&ride.poster_id)?;
    require_text(
        &ride.vehicle_tag,
        MAX_VEHICLE_TAG_LEN,
        "vehicle tag is empty",
        "vehicle tag too long",
    )?;
    require_text(&ride.pickup_point, MAX_PLACE_LEN, "pickup point is empty", "pickup point too long")?;
    require_text(&ride.destination, MAX_PLACE_LEN, "destination is empty", "destination too long")?;
    if ride.capacity == 0 || !ride.vehicle_kind.seat_range().contains(&ride.capacity) {
        return Err(EngineError::InvalidCapacity {
            kind: ride.vehicle_kind,
            capacity: ride.capacity,
        });
    }
    Ok(())
}

/// Rules a new ride must pass against the current ride set.
///
/// Order: vehicle tag, poster's bookings inside the window, poster's own
/// postings at the exact same time.
pub(crate) fn check_publish(store: &RideStore, ride: &NewRide) -> Result<(), EngineError> {
    if store.contains_tag(&ride.vehicle_tag) {
        return Err(EngineError::DuplicateVehicle(ride.vehicle_tag.clone()));
    }
    if let Some(booked) = store
        .booked_by(&ride.poster_id)
        .find(|r| within_window(r.departure, ride.departure))
    {
        return Err(EngineError::BookerTimeConflict {
            poster_id: ride.poster_id.clone(),
            booked_ride: booked.id,
        });
    }
    if store
        .posted_by(&ride.poster_id)
        .any(|r| r.departure == ride.departure)
    {
        return Err(EngineError::DuplicatePosting {
            poster_id: ride.poster_id.clone(),
            departure: ride.departure,
        });
    }
    Ok(())
}

/// Ordered booking checks; the first failure wins.
pub(crate) fn check_booking(store: &RideStore, requester_id: &str, ride_id: Ulid) -> Result<(), EngineError> {
    let ride = store.get(&ride_id).ok_or(EngineError::RideNotFound(ride_id))?;
    if ride.poster_id == requester_id {
        return Err(EngineError::SelfBookingForbidden(ride_id));
    }
    if ride.is_booked_by(requester_id) {
        return Err(EngineError::AlreadyBooked(ride_id));
    }
    if ride.vacant_seats == 0 {
        return Err(EngineError::RideFull(ride_id));
    }
    // Exact departure match only, unlike the window used when posting.
    let clash = store
        .booked_by(requester_id)
        .chain(store.posted_by(requester_id))
        .find(|r| r.id != ride_id && r.departure == ride.departure);
    if let Some(other) = clash {
        return Err(EngineError::ScheduleConflict {
            requester_id: requester_id.to_string(),
            conflicting_ride: other.id,
        });
    }
    Ok(())
}
