use std::time::Instant;

use tracing::info;
use ulid::Ulid;

use crate::model::*;
use crate::observability::{RIDES_PUBLISHED_TOTAL, RIDES_TOTAL, SEATS_BOOKED_TOTAL};

use super::conflict::{check_booking, check_publish, validate_new_ride, validate_requester};
use super::{observe, Engine, EngineError};

impl Engine {
    /// Publish a new ride. On any error the ride set is left untouched.
    pub async fn publish_ride(&self, ride: NewRide) -> Result<Ride, EngineError> {
        let started = Instant::now();
        let result = self.try_publish(ride).await;
        observe("publish_ride", started, &result);
        result
    }

    async fn try_publish(&self, new: NewRide) -> Result<Ride, EngineError> {
        validate_new_ride(&new)?;

        let mut store = self.state.write().await;
        if store.len() >= self.config().max_rides {
            return Err(EngineError::LimitExceeded("too many rides"));
        }
        check_publish(&store, &new)?;

        let created_at = self.clock().now_ms();
        let id = store
            .next_id(created_at)
            .map_err(|_| EngineError::IdSpaceExhausted)?;
        let ride = Ride {
            id,
            poster_id: new.poster_id,
            vehicle_kind: new.vehicle_kind,
            vehicle_tag: new.vehicle_tag,
            capacity: new.capacity,
            vacant_seats: new.capacity,
            departure: new.departure,
            pickup_point: new.pickup_point,
            destination: new.destination,
            bookers: Vec::new(),
            created_at,
        };

        store.apply_event(&Event::RidePublished { ride: ride.clone() });
        info!(
            ride_id = %ride.id,
            poster_id = %ride.poster_id,
            vehicle = %ride.vehicle_kind,
            seats = ride.capacity,
            departure = %ride.departure,
            "ride published"
        );
        metrics::counter!(RIDES_PUBLISHED_TOTAL).increment(1);
        metrics::gauge!(RIDES_TOTAL).set(store.len() as f64);
        Ok(ride)
    }

    /// Reserve one seat on `ride_id` for `requester_id`. Returns the updated ride.
    pub async fn book_seat(&self, requester_id: &str, ride_id: Ulid) -> Result<Ride, EngineError> {
        let started = Instant::now();
        let result = self.try_book(requester_id, ride_id).await;
        observe("book_seat", started, &result);
        result
    }

    async fn try_book(&self, requester_id: &str, ride_id: Ulid) -> Result<Ride, EngineError> {
        validate_requester(requester_id)?;

        let mut store = self.state.write().await;
        check_booking(&store, requester_id, ride_id)?;

        store.apply_event(&Event::SeatBooked {
            ride_id,
            requester_id: requester_id.to_string(),
        });
        let ride = store
            .get(&ride_id)
            .cloned()
            .ok_or(EngineError::RideNotFound(ride_id))?;
        info!(
            ride_id = %ride_id,
            requester_id,
            vacant_seats = ride.vacant_seats,
            departure = %ride.departure,
            "seat booked"
        );
        metrics::counter!(SEATS_BOOKED_TOTAL).increment(1);
        Ok(ride)
    }
}
