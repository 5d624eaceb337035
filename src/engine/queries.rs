use ulid::Ulid;

use crate::model::*;

use super::Engine;
use super::conflict::within_window;

impl Engine {
    /// Open rides departing within ±60 minutes of `requested`, optionally
    /// restricted to one vehicle kind. Insertion order; not a contract.
    pub async fn query_available(&self, requested: ClockTime, kind: Option<VehicleKind>) -> Vec<Ride> {
        let store = self.state.read().await;
        store
            .iter()
            .filter(|r| {
                within_window(r.departure, requested)
                    && r.vacant_seats > 0
                    && kind.is_none_or(|k| r.vehicle_kind == k)
            })
            .cloned()
            .collect()
    }

    /// Rides `requester_id` posted and rides they hold a seat on.
    pub async fn query_history(&self, requester_id: &str) -> RideHistory {
        let store = self.state.read().await;
        RideHistory {
            posted: store.posted_by(requester_id).cloned().collect(),
            booked: store.booked_by(requester_id).cloned().collect(),
        }
    }

    pub async fn is_vehicle_tag_taken(&self, tag: &str) -> bool {
        self.state.read().await.contains_tag(tag)
    }

    /// Every open ride of one vehicle kind, at any departure time.
    pub async fn rides_by_vehicle_kind(&self, kind: VehicleKind) -> Vec<Ride> {
        let store = self.state.read().await;
        store
            .iter()
            .filter(|r| r.vehicle_kind == kind && r.vacant_seats > 0)
            .cloned()
            .collect()
    }

    pub async fn get_ride(&self, id: Ulid) -> Option<Ride> {
        self.state.read().await.get(&id).cloned()
    }

    /// All rides, open and full, in insertion order.
    pub async fn snapshot(&self) -> Vec<Ride> {
        self.state.read().await.iter().cloned().collect()
    }

    pub async fn ride_count(&self) -> usize {
        self.state.read().await.len()
    }
}
