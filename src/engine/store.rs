use std::collections::{HashMap, HashSet};
use std::time::{Duration, UNIX_EPOCH};

use ulid::{Generator, MonotonicError, Ulid};

use crate::model::*;

/// The ride table plus lookup indexes. No locking; the engine wraps it.
///
/// Rides are never removed, so positions in `rides` are stable and the
/// indexes store positions rather than ids.
pub struct RideStore {
    rides: Vec<Ride>,
    by_id: HashMap<Ulid, usize>,
    tags: HashSet<String>,
    posted: HashMap<String, Vec<usize>>,
    booked: HashMap<String, Vec<usize>>,
    ids: Generator,
}

impl Default for RideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RideStore {
    pub fn new() -> Self {
        Self {
            rides: Vec::new(),
            by_id: HashMap::new(),
            tags: HashSet::new(),
            posted: HashMap::new(),
            booked: HashMap::new(),
            ids: Generator::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    /// All rides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Ride> {
        self.rides.iter()
    }

    pub fn get(&self, id: &Ulid) -> Option<&Ride> {
        self.by_id.get(id).map(|&pos| &self.rides[pos])
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn posted_by<'a>(&'a self, requester_id: &str) -> impl Iterator<Item = &'a Ride> {
        self.indexed(&self.posted, requester_id)
    }

    pub fn booked_by<'a>(&'a self, requester_id: &str) -> impl Iterator<Item = &'a Ride> {
        self.indexed(&self.booked, requester_id)
    }

    fn indexed<'a>(
        &'a self,
        index: &'a HashMap<String, Vec<usize>>,
        requester_id: &str,
    ) -> impl Iterator<Item = &'a Ride> {
        index
            .get(requester_id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.rides[pos])
    }

    /// Next ride id. Monotonic, so ids sort by creation even within one millisecond.
    pub fn next_id(&mut self, now: Ms) -> Result<Ulid, MonotonicError> {
        let at = UNIX_EPOCH + Duration::from_millis(now.max(0) as u64);
        self.ids.generate_from_datetime(at)
    }

    // ── Event application ────────────────────────────────────

    /// The only writer of ride state. Callers validate before applying.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::RidePublished { ride } => {
                let pos = self.rides.len();
                self.by_id.insert(ride.id, pos);
                self.tags.insert(ride.vehicle_tag.clone());
                self.posted.entry(ride.poster_id.clone()).or_default().push(pos);
                self.rides.push(ride.clone());
            }
            Event::SeatBooked { ride_id, requester_id } => {
                let Some(&pos) = self.by_id.get(ride_id) else {
                    return;
                };
                let ride = &mut self.rides[pos];
                ride.vacant_seats = ride.vacant_seats.saturating_sub(1);
                ride.bookers.push(requester_id.clone());
                self.booked.entry(requester_id.clone()).or_default().push(pos);
            }
        }
    }
}
