//! In-memory ride-sharing engine: publish rides, book seats, and find rides
//! departing near a given time of day.

pub mod clock;
pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
