/// Half-width of the conflict window around a departure time, in minutes.
pub const CONFLICT_WINDOW_MINUTES: i32 = 60;

/// A two-wheeler always carries exactly one passenger.
pub const TWO_WHEELER_SEATS: u32 = 1;
/// Upper bound on bookable seats for a four-wheeler.
pub const FOUR_WHEELER_MAX_SEATS: u32 = 7;

pub const MAX_REQUESTER_ID_LEN: usize = 64;
pub const MAX_VEHICLE_TAG_LEN: usize = 32;
pub const MAX_PLACE_LEN: usize = 256;

/// Default cap on rides held by one engine. Overridable via `EngineConfig`.
pub const DEFAULT_MAX_RIDES: usize = 100_000;
