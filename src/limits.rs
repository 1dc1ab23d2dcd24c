// Floor and desk defaults, in centimetres.
pub const DEFAULT_FLOOR_WIDTH_CM: f64 = 1200.0;
pub const DEFAULT_FLOOR_HEIGHT_CM: f64 = 750.0;
pub const DEFAULT_DESK_WIDTH_CM: f64 = 80.0;
pub const DEFAULT_DESK_LENGTH_CM: f64 = 150.0;

/// Desk labels show at most this many trailing characters of the id.
pub const LABEL_MAX_CHARS: usize = 3;

/// Pending updates buffered between the host and the view loop.
pub const VIEW_CHANNEL_CAPACITY: usize = 1024;

pub const HOUR_MS: i64 = 3_600_000;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const DAYS_PER_WEEK: usize = 7;
