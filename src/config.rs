use tracing::warn;

use crate::geometry::{DeskDimensions, FloorDimensions, GeometryConfig};

/// Parse a positive dimension, falling back to `default` when the value is
/// missing or not a positive finite number.
fn parse_cm(key: &str, raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw else { return default };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            warn!("ignoring {key}={raw:?}: expected a positive number");
            default
        }
    }
}

fn env_cm(key: &str, default: f64) -> f64 {
    parse_cm(key, std::env::var(key).ok().as_deref(), default)
}

impl GeometryConfig {
    /// Floor and desk dimensions from `DESKMAP_*` variables, defaults otherwise.
    pub fn from_env() -> Self {
        let floor = FloorDimensions::default();
        let desk = DeskDimensions::default();
        Self {
            floor: FloorDimensions {
                width_cm: env_cm("DESKMAP_FLOOR_WIDTH_CM", floor.width_cm),
                height_cm: env_cm("DESKMAP_FLOOR_HEIGHT_CM", floor.height_cm),
            },
            desk: DeskDimensions {
                width_cm: env_cm("DESKMAP_DESK_WIDTH_CM", desk.width_cm),
                length_cm: env_cm("DESKMAP_DESK_LENGTH_CM", desk.length_cm),
            },
        }
    }
}
