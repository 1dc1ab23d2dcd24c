//! Query intervals the booking workflow offers as one-click choices.
//!
//! All day arithmetic is UTC; the host converts local wall-clock times
//! before handing instants to the engine.

use crate::limits::*;
use crate::model::{Ms, Span};

/// Offsets from midnight bounding the bookable part of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_offset: Ms,
    pub end_offset: Ms,
}

impl DayWindow {
    /// The window applied to the day starting at `midnight`.
    pub fn on(&self, midnight: Ms) -> Span {
        Span::new(midnight + self.start_offset, midnight + self.end_offset)
    }
}

/// 09:00–17:00.
pub const BUSINESS_DAY: DayWindow = DayWindow {
    start_offset: 9 * HOUR_MS,
    end_offset: 17 * HOUR_MS,
};

/// 09:00–13:00.
pub const MORNING: DayWindow = DayWindow {
    start_offset: 9 * HOUR_MS,
    end_offset: 13 * HOUR_MS,
};

pub fn day_floor(t: Ms) -> Ms {
    t.div_euclid(DAY_MS) * DAY_MS
}

pub fn hour_floor(t: Ms) -> Ms {
    t.div_euclid(HOUR_MS) * HOUR_MS
}

/// The interval selected before the user picks one: this hour.
pub fn default_query(now: Ms) -> Span {
    quick_book(now, 1)
}

/// Starting at the top of the current hour, lasting `hours`.
pub fn quick_book(now: Ms, hours: u32) -> Span {
    let start = hour_floor(now);
    Span::new(start, start + i64::from(hours) * HOUR_MS)
}

pub fn half_day(now: Ms) -> Span {
    MORNING.on(day_floor(now))
}

pub fn full_day(now: Ms) -> Span {
    BUSINESS_DAY.on(day_floor(now))
}

pub fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Ms)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: Ms = HOUR_MS;
    const M: Ms = 60_000;
    // 2024-01-01T00:00:00Z
    const DAY: Ms = 1_704_067_200_000;

    #[test]
    fn quick_book_truncates_to_hour() {
        let now = DAY + 14 * H + 37 * M;
        assert_eq!(quick_book(now, 2), Span::new(DAY + 14 * H, DAY + 16 * H));
        assert_eq!(default_query(now), Span::new(DAY + 14 * H, DAY + 15 * H));
    }

    #[test]
    fn day_presets() {
        let now = DAY + 20 * H;
        assert_eq!(half_day(now), Span::new(DAY + 9 * H, DAY + 13 * H));
        assert_eq!(full_day(now), Span::new(DAY + 9 * H, DAY + 17 * H));
    }

    #[test]
    fn floors_before_epoch() {
        assert_eq!(day_floor(-1), -DAY_MS);
        assert_eq!(hour_floor(-1), -H);
    }

    #[test]
    fn now_is_after_2024() {
        assert!(now_ms() > DAY);
    }
}
