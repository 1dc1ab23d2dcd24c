use serde::Serialize;

use crate::limits::*;
use crate::model::*;
use crate::presets::{day_floor, DayWindow};

use super::status_for;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayStatus {
    pub day: Span,
    pub status: DeskStatus,
}

/// Status of one desk for seven consecutive days, each day restricted to `window`.
/// Days start at the UTC midnight on or before `week_start`.
pub fn weekly_availability(
    desk: &Desk,
    reservations: &[Reservation],
    week_start: Ms,
    window: DayWindow,
) -> Vec<DayStatus> {
    let first = day_floor(week_start);
    (0..DAYS_PER_WEEK as i64)
        .map(|n| {
            let day = window.on(first + n * DAY_MS);
            DayStatus {
                day,
                status: status_for(desk, reservations, &day),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::BUSINESS_DAY;

    const H: Ms = HOUR_MS;
    // 2024-01-01T00:00:00Z, a Monday.
    const MONDAY: Ms = 1_704_067_200_000;

    #[test]
    fn seven_days_inside_window() {
        let desk = Desk::new(1, 0.0, 0.0, Orientation::Horizontal);
        let week = weekly_availability(&desk, &[], MONDAY + 5 * H, BUSINESS_DAY);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day, Span::new(MONDAY + 9 * H, MONDAY + 17 * H));
        assert_eq!(week[6].day.start, MONDAY + 6 * DAY_MS + 9 * H);
        assert!(week.iter().all(|d| d.status == DeskStatus::Available));
    }

    #[test]
    fn booked_day_is_occupied() {
        let desk = Desk::new(1, 0.0, 0.0, Orientation::Horizontal);
        let wednesday = MONDAY + 2 * DAY_MS;
        let reservations = vec![
            Reservation::new(1, Span::new(wednesday + 10 * H, wednesday + 11 * H), "u"),
            // Outside business hours on Thursday.
            Reservation::new(1, Span::new(wednesday + DAY_MS + 18 * H, wednesday + DAY_MS + 20 * H), "u"),
        ];
        let week = weekly_availability(&desk, &reservations, MONDAY, BUSINESS_DAY);
        let statuses: Vec<_> = week.iter().map(|d| d.status).collect();
        assert_eq!(statuses[2], DeskStatus::Occupied);
        assert_eq!(statuses[3], DeskStatus::Available);
        assert_eq!(statuses.iter().filter(|s| **s == DeskStatus::Occupied).count(), 1);
    }

    #[test]
    fn maintenance_desk_all_week() {
        let mut desk = Desk::new(1, 0.0, 0.0, Orientation::Horizontal);
        desk.status = DeskStatus::Maintenance;
        let week = weekly_availability(&desk, &[], MONDAY, BUSINESS_DAY);
        assert!(week.iter().all(|d| d.status == DeskStatus::Maintenance));
    }
}
