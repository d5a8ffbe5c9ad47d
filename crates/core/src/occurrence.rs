//! Occurrence enumeration: every minute of a window a schedule fires on.

use chrono::NaiveDateTime;

use crate::schedule::Schedule;
use crate::window::Window;

/// Ascending, duplicate-free list of the minutes in `window` matched by
/// `schedule`. Empty windows yield an empty list.
pub fn occurrences(schedule: &Schedule, window: &Window) -> Vec<NaiveDateTime> {
    window
        .minutes()
        .filter(|minute| schedule.matches(minute))
        .collect()
}

/// Count without materialising the list.
pub fn count_occurrences(schedule: &Schedule, window: &Window) -> usize {
    window
        .minutes()
        .filter(|minute| schedule.matches(minute))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn half_hour() -> Window {
        Window::new(at(2020, 1, 1, 0, 0), at(2020, 1, 1, 0, 30))
    }

    fn count(expr: &str, window: &Window) -> usize {
        let schedule: Schedule = expr.parse().unwrap();
        occurrences(&schedule, window).len()
    }

    #[test]
    fn boundaries_are_inclusive() {
        let w = half_hour();
        assert_eq!(count("* * * * *", &w), 31);
        assert_eq!(count("0 * * * *", &w), 1);
        assert_eq!(count("0 0 * * *", &w), 1);
        assert_eq!(count("59 23 * * *", &w), 0);
        assert_eq!(count("30 0 * * *", &w), 1);
        assert_eq!(count("31 0 * * *", &w), 0);
        assert_eq!(count("59 11 1 1 0", &w), 0);
    }

    #[test]
    fn output_is_ascending_and_unique() {
        let w = Window::new(at(2024, 1, 1, 0, 0), at(2024, 1, 2, 0, 0));
        let schedule: Schedule = "*/20 */6 * * *".parse().unwrap();
        let found = occurrences(&schedule, &w);
        assert_eq!(found.len(), 13);
        assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(found.first(), Some(&at(2024, 1, 1, 0, 0)));
        assert_eq!(found.last(), Some(&at(2024, 1, 2, 0, 0)));
    }

    #[test]
    fn empty_window_has_no_occurrences() {
        let w = Window::new(at(2020, 1, 1, 1, 0), at(2020, 1, 1, 0, 0));
        assert_eq!(count("* * * * *", &w), 0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let w = Window::new(at(2024, 2, 28, 0, 0), at(2024, 3, 2, 0, 0));
        let schedule: Schedule = "15 3,15 29 2 *".parse().unwrap();
        let first = occurrences(&schedule, &w);
        assert_eq!(first, occurrences(&schedule, &w));
        assert_eq!(first, vec![at(2024, 2, 29, 3, 15), at(2024, 2, 29, 15, 15)]);
    }

    #[test]
    fn split_window_adds_up() {
        let begin = at(2024, 5, 1, 0, 0);
        let end = at(2024, 5, 3, 12, 0);
        let schedule: Schedule = "*/7 1-5,22 * * 3,4".parse().unwrap();
        let whole = occurrences(&schedule, &Window::new(begin, end));

        for mid in [begin, at(2024, 5, 1, 22, 14), at(2024, 5, 2, 5, 0), end] {
            let mut joined = occurrences(&schedule, &Window::new(begin, mid));
            joined.extend(occurrences(
                &schedule,
                &Window::new(mid + Duration::minutes(1), end),
            ));
            assert_eq!(joined, whole, "split at {mid}");
        }
    }

    #[test]
    fn count_matches_list_length() {
        let w = Window::new(at(2024, 1, 1, 0, 0), at(2024, 1, 31, 23, 59));
        let schedule: Schedule = "0 12 * * 1-5".parse().unwrap();
        assert_eq!(count_occurrences(&schedule, &w), 23);
        assert_eq!(occurrences(&schedule, &w).len(), 23);
    }
}
