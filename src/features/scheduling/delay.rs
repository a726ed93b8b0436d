//! Fixed and custom delay resolution.

use chrono::{DateTime, Local, Timelike};

use crate::core::MINUTE_MS;
use crate::locale::Phrase;

/// One of the fixed delay buttons offered on every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayChoice {
    HalfHour,
    OneHour,
    TwoHours,
    Tomorrow,
    OneWeek,
}

impl DelayChoice {
    /// Button order as presented to the user.
    pub const ALL: [DelayChoice; 5] = [
        DelayChoice::HalfHour,
        DelayChoice::OneHour,
        DelayChoice::TwoHours,
        DelayChoice::Tomorrow,
        DelayChoice::OneWeek,
    ];

    /// Advertised delay in minutes.
    pub fn minutes(self) -> i64 {
        match self {
            DelayChoice::HalfHour => 30,
            DelayChoice::OneHour => 60,
            DelayChoice::TwoHours => 120,
            DelayChoice::Tomorrow => 24 * 60,
            DelayChoice::OneWeek => 7 * 24 * 60,
        }
    }

    pub fn delay_ms(self) -> i64 {
        self.minutes() * MINUTE_MS
    }

    /// Widget id carried on the button.
    pub fn action_id(self) -> &'static str {
        match self {
            DelayChoice::HalfHour => "delay_30m",
            DelayChoice::OneHour => "delay_1h",
            DelayChoice::TwoHours => "delay_2h",
            DelayChoice::Tomorrow => "delay_1d",
            DelayChoice::OneWeek => "delay_1w",
        }
    }

    pub fn from_action_id(id: &str) -> Option<DelayChoice> {
        DelayChoice::ALL.into_iter().find(|c| c.action_id() == id)
    }

    /// Button label phrase.
    pub fn phrase(self) -> Phrase {
        match self {
            DelayChoice::HalfHour => Phrase::HalfHour,
            DelayChoice::OneHour => Phrase::OneHour,
            DelayChoice::TwoHours => Phrase::TwoHours,
            DelayChoice::Tomorrow => Phrase::Tomorrow,
            DelayChoice::OneWeek => Phrase::OneWeek,
        }
    }
}

/// Delay until the given time-of-day, measured against `now`, in millis.
///
/// Whole-minute arithmetic: seconds within the current minute are ignored,
/// matching the minute granularity of the picker. A target equal to the
/// current time-of-day yields zero and schedules immediately. A target
/// earlier in the day yields `None`; the request is rejected rather than
/// rolled over to tomorrow.
pub fn custom_delay_ms(now: &DateTime<Local>, hour: u8, minute: u8) -> Option<i64> {
    let target = i64::from(hour) * 60 + i64::from(minute);
    let current = i64::from(now.hour()) * 60 + i64::from(now.minute());
    let diff = target - current;
    if diff < 0 {
        None
    } else {
        Some(diff * MINUTE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 14, hour, minute, 42).unwrap()
    }

    #[test]
    fn test_fixed_delay_minutes() {
        assert_eq!(DelayChoice::HalfHour.minutes(), 30);
        assert_eq!(DelayChoice::OneHour.minutes(), 60);
        assert_eq!(DelayChoice::TwoHours.minutes(), 120);
        assert_eq!(DelayChoice::Tomorrow.minutes(), 1440);
        assert_eq!(DelayChoice::OneWeek.minutes(), 10080);
    }

    #[test]
    fn test_action_ids_round_trip() {
        for choice in DelayChoice::ALL {
            assert_eq!(DelayChoice::from_action_id(choice.action_id()), Some(choice));
        }
        assert_eq!(DelayChoice::from_action_id("delay_5m"), None);
    }

    #[test]
    fn test_custom_delay_in_the_future() {
        // 10:00 -> 14:30 is 4h30m away
        assert_eq!(custom_delay_ms(&at(10, 0), 14, 30), Some(270 * MINUTE_MS));
    }

    #[test]
    fn test_custom_delay_same_minute_is_zero() {
        assert_eq!(custom_delay_ms(&at(14, 30), 14, 30), Some(0));
    }

    #[test]
    fn test_custom_delay_in_the_past_is_rejected() {
        assert_eq!(custom_delay_ms(&at(14, 31), 14, 30), None);
        assert_eq!(custom_delay_ms(&at(23, 59), 0, 0), None);
    }

    #[test]
    fn test_custom_delay_ignores_seconds() {
        // 10:00:42 -> 10:01 is exactly one minute, not 18 seconds
        assert_eq!(custom_delay_ms(&at(10, 0), 10, 1), Some(MINUTE_MS));
    }
}
