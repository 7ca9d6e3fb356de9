//! Relationship counter: time elapsed since a fixed start date.

use serde::Serialize;

use crate::types::Timestamp;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Whole days plus the remaining hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Elapsed {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
}

/// Break the time between `start` and `now` into days/hours/minutes/seconds.
///
/// Before `start` every unit is zero. Sub-second remainders are dropped.
pub fn elapsed_since(start: Timestamp, now: Timestamp) -> Elapsed {
    let total = (now - start).num_seconds();
    if total <= 0 {
        return Elapsed::ZERO;
    }

    Elapsed {
        days: total / SECS_PER_DAY,
        hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
        minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
        seconds: total % SECS_PER_MINUTE,
    }
}
