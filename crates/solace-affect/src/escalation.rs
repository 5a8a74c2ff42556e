//! Escalation trend over recent intensity readings.
//!
//! The caller supplies the history (oldest first, newest last); nothing is
//! stored here. The trend is a three-point difference heuristic over the
//! last three readings: fewer than three points is always `Steady`.

use serde::{Deserialize, Serialize};

/// Minimum spread between oldest and newest reading to call a trend.
const TREND_DELTA: i16 = 2;

/// Direction the member's intensity is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Easing,
    Steady,
}

/// Classify the trend of the last three intensity readings.
///
/// Rising: strictly increasing across all three, or the newest at least
/// [`TREND_DELTA`] above the oldest. Easing is the mirror. Anything else,
/// including short histories, is steady.
#[must_use]
pub fn trend(history: &[u8]) -> Trend {
    let [.., a, b, c] = history else {
        return Trend::Steady;
    };
    let (a, b, c) = (i16::from(*a), i16::from(*b), i16::from(*c));

    if (c > b && b > a) || c - a >= TREND_DELTA {
        Trend::Rising
    } else if (c < b && b < a) || a - c >= TREND_DELTA {
        Trend::Easing
    } else {
        Trend::Steady
    }
}
