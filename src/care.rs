//! Watering and fertilizing schedules.
//!
//! Every function here is pure: the evaluation instant is always passed in,
//! never read from the clock, so results depend only on the arguments.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::TrackedPlant;

/// Whole days between `timestamp` and `now`, rounded up.
///
/// The difference is taken as an absolute value, so a timestamp in the future
/// (clock skew between devices) counts forward instead of going negative.
/// Returns `None` when there is no timestamp.
pub fn days_since(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<u64> {
    let timestamp = timestamp?;
    let mut elapsed = now.signed_duration_since(timestamp);
    if elapsed < Duration::zero() {
        elapsed = -elapsed;
    }
    let whole = elapsed.num_days();
    let days = if elapsed > Duration::days(whole) {
        whole + 1
    } else {
        whole
    };
    Some(days.unsigned_abs())
}

/// True once the days since the last watering reach the watering interval.
///
/// A plant that has never been watered has no schedule yet and is not due.
pub fn needs_watering(plant: &TrackedPlant, now: DateTime<Utc>) -> bool {
    is_due(plant.last_watered, plant.species.water_frequency, now)
}

/// Fertilizer counterpart of [`needs_watering`].
pub fn needs_fertilizing(plant: &TrackedPlant, now: DateTime<Utc>) -> bool {
    is_due(plant.last_fertilized, plant.species.fertilize_frequency, now)
}

/// Days left until the next watering; zero or negative when due.
pub fn days_until_watering(plant: &TrackedPlant, now: DateTime<Utc>) -> Option<i64> {
    days_until(plant.last_watered, plant.species.water_frequency, now)
}

pub fn days_until_fertilizing(plant: &TrackedPlant, now: DateTime<Utc>) -> Option<i64> {
    days_until(plant.last_fertilized, plant.species.fertilize_frequency, now)
}

fn is_due(last: Option<DateTime<Utc>>, frequency: u32, now: DateTime<Utc>) -> bool {
    days_since(last, now).is_some_and(|days| days >= u64::from(frequency))
}

fn days_until(last: Option<DateTime<Utc>>, frequency: u32, now: DateTime<Utc>) -> Option<i64> {
    let elapsed = i64::try_from(days_since(last, now)?).unwrap_or(i64::MAX);
    Some(i64::from(frequency).saturating_sub(elapsed))
}

/// Schedule state for one kind of care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ScheduleState {
    /// Never performed, so there is nothing to count from.
    NotScheduled,
    Due { days_since: u64 },
    Upcoming { days_since: u64, days_left: u64 },
}

impl ScheduleState {
    fn evaluate(last: Option<DateTime<Utc>>, frequency: u32, now: DateTime<Utc>) -> Self {
        match days_since(last, now) {
            None => Self::NotScheduled,
            Some(days) if days >= u64::from(frequency) => Self::Due { days_since: days },
            Some(days) => Self::Upcoming {
                days_since: days,
                days_left: u64::from(frequency) - days,
            },
        }
    }

    pub fn is_due(&self) -> bool {
        matches!(self, Self::Due { .. })
    }
}

/// Watering and fertilizing state of a tracked plant at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareStatus {
    pub water: ScheduleState,
    pub fertilize: ScheduleState,
}

impl CareStatus {
    pub fn evaluate(plant: &TrackedPlant, now: DateTime<Utc>) -> Self {
        Self {
            water: ScheduleState::evaluate(
                plant.last_watered,
                plant.species.water_frequency,
                now,
            ),
            fertilize: ScheduleState::evaluate(
                plant.last_fertilized,
                plant.species.fertilize_frequency,
                now,
            ),
        }
    }
}

/// Plants due for watering, in collection order.
pub fn plants_needing_water(plants: &[TrackedPlant], now: DateTime<Utc>) -> Vec<&TrackedPlant> {
    plants.iter().filter(|p| needs_watering(p, now)).collect()
}

/// Plants due for fertilizer, in collection order.
pub fn plants_needing_fertilizer(
    plants: &[TrackedPlant],
    now: DateTime<Utc>,
) -> Vec<&TrackedPlant> {
    plants.iter().filter(|p| needs_fertilizing(p, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn days_since_is_none_without_timestamp() {
        assert_eq!(days_since(None, now()), None);
    }

    #[test]
    fn days_since_rounds_partial_days_up() {
        assert_eq!(days_since(Some(now()), now()), Some(0));
        assert_eq!(days_since(Some(now() - Duration::milliseconds(1)), now()), Some(1));
        assert_eq!(days_since(Some(now() - Duration::days(1)), now()), Some(1));
        assert_eq!(
            days_since(Some(now() - Duration::days(1) - Duration::hours(1)), now()),
            Some(2)
        );
    }

    #[test]
    fn sub_millisecond_gap_counts_as_a_day() {
        let watered = now();
        let later = watered + Duration::microseconds(500);
        assert_eq!(days_since(Some(watered), later), Some(1));
        assert_eq!(days_since(Some(later), watered), Some(1));
        assert!(is_due(Some(watered), 1, later));
    }

    #[test]
    fn days_since_counts_future_timestamps_forward() {
        assert_eq!(days_since(Some(now() + Duration::hours(36)), now()), Some(2));
    }

    #[test]
    fn schedule_state_reports_days_left() {
        let state = ScheduleState::evaluate(Some(now() - Duration::days(3)), 7, now());
        assert_eq!(
            state,
            ScheduleState::Upcoming {
                days_since: 3,
                days_left: 4
            }
        );
        assert!(!state.is_due());

        let state = ScheduleState::evaluate(Some(now() - Duration::days(9)), 7, now());
        assert_eq!(state, ScheduleState::Due { days_since: 9 });
        assert_eq!(ScheduleState::evaluate(None, 7, now()), ScheduleState::NotScheduled);
    }

    #[test]
    fn zero_frequency_is_due_immediately() {
        assert!(is_due(Some(now()), 0, now()));
        assert_eq!(days_until(Some(now()), 0, now()), Some(0));
    }

    #[test]
    fn days_until_goes_negative_when_overdue() {
        assert_eq!(days_until(Some(now() - Duration::days(10)), 7, now()), Some(-3));
        assert_eq!(days_until(None, 7, now()), None);
    }
}
