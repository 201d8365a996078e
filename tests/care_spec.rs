use chrono::{DateTime, Duration, TimeZone, Utc};
use plant_care::care::*;
use plant_care::catalog::Catalog;
use plant_care::models::*;
use speculate2::speculate;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Monstera: water every 7 days, fertilize every 30.
fn monstera() -> TrackedPlant {
    let species = Catalog::builtin()
        .expect("Failed to load catalog")
        .find_species("1")
        .cloned()
        .expect("Monstera missing");
    TrackedPlant::from_species(species, now() - Duration::days(60))
}

fn watered_days_ago(days: i64) -> TrackedPlant {
    let mut plant = monstera();
    plant.last_watered = Some(now() - Duration::days(days));
    plant
}

speculate! {
    describe "needs_watering" {
        it "is false for a plant that was never watered" {
            let plant = monstera();
            assert!(!needs_watering(&plant, now()));
            assert!(!needs_watering(&plant, now() + Duration::days(365)));
        }

        it "becomes true exactly when the interval is reached" {
            assert!(!needs_watering(&watered_days_ago(6), now()));
            assert!(needs_watering(&watered_days_ago(7), now()));
            assert!(needs_watering(&watered_days_ago(10), now()));
        }

        it "counts a partial day as a whole day" {
            let mut plant = monstera();
            plant.last_watered = Some(now() - Duration::days(6) - Duration::minutes(1));
            assert!(needs_watering(&plant, now()));
        }

        it "agrees with days_since for every elapsed day" {
            for days in 0..20 {
                let plant = watered_days_ago(days);
                let expected = days_since(plant.last_watered, now()).unwrap()
                    >= u64::from(plant.species.water_frequency);
                assert_eq!(needs_watering(&plant, now()), expected, "after {} days", days);
            }
        }

        it "treats a zero-day interval as always due" {
            let mut plant = watered_days_ago(0);
            plant.species.water_frequency = 0;
            assert!(needs_watering(&plant, now()));
        }

        it "tolerates a last watering in the future" {
            let mut plant = monstera();
            plant.last_watered = Some(now() + Duration::days(8));
            assert_eq!(days_since(plant.last_watered, now()), Some(8));
            assert!(needs_watering(&plant, now()));
        }
    }

    describe "needs_fertilizing" {
        it "uses the fertilizer history and interval" {
            let mut plant = watered_days_ago(1);
            assert!(!needs_fertilizing(&plant, now()));

            plant.last_fertilized = Some(now() - Duration::days(29));
            assert!(!needs_fertilizing(&plant, now()));

            plant.last_fertilized = Some(now() - Duration::days(30));
            assert!(needs_fertilizing(&plant, now()));
        }
    }

    describe "days_until" {
        it "counts down to the next watering" {
            assert_eq!(days_until_watering(&watered_days_ago(2), now()), Some(5));
            assert_eq!(days_until_watering(&watered_days_ago(9), now()), Some(-2));
            assert_eq!(days_until_watering(&monstera(), now()), None);
        }

        it "counts down to the next fertilizing" {
            let mut plant = monstera();
            plant.last_fertilized = Some(now() - Duration::days(10));
            assert_eq!(days_until_fertilizing(&plant, now()), Some(20));
        }
    }

    describe "care status" {
        it "summarizes both schedules" {
            let mut plant = watered_days_ago(8);
            plant.last_fertilized = Some(now() - Duration::days(5));

            let status = CareStatus::evaluate(&plant, now());
            assert_eq!(status.water, ScheduleState::Due { days_since: 8 });
            assert_eq!(status.fertilize, ScheduleState::Upcoming { days_since: 5, days_left: 25 });
        }

        it "serializes with a state tag" {
            let status = CareStatus::evaluate(&monstera(), now());
            let value = serde_json::to_value(status).expect("Failed to serialize");
            assert_eq!(value["water"]["state"], "not-scheduled");
        }
    }

    describe "plants_needing_water" {
        it "returns due plants in collection order" {
            let mut first = watered_days_ago(9);
            first.nickname = Some("first".to_string());
            let fresh = watered_days_ago(1);
            let never = monstera();
            let mut second = watered_days_ago(7);
            second.nickname = Some("second".to_string());
            let plants = vec![first, fresh, never, second];

            let due: Vec<_> = plants_needing_water(&plants, now())
                .into_iter()
                .map(|p| p.display_name().to_string())
                .collect();
            assert_eq!(due, vec!["first", "second"]);
            assert!(plants_needing_fertilizer(&plants, now()).is_empty());
        }
    }
}
