//! Random passengers: two generators that keep pressing buttons.
//!
//! One presses a random cabin button in a random unit, the other a random hall
//! button on a random floor. Each waits a random gap from [WorkloadConfig] between
//! presses and hands every press to its own task, so a slow press never delays
//! the next one.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;

use crate::building::Building;
use crate::config::WorkloadConfig;
use crate::print;
use crate::world_view::{Dirn, UnitId};

fn rng_from(config: &WorkloadConfig, stream: u64) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

/// Random wait between two presses, within `[min_gap, max_gap]`.
pub fn random_gap<R: Rng>(rng: &mut R, config: &WorkloadConfig) -> Duration {
    let (lo, hi) = if config.min_gap <= config.max_gap {
        (config.min_gap, config.max_gap)
    } else {
        (config.max_gap, config.min_gap)
    };
    let ms = rng.gen_range(lo.as_millis() as u64..=hi.as_millis() as u64);
    Duration::from_millis(ms)
}

/// A random cabin press: `(unit, floor)`.
pub fn random_cabin_call<R: Rng>(rng: &mut R, num_elevators: u8, num_floors: u8) -> (UnitId, u8) {
    let unit = rng.gen_range(0..num_elevators);
    let floor = rng.gen_range(1..=num_floors);
    (unit, floor)
}

/// A random hall press: `(floor, direction)`.
///
/// Floor 1 only has an Up button and the top floor only a Down button.
/// A single-floor building has nowhere to go, so its only call points Up.
pub fn random_floor_call<R: Rng>(rng: &mut R, num_floors: u8) -> (u8, Dirn) {
    let floor = rng.gen_range(1..=num_floors);
    let dirn = if floor == 1 {
        Dirn::Up
    } else if floor == num_floors {
        Dirn::Down
    } else if rng.gen_bool(0.5) {
        Dirn::Up
    } else {
        Dirn::Down
    };
    (floor, dirn)
}

/// Presses random cabin buttons forever.
pub async fn random_cabin_calls(building: Arc<Building>, config: WorkloadConfig) {
    print::info("Random function for buttons inside cabins started.".to_string());
    let mut rng = rng_from(&config, 0);
    let size = building.config();

    loop {
        sleep(random_gap(&mut rng, &config)).await;
        let (unit, floor) = random_cabin_call(&mut rng, size.num_elevators, size.num_floors);

        let building = building.clone();
        tokio::spawn(async move {
            if let Err(e) = building.cabin_press(unit, floor).await {
                print::warn(format!("Generated cabin press rejected: {}", e));
            }
        });
    }
}

/// Presses random hall buttons forever.
pub async fn random_floor_calls(building: Arc<Building>, config: WorkloadConfig) {
    print::info("Random function for outside buttons started.".to_string());
    let mut rng = rng_from(&config, 1);
    let num_floors = building.config().num_floors;

    loop {
        sleep(random_gap(&mut rng, &config)).await;
        let (floor, dirn) = random_floor_call(&mut rng, num_floors);

        let building = building.clone();
        tokio::spawn(async move {
            if let Err(e) = building.floor_press(floor, dirn).await {
                print::warn(format!("Generated floor press rejected: {}", e));
            }
        });
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_floors_only_point_inward() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let (floor, dirn) = random_floor_call(&mut rng, 4);
            assert!((1..=4).contains(&floor));
            assert_ne!(dirn, Dirn::Idle);
            if floor == 1 {
                assert_eq!(dirn, Dirn::Up);
            }
            if floor == 4 {
                assert_eq!(dirn, Dirn::Down);
            }
        }
    }

    #[test]
    fn cabin_calls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let (unit, floor) = random_cabin_call(&mut rng, 3, 6);
            assert!(unit < 3);
            assert!((1..=6).contains(&floor));
        }
    }

    #[test]
    fn gaps_stay_within_bounds() {
        let config = WorkloadConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let gap = random_gap(&mut rng, &config);
            assert!(gap >= config.min_gap && gap <= config.max_gap);
        }
    }

    #[test]
    fn same_seed_same_calls() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(random_floor_call(&mut a, 9), random_floor_call(&mut b, 9));
        }
    }
}
