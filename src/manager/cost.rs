//! Cost-to-reach heuristic used to pick which unit answers a hall call.
//!
//! The estimate is a floor-step count, assuming the unit may have to ride to the
//! end of the shaft before it turns. It ignores stops other passengers add later,
//! so it is an upper bound on travel rather than a promise about arrival order.

use crate::world_view::{Dirn, UnitId, UnitView};

/// Estimated floor-steps until `unit` could reach `floor` while serving `dirn` traffic.
///
/// - Idle unit: plain distance.
/// - Moving with the call, call ahead: forward distance.
/// - Moving with the call, call already passed: to the far end, a full shaft back, then to the floor.
/// - Moving against the call: to the end in the travel direction, then back to the floor.
pub fn estimate(unit: &UnitView, floor: u8, dirn: Dirn, num_floors: u8) -> u32 {
    let pos = unit.floor as i32;
    let call = floor as i32;
    let n = num_floors as i32;

    let cost = match (unit.dirn, dirn) {
        (Dirn::Idle, _) => (call - pos).abs(),

        (Dirn::Up, Dirn::Up) if call >= pos => call - pos,
        (Dirn::Up, Dirn::Up) => 2 * n - pos + call,
        (Dirn::Down, Dirn::Down) if call <= pos => pos - call,
        (Dirn::Down, Dirn::Down) => pos + 2 * n - call,

        (Dirn::Up, _) => n - pos + (call - pos).abs(),
        (Dirn::Down, _) => pos + (call - pos).abs(),
    };
    cost.max(0) as u32
}

/// Picks the cheapest unit for a call. Equal costs go to the lowest id.
///
/// # Returns
/// `(unit id, cost)` of the winner, or `None` if `units` is empty.
pub fn select_unit(units: &[UnitView], floor: u8, dirn: Dirn, num_floors: u8) -> Option<(UnitId, u32)> {
    units
        .iter()
        .map(|unit| (estimate(unit, floor, dirn, num_floors), unit.id))
        .min()
        .map(|(cost, id)| (id, cost))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: UnitId, floor: u8, dirn: Dirn) -> UnitView {
        UnitView { id, floor, dirn }
    }

    #[test]
    fn idle_cost_is_distance() {
        assert_eq!(estimate(&at(0, 1, Dirn::Idle), 4, Dirn::Down, 5), 3);
        assert_eq!(estimate(&at(0, 5, Dirn::Idle), 4, Dirn::Down, 5), 1);
        assert_eq!(estimate(&at(0, 3, Dirn::Idle), 3, Dirn::Up, 5), 0);
    }

    #[test]
    fn same_direction_ahead_is_forward_distance() {
        assert_eq!(estimate(&at(0, 2, Dirn::Up), 5, Dirn::Up, 6), 3);
        assert_eq!(estimate(&at(0, 5, Dirn::Down), 1, Dirn::Down, 6), 4);
    }

    #[test]
    fn same_direction_passed_rides_to_the_end_and_back() {
        // Up: 2 * 6 - 4 + 2
        assert_eq!(estimate(&at(0, 4, Dirn::Up), 2, Dirn::Up, 6), 10);
        // Down: 2 + 2 * 6 - 5
        assert_eq!(estimate(&at(0, 2, Dirn::Down), 5, Dirn::Down, 6), 9);
    }

    #[test]
    fn opposite_direction_rides_to_near_end_first() {
        // Up: 6 - 2 + |5 - 2|
        assert_eq!(estimate(&at(0, 2, Dirn::Up), 5, Dirn::Down, 6), 7);
        // Down: 4 + |1 - 4|
        assert_eq!(estimate(&at(0, 4, Dirn::Down), 1, Dirn::Up, 6), 7);
    }

    #[test]
    fn ahead_is_always_cheaper_than_behind() {
        let n = 8;
        for pos in 1..=n {
            for ahead in pos..=n {
                for behind in 1..pos {
                    let unit = at(0, pos, Dirn::Up);
                    assert!(estimate(&unit, ahead, Dirn::Up, n) < estimate(&unit, behind, Dirn::Up, n));
                }
            }
            for ahead in 1..=pos {
                for behind in (pos + 1)..=n {
                    let unit = at(0, pos, Dirn::Down);
                    assert!(estimate(&unit, ahead, Dirn::Down, n) < estimate(&unit, behind, Dirn::Down, n));
                }
            }
        }
    }

    #[test]
    fn tie_goes_to_lowest_id() {
        let units = [at(0, 1, Dirn::Idle), at(1, 5, Dirn::Idle)];
        assert_eq!(select_unit(&units, 3, Dirn::Up, 5), Some((0, 2)));

        let units = [at(2, 5, Dirn::Idle), at(1, 1, Dirn::Idle)];
        assert_eq!(select_unit(&units, 3, Dirn::Down, 5), Some((1, 2)));
    }

    #[test]
    fn nearest_unit_wins() {
        let units = [at(0, 1, Dirn::Idle), at(1, 5, Dirn::Idle)];
        assert_eq!(select_unit(&units, 4, Dirn::Down, 5), Some((1, 1)));
    }

    #[test]
    fn no_units_no_choice() {
        assert_eq!(select_unit(&[], 1, Dirn::Up, 3), None);
    }
}
