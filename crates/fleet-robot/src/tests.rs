//! Unit tests for fleet-robot.

use fleet_core::{Cell, OrderId, RobotId, Tick};
use fleet_spatial::{BreadthFirst, GridWorld, PathFinder};

use crate::{QueuedOrder, Robot, RobotState, StepContext, StepReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

const HOME: Cell = Cell::new(0, 0);

fn queued(id: u32, row: i32, col: i32) -> QueuedOrder {
    QueuedOrder { id: OrderId(id), location: Cell::new(row, col), created_at: Tick(0) }
}

/// Step `robot` once at tick `now` with breadth-first replanning.
fn step_at(robot: &mut Robot, grid: &GridWorld, now: u64, wait_ticks: u64) -> StepReport {
    let ctx = StepContext { grid, finder: &BreadthFirst, wait_ticks, now: Tick(now) };
    robot.step(&ctx)
}

/// Assign `order` the way the dispatcher does: path from the robot's cell.
fn assign(robot: &mut Robot, grid: &GridWorld, order: QueuedOrder) {
    let path = BreadthFirst.find_path(grid, robot.position(), order.location).unwrap();
    robot.add_order(&path, order).unwrap();
}

// ── State derivation ──────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn new_robot_is_idle_and_dispatchable() {
        let r = Robot::new(RobotId(0), HOME, 4);
        assert_eq!(r.state(), RobotState::AtDepotIdle);
        assert!(!r.is_busy());
        assert!(!r.is_waiting());
        assert_eq!(r.average_latency(), 0.0);
    }

    #[test]
    fn add_order_installs_path_without_current_cell() {
        let g = GridWorld::open(10, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 3, 4));
        assert!(r.is_busy());
        assert_eq!(r.state(), RobotState::EnRoute);
        assert_eq!(r.path().len(), 4);
        assert_eq!(*r.path().last().unwrap(), Cell::new(3, 4));
        assert!(r.path().all(|&c| c != HOME));
    }

    #[test]
    fn second_order_keeps_active_path() {
        let g = GridWorld::open(10, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 2, 2));
        let leg = BreadthFirst.find_path(&g, Cell::new(2, 2), Cell::new(5, 5)).unwrap();
        r.add_order(&leg, queued(1, 5, 5)).unwrap();
        assert_eq!(r.path().len(), 2);
        assert_eq!(r.queued_ids(), vec![OrderId(0), OrderId(1)]);
    }

    #[test]
    fn capacity_and_duplicates_are_rejected() {
        use crate::RobotError;

        let mut r = Robot::new(RobotId(3), HOME, 2);
        r.add_order(&[HOME], queued(0, 1, 1)).unwrap();
        assert!(matches!(
            r.add_order(&[], queued(0, 1, 1)),
            Err(RobotError::DuplicateOrder { .. })
        ));
        r.add_order(&[], queued(1, 2, 2)).unwrap();
        let err = r.add_order(&[], queued(2, 3, 3)).unwrap_err();
        assert!(matches!(err, RobotError::CapacityExceeded { capacity: 2, .. }));
        assert_eq!(r.queue().len(), 2);
        assert_eq!(r.remaining_capacity(), 0);
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use fleet_core::SpeedMode;

    use super::*;

    #[test]
    fn deliver_return_and_dwell() {
        let g = GridWorld::open(10, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 3, 4));

        for t in 1..=3 {
            assert!(step_at(&mut r, &g, t, 5).deliveries.is_empty());
        }
        let report = step_at(&mut r, &g, 4, 5);
        assert_eq!(r.position(), Cell::new(3, 4));
        assert_eq!(report.deliveries.len(), 1);
        assert_eq!(report.deliveries[0].order, OrderId(0));
        assert_eq!(report.deliveries[0].latency, 4);
        assert_eq!(r.path().len(), 4, "replanned home right away");
        assert_eq!(r.state(), RobotState::EnRoute);

        for t in 5..=7 {
            step_at(&mut r, &g, t, 5);
        }
        let report = step_at(&mut r, &g, 8, 5);
        assert!(report.docked);
        assert_eq!(r.position(), HOME);
        assert_eq!(r.state(), RobotState::Waiting);

        for t in 9..=12 {
            step_at(&mut r, &g, t, 5);
            assert_eq!(r.state(), RobotState::Waiting, "tick {t}");
        }
        step_at(&mut r, &g, 13, 5);
        assert_eq!(r.state(), RobotState::AtDepotIdle);

        // Idle robots stay put and report nothing.
        assert!(step_at(&mut r, &g, 14, 5).is_quiet());
        assert_eq!(r.deliveries(), 1);
        assert_eq!(r.total_latency(), 4);
        assert!((r.average_latency() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn zero_wait_docks_straight_to_idle() {
        let g = GridWorld::open(4, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 0, 1));
        step_at(&mut r, &g, 1, 0);
        let report = step_at(&mut r, &g, 2, 0);
        assert!(report.docked);
        assert_eq!(r.state(), RobotState::AtDepotIdle);
    }

    #[test]
    fn cautious_near_obstacle() {
        // Obstacle directly south of the depot.
        let g = GridWorld::parse("D....\n#....\n.....\n.....\n.....").unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 0, 4));

        step_at(&mut r, &g, 1, 0);
        assert_eq!(r.speed_mode(), SpeedMode::Cautious);
        step_at(&mut r, &g, 2, 0);
        assert_eq!(r.position(), HOME);
        let report = step_at(&mut r, &g, 3, 0);
        assert!(report.moved);
        assert_ne!(r.position(), HOME);
    }

    #[test]
    fn normal_two_cells_from_obstacle() {
        let g = GridWorld::parse("D....\n.....\n#....\n.....\n.....").unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 0, 4));

        assert!(!step_at(&mut r, &g, 1, 0).moved);
        assert_eq!(r.speed_mode(), SpeedMode::Normal);
        assert!(step_at(&mut r, &g, 2, 0).moved);
    }

    #[test]
    fn open_ground_is_fast() {
        let g = GridWorld::open(8, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 5, 5));
        assert!(step_at(&mut r, &g, 1, 0).moved);
        assert_eq!(r.speed_mode(), SpeedMode::Fast);
    }

    #[test]
    fn speed_follows_the_robot_home() {
        // Wall two cells east of the depot; the order sits right beside it.
        let g = GridWorld::parse("D.#..\n.....\n.....\n.....\n.....").unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 0, 1));

        let docked_at = (1..20).find(|&t| step_at(&mut r, &g, t, 3).docked).unwrap();
        assert_eq!(r.position(), HOME);
        assert_eq!(r.speed_mode(), SpeedMode::Cautious, "last move left the cell by the wall");

        step_at(&mut r, &g, docked_at + 1, 3);
        assert_eq!(r.state(), RobotState::Waiting);
        assert_eq!(r.speed_mode(), SpeedMode::Normal);

        for t in docked_at + 2..docked_at + 6 {
            step_at(&mut r, &g, t, 3);
        }
        assert_eq!(r.state(), RobotState::AtDepotIdle);
        assert_eq!(r.speed_mode(), SpeedMode::Normal);
    }

    #[test]
    fn order_on_current_cell_completes_immediately() {
        let g = GridWorld::open(5, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        r.add_order(&[HOME], queued(0, 0, 0)).unwrap();
        let report = step_at(&mut r, &g, 1, 3);
        assert_eq!(report.deliveries.len(), 1);
        assert!(report.docked);
        assert_eq!(r.state(), RobotState::Waiting);
    }

    #[test]
    fn stalled_target_is_retried_until_dropped() {
        // Column 2 is a solid wall: (0, 4) cannot be reached from the west.
        let g = GridWorld::parse("D.#..\n..#..\n..#..\n..#..\n..#..").unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 1, 0));
        r.add_order(&[], queued(1, 0, 4)).unwrap();

        // Clearance 2 from the wall: normal speed, arrival on tick 2.
        step_at(&mut r, &g, 1, 0);
        let report = step_at(&mut r, &g, 2, 0);
        assert_eq!(report.deliveries.len(), 1);
        let failure = report.path_failure.unwrap();
        assert_eq!(failure.from, Cell::new(1, 0));
        assert_eq!(failure.to, Cell::new(0, 4));

        // Every later step retries and fails again without moving.
        for t in 3..6 {
            let report = step_at(&mut r, &g, t, 0);
            assert!(report.path_failure.is_some());
            assert_eq!(r.position(), Cell::new(1, 0));
        }

        assert!(r.drop_order(OrderId(1)));
        assert!(!r.drop_order(OrderId(1)));
        let mut docked = false;
        for t in 6..20 {
            let report = step_at(&mut r, &g, t, 0);
            assert!(report.path_failure.is_none());
            if report.docked {
                docked = true;
                break;
            }
        }
        assert!(docked);
        assert_eq!(r.state(), RobotState::AtDepotIdle);
    }

    #[test]
    fn dropping_current_target_reroutes_to_next() {
        let g = GridWorld::open(10, HOME).unwrap();
        let mut r = Robot::new(RobotId(0), HOME, 4);
        assign(&mut r, &g, queued(0, 0, 6));
        r.add_order(&[], queued(1, 6, 0)).unwrap();
        step_at(&mut r, &g, 1, 0);
        assert!(r.position().is_adjacent(HOME));

        assert!(r.drop_order(OrderId(0)));
        assert_eq!(r.path().len(), 0);
        step_at(&mut r, &g, 2, 0);
        assert_eq!(*r.path().last().unwrap(), Cell::new(6, 0));
    }
}

// ── Property tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use fleet_core::SimRng;
    use fleet_spatial::{GridBuilder, is_valid_path};

    use super::*;

    #[derive(Clone, Debug)]
    enum Op {
        Add(i32, i32),
        Step,
        Drop(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            2 => (0i32..8, 0i32..8).prop_map(|(r, c)| Op::Add(r, c)),
            5 => Just(Op::Step),
            1 => (0u32..12).prop_map(Op::Drop),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn busy_and_idle_track_queue_and_path(
            seed in any::<u64>(),
            ops in prop::collection::vec(op(), 1..80),
        ) {
            let mut rng = SimRng::new(seed);
            let grid = GridBuilder::new(8, HOME)
                .random_obstacles(0.2, &mut rng)
                .unwrap()
                .build()
                .unwrap();
            let mut robot = Robot::new(RobotId(0), HOME, 3);
            let mut next_id = 0u32;
            let mut now = 0u64;

            for op in ops {
                match op {
                    Op::Add(row, col) => {
                        let cell = Cell::new(row, col);
                        if robot.remaining_capacity() == 0 || !grid.is_passable(cell) {
                            continue;
                        }
                        let order = QueuedOrder { id: OrderId(next_id), location: cell, created_at: Tick(now) };
                        if robot.path().len() == 0 {
                            let Some(path) = BreadthFirst.find_path(&grid, robot.position(), cell) else {
                                continue;
                            };
                            robot.add_order(&path, order).unwrap();
                        } else {
                            robot.add_order(&[], order).unwrap();
                        }
                        next_id += 1;
                    }
                    Op::Step => {
                        now += 1;
                        step_at(&mut robot, &grid, now, 2);
                    }
                    Op::Drop(id) => {
                        robot.drop_order(OrderId(id));
                    }
                }

                let busy = robot.queue().len() > 0 || robot.path().len() > 0;
                prop_assert_eq!(robot.is_busy(), busy);
                prop_assert!(robot.queue().len() <= robot.capacity());

                let idle = robot.position() == HOME && !busy && !robot.is_waiting();
                prop_assert_eq!(robot.state() == RobotState::AtDepotIdle, idle);
                if robot.is_waiting() {
                    prop_assert!(!busy && robot.position() == HOME);
                }

                let walk: Vec<Cell> = std::iter::once(robot.position())
                    .chain(robot.path().copied())
                    .collect();
                prop_assert!(is_valid_path(&grid, &walk));
            }
        }
    }
}
