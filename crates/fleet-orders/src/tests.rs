//! Unit tests for fleet-orders.

use fleet_core::{Cell, OrderId, SimRng, Tick};
use fleet_spatial::GridWorld;

use crate::{OrderError, OrderRegistry, OrderStatus};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_grid(size: u32) -> GridWorld {
    GridWorld::open(size, Cell::new(0, 0)).unwrap()
}

fn registry_with(grid: &GridWorld, cells: &[(i32, i32)]) -> (OrderRegistry, Vec<OrderId>) {
    let mut reg = OrderRegistry::new(3);
    let ids = cells
        .iter()
        .map(|&c| reg.insert(grid, Cell::from(c), Tick(0)).unwrap())
        .collect();
    (reg, ids)
}

// ── ExpiryQueue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod expiry_queue {
    use fleet_core::{OrderId, Tick};

    use crate::ExpiryQueue;

    #[test]
    fn drain_due_takes_past_and_present_only() {
        let mut q = ExpiryQueue::new();
        q.push(Tick(5), OrderId(1));
        q.push(Tick(3), OrderId(0));
        q.push(Tick(5), OrderId(2));
        q.push(Tick(9), OrderId(3));
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_tick(), Some(Tick(3)));

        assert!(q.drain_due(Tick(2)).is_empty());
        assert_eq!(q.drain_due(Tick(5)), vec![OrderId(0), OrderId(1), OrderId(2)]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(9)));
    }

    #[test]
    fn drain_at_max_tick_empties_queue() {
        let mut q = ExpiryQueue::new();
        q.push(Tick(u64::MAX), OrderId(7));
        assert_eq!(q.drain_due(Tick(u64::MAX)), vec![OrderId(7)]);
        assert!(q.is_empty());
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let g = open_grid(5);
        let (reg, ids) = registry_with(&g, &[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(ids, vec![OrderId(0), OrderId(1), OrderId(2)]);
        assert_eq!(reg.created_count(), 3);
        assert_eq!(reg.unassigned_count(), 3);
        assert_eq!(reg.active_count(), 3);
    }

    #[test]
    fn insert_rejects_blocked_and_out_of_bounds() {
        let g = GridWorld::parse("D.\n.#").unwrap();
        let mut reg = OrderRegistry::new(0);
        assert!(matches!(
            reg.insert(&g, Cell::new(1, 1), Tick(0)),
            Err(OrderError::InvalidLocation(_))
        ));
        assert!(matches!(
            reg.insert(&g, Cell::new(2, 0), Tick(0)),
            Err(OrderError::InvalidLocation(_))
        ));
        assert!(reg.is_empty());
        assert_eq!(reg.created_count(), 0, "rejected inserts do not consume ids");
    }

    #[test]
    fn insert_rejects_cells_cut_off_from_the_depot() {
        let g = GridWorld::parse("D....\n.....\n.....\n...##\n...#.").unwrap();
        let mut reg = OrderRegistry::new(0);
        assert!(matches!(
            reg.insert(&g, Cell::new(4, 4), Tick(0)),
            Err(OrderError::Unreachable(c)) if c == Cell::new(4, 4)
        ));
        assert!(reg.is_empty());

        let id = reg.insert(&g, Cell::new(4, 2), Tick(0)).unwrap();
        assert_eq!(id, OrderId(0), "a rejected insert does not consume an id");
    }

    #[test]
    fn lifecycle_moves_forward_only() {
        let g = open_grid(5);
        let (mut reg, ids) = registry_with(&g, &[(1, 1)]);
        let id = ids[0];

        assert!(matches!(
            reg.mark_delivered(id, Tick(1)),
            Err(OrderError::InvalidState { expected: OrderStatus::Assigned, found: OrderStatus::Unassigned, .. })
        ));

        reg.mark_assigned(id).unwrap();
        assert_eq!(reg.get(id).unwrap().status, OrderStatus::Assigned);
        assert!(matches!(reg.mark_assigned(id), Err(OrderError::InvalidState { .. })));
        assert_eq!(reg.unassigned_count(), 0);

        reg.mark_delivered(id, Tick(4)).unwrap();
        let o = reg.get(id).unwrap();
        assert_eq!(o.status, OrderStatus::Delivered);
        assert_eq!(o.delivered_at, Some(Tick(4)));
        assert_eq!(reg.active_count(), 0);
        assert!(matches!(reg.mark_delivered(id, Tick(5)), Err(OrderError::InvalidState { .. })));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut reg = OrderRegistry::new(0);
        assert!(matches!(reg.mark_assigned(OrderId(9)), Err(OrderError::NotFound(_))));
        assert!(matches!(reg.cancel(OrderId(9)), Err(OrderError::NotFound(_))));
    }

    #[test]
    fn purge_after_grace_period() {
        let g = open_grid(5);
        let (mut reg, ids) = registry_with(&g, &[(1, 1), (2, 2)]);
        reg.mark_assigned(ids[0]).unwrap();
        reg.mark_delivered(ids[0], Tick(10)).unwrap();

        // Grace is 3 ticks: still visible at 12, gone at 13.
        assert!(reg.purge_expired(Tick(12)).is_empty());
        assert!(reg.contains(ids[0]));
        assert_eq!(reg.purge_expired(Tick(13)), vec![ids[0]]);
        assert!(!reg.contains(ids[0]));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn cancelled_delivered_order_is_not_reported_by_purge() {
        let g = open_grid(5);
        let (mut reg, ids) = registry_with(&g, &[(1, 1)]);
        reg.mark_assigned(ids[0]).unwrap();
        reg.mark_delivered(ids[0], Tick(0)).unwrap();
        let removed = reg.cancel(ids[0]).unwrap();
        assert_eq!(removed.id, ids[0]);
        assert!(reg.purge_expired(Tick(100)).is_empty());
    }

    #[test]
    fn occupied_includes_delivered_until_purged() {
        let g = open_grid(5);
        let (mut reg, ids) = registry_with(&g, &[(1, 1), (2, 2)]);
        reg.mark_assigned(ids[1]).unwrap();
        reg.mark_delivered(ids[1], Tick(0)).unwrap();
        let occupied = reg.occupied_locations();
        assert!(occupied.contains(&Cell::new(1, 1)));
        assert!(occupied.contains(&Cell::new(2, 2)));
        reg.purge_expired(Tick(3));
        assert!(!reg.occupied_locations().contains(&Cell::new(2, 2)));
    }

    #[test]
    fn order_age_saturates() {
        let g = open_grid(5);
        let mut reg = OrderRegistry::new(0);
        let id = reg.insert(&g, Cell::new(1, 1), Tick(10)).unwrap();
        let o = reg.get(id).unwrap();
        assert_eq!(o.age(Tick(15)), 5);
        assert_eq!(o.age(Tick(3)), 0);
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generator {
    use super::*;
    use crate::OrderGenerator;

    #[test]
    fn candidates_skip_depot_obstacles_and_unreachable_pockets() {
        let g = GridWorld::parse("D....\n.....\n.....\n...##\n...#.").unwrap();
        let placer = OrderGenerator::new(&g);
        // 25 cells − 3 obstacles − depot − enclosed (4, 4).
        assert_eq!(placer.candidate_count(), 20);
    }

    #[test]
    fn never_picks_an_occupied_cell() {
        let g = open_grid(3);
        let placer = OrderGenerator::new(&g);
        let mut reg = OrderRegistry::new(0);
        let mut rng = SimRng::new(1);

        for _ in 0..8 {
            placer.generate(&g, &mut reg, &mut rng, Tick(0)).unwrap();
        }
        let occupied = reg.occupied_locations();
        assert_eq!(occupied.len(), 8, "every order on its own cell");
        assert!(!occupied.contains(&g.depot()));

        // All candidates taken: the draw gives up instead of looping.
        assert_eq!(placer.generate(&g, &mut reg, &mut rng, Tick(0)), None);
        assert_eq!(reg.len(), 8);
    }

    #[test]
    fn same_seed_same_stream() {
        let g = open_grid(10);
        let placer = OrderGenerator::new(&g);
        let stream = |seed| {
            let mut reg = OrderRegistry::new(0);
            let mut rng = SimRng::new(seed);
            (0..5)
                .map(|_| {
                    let id = placer.generate(&g, &mut reg, &mut rng, Tick(0)).unwrap();
                    reg.get(id).unwrap().location
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(stream(5), stream(5));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use fleet_core::{Cell, Tick};

    use crate::{OrderError, load_orders_reader};

    #[test]
    fn parses_rows_with_optional_tick() {
        let csv = "row,col,created_at\n2,3,0\n4, 6,\n6,2,7\n";
        let seeds = load_orders_reader(Cursor::new(csv)).unwrap();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].location, Cell::new(2, 3));
        assert_eq!(seeds[0].created_at, Some(Tick(0)));
        assert_eq!(seeds[1].location, Cell::new(4, 6));
        assert_eq!(seeds[1].created_at, None);
        assert_eq!(seeds[2].created_at, Some(Tick(7)));
    }

    #[test]
    fn tick_column_may_be_absent() {
        let seeds = load_orders_reader(Cursor::new("row,col\n1,1\n")).unwrap();
        assert_eq!(seeds[0].created_at, None);
    }

    #[test]
    fn bad_number_is_parse_error() {
        let err = load_orders_reader(Cursor::new("row,col\nx,1\n")).unwrap_err();
        assert!(matches!(err, OrderError::Parse(_)));
    }
}
