//! Plain-text rendering of a snapshot frame.

use fleet_orders::OrderStatus;
use fleet_sim::SnapshotFrame;

/// One character per cell:
///
/// | Char  | Cell                          |
/// |-------|-------------------------------|
/// | `#`   | obstacle                      |
/// | `D`   | depot                         |
/// | `o`   | unassigned order              |
/// | `a`   | assigned order                |
/// | `x`   | delivered order (in grace)    |
/// | `0-9` | robot (id mod 10)             |
///
/// Robots are drawn last, so they cover whatever is beneath them.
pub fn render(frame: &SnapshotFrame) -> String {
    let n = frame.grid_size as usize;
    let mut cells = vec![b'.'; n * n];
    let mut put = |row: i32, col: i32, ch: u8| {
        cells[row as usize * n + col as usize] = ch;
    };

    for o in &frame.obstacles {
        put(o.row, o.col, b'#');
    }
    put(frame.depot.row, frame.depot.col, b'D');
    for order in &frame.orders {
        let ch = match order.status {
            OrderStatus::Unassigned => b'o',
            OrderStatus::Assigned   => b'a',
            OrderStatus::Delivered  => b'x',
        };
        put(order.location.row, order.location.col, ch);
    }
    for robot in &frame.robots {
        put(robot.position.row, robot.position.col, b'0' + (robot.id.0 % 10) as u8);
    }

    let mut out = String::with_capacity(n * (n + 1));
    for row in cells.chunks(n) {
        out.extend(row.iter().map(|&b| b as char));
        out.push('\n');
    }
    out
}
