//! Corner classification for quad faces.
//!
//! A quad's four UVs are assigned the roles left-up, left-down, right-up
//! and right-down by a Y-then-X heuristic: the two highest UVs become the
//! "up" pair, split left/right by X, and the remaining two become the
//! "down" pair. Sheared quads classify by the same rule, so a consistent
//! winding in, consistent roles out.

use nalgebra::Point2;

/// One of the four corner roles of a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerRole {
    /// Top-left corner.
    LeftUp,
    /// Bottom-left corner.
    LeftDown,
    /// Top-right corner.
    RightUp,
    /// Bottom-right corner.
    RightDown,
}

/// The four classified corners of a quad, each carrying a payload
/// (typically a loop id) alongside its UV.
#[derive(Debug, Clone, Copy)]
pub struct Corners<T> {
    /// Top-left corner.
    pub left_up: (T, Point2<f64>),
    /// Bottom-left corner.
    pub left_down: (T, Point2<f64>),
    /// Top-right corner.
    pub right_up: (T, Point2<f64>),
    /// Bottom-right corner.
    pub right_down: (T, Point2<f64>),
}

impl<T: Copy> Corners<T> {
    /// The corner holding the given role.
    pub fn get(&self, role: CornerRole) -> (T, Point2<f64>) {
        match role {
            CornerRole::LeftUp => self.left_up,
            CornerRole::LeftDown => self.left_down,
            CornerRole::RightUp => self.right_up,
            CornerRole::RightDown => self.right_down,
        }
    }
}

/// Classify four corners into roles. Returns `None` unless exactly four
/// entries are given.
pub fn classify<T: Copy>(entries: &[(T, Point2<f64>)]) -> Option<Corners<T>> {
    if entries.len() != 4 {
        return None;
    }
    let mut rest: Vec<(T, Point2<f64>)> = entries.to_vec();

    let first_up = take_highest(&mut rest);
    let second_up = take_highest(&mut rest);

    let (left_up, right_up) = order_by_x(first_up, second_up);
    let (left_down, right_down) = order_by_x(rest[0], rest[1]);

    Some(Corners {
        left_up,
        left_down,
        right_up,
        right_down,
    })
}

/// Remove and return the entry with the highest Y, ties going to the
/// lower X.
fn take_highest<T: Copy>(rest: &mut Vec<(T, Point2<f64>)>) -> (T, Point2<f64>) {
    let mut best = 0;
    for i in 1..rest.len() {
        let (c, b) = (rest[i].1, rest[best].1);
        if c.y > b.y || (c.y == b.y && c.x < b.x) {
            best = i;
        }
    }
    rest.remove(best)
}

fn order_by_x<T: Copy>(a: (T, Point2<f64>), b: (T, Point2<f64>)) -> ((T, Point2<f64>), (T, Point2<f64>)) {
    if a.1.x < b.1.x {
        (a, b)
    } else {
        (b, a)
    }
}
