//! Distance and containment helpers.

use crate::Point3;

/// Euclidean distance over all three axes.
pub fn distance_3d(p: Point3, q: Point3) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    let dz = p.z - q.z;
    (dx*dx + dy*dy + dz*dz).sqrt()
}

/// Axis-aligned rectangle in frame pixels, `(x1, y1)` top-left and
/// `(x2, y2)` bottom-right.  Both corners belong to the rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Rect { x1, y1, x2, y2 }
    }

    pub fn width(&self)  -> i32 { self.x2 - self.x1 }
    pub fn height(&self) -> i32 { self.y2 - self.y1 }

    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        point_in_rect(x, y, self)
    }
}

/// Inclusive containment test.
pub fn point_in_rect(x: i32, y: i32, rect: &Rect) -> bool {
    rect.x1 <= x && x <= rect.x2 && rect.y1 <= y && y <= rect.y2
}
