//! Isometric projection of grid positions and agent footprints.

use glam::Vec2;

use crate::constants::cell::{HALF_CELL_HEIGHT, HALF_CELL_WIDTH};
use crate::constants::collider::{BOTTOM_LINE_HEIGHT, EPSILON, SPRITE_WIDTH};
use crate::map::direction::Direction;

/// Projects a (possibly fractional) grid position onto the isometric screen plane.
pub fn to_screen(grid: Vec2) -> Vec2 {
    Vec2::new(HALF_CELL_WIDTH * (grid.x - grid.y), HALF_CELL_HEIGHT * (grid.x + grid.y))
}

/// A 2D line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// The ground-contact edge of an agent's sprite centred on `center`.
    ///
    /// Agents moving along the x axis of the grid lie on a rising diagonal of
    /// the screen, agents moving along the y axis on a falling one.
    pub fn footprint(center: Vec2, direction: Direction) -> Self {
        let half = Vec2::new(SPRITE_WIDTH / 2.0, BOTTOM_LINE_HEIGHT / 2.0);
        if direction.is_horizontal() {
            Self::new(center - half, center + half)
        } else {
            Self::new(
                Vec2::new(center.x - half.x, center.y + half.y),
                Vec2::new(center.x + half.x, center.y - half.y),
            )
        }
    }

    fn slope(&self) -> f32 {
        (self.end.y - self.start.y) / (self.end.x - self.start.x)
    }

    fn intercept(&self) -> f32 {
        self.start.y - self.slope() * self.start.x
    }

    fn x_range(&self) -> (f32, f32) {
        (self.start.x.min(self.end.x), self.start.x.max(self.end.x))
    }

    /// Tests two segments for intersection.
    ///
    /// Parallel segments only intersect when they lie on the same line and
    /// their x-ranges overlap.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (k1, k2) = (self.slope(), other.slope());
        let (b1, b2) = (self.intercept(), other.intercept());
        let (min1, max1) = self.x_range();
        let (min2, max2) = other.x_range();

        if (k1 - k2).abs() < EPSILON {
            return (b1 - b2).abs() < EPSILON && min1 <= max2 && min2 <= max1;
        }

        let x = (b2 - b1) / (k1 - k2);
        (min1..=max1).contains(&x) && (min2..=max2).contains(&x)
    }
}
