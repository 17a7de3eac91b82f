//! Pointer hit-zones: the on-screen direction pad and the "Play Again" button.
//!
//! Pad geometry is expressed in abstract units so the zones stay round on a
//! terminal whose cells are about twice as tall as they are wide.

use ratatui::layout::Rect;

use crate::game::Direction;

/// Distance from the pad anchor to the centre of each zone
pub const PAD_SPACING: f32 = 70.0;
/// Radius of each circular zone
pub const PAD_RADIUS: f32 = 60.0;
/// Horizontal size of one terminal cell in pad units
pub const UNITS_PER_COLUMN: f32 = 10.0;
/// Vertical size of one terminal cell in pad units
pub const UNITS_PER_ROW: f32 = 20.0;

/// A point in pad units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Centre of a terminal cell
    pub fn from_cell(column: u16, row: u16) -> Self {
        Self {
            x: (f32::from(column) + 0.5) * UNITS_PER_COLUMN,
            y: (f32::from(row) + 0.5) * UNITS_PER_ROW,
        }
    }

    /// Terminal cell containing this point
    pub fn to_cell(self) -> (u16, u16) {
        let column = (self.x / UNITS_PER_COLUMN).floor().max(0.0) as u16;
        let row = (self.y / UNITS_PER_ROW).floor().max(0.0) as u16;
        (column, row)
    }

    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Four circular zones arranged around an anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionPad {
    pub anchor: Point,
    pub spacing: f32,
    pub radius: f32,
}

impl DirectionPad {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            spacing: PAD_SPACING,
            radius: PAD_RADIUS,
        }
    }

    /// A pad centred in a terminal area
    pub fn centered_in(area: Rect) -> Self {
        Self::new(Point::from_cell(
            area.x + area.width / 2,
            area.y + area.height / 2,
        ))
    }

    pub fn zone_center(&self, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(
            self.anchor.x + dx as f32 * self.spacing,
            self.anchor.y + dy as f32 * self.spacing,
        )
    }

    /// Direction whose zone contains `point`. Zones overlap near the
    /// diagonals; Up wins over Down, Down over Left, Left over Right.
    pub fn hit(&self, point: Point) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| point.distance(self.zone_center(direction)) < self.radius)
    }

    pub fn hit_cell(&self, column: u16, row: u16) -> Option<Direction> {
        self.hit(Point::from_cell(column, row))
    }
}

/// Rectangular clickable area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub area: Rect,
}

impl Button {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }
}
