//! Grid geometry: positions, inclusive rectangles, directions and edges

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A tile coordinate in world space (or room-local space, by context)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one tile in `direction`
    pub const fn step(&self, direction: Direction) -> TilePos {
        let (dx, dy) = direction.delta();
        TilePos::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle with inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Left x coordinate
    pub left: i32,
    /// Top y coordinate
    pub top: i32,
    /// Right x coordinate
    pub right: i32,
    /// Bottom y coordinate
    pub bottom: i32,
}

impl Bounds {
    /// Bounds of a `width` x `height` rectangle whose top-left tile is `(x, y)`
    pub const fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width - 1,
            bottom: y + height - 1,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Check if the point lies inside (edges included)
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Check if the horizontal spans intersect
    pub const fn overlaps_x(&self, other: &Bounds) -> bool {
        !(self.right < other.left || self.left > other.right)
    }

    /// Check if the vertical spans intersect
    pub const fn overlaps_y(&self, other: &Bounds) -> bool {
        !(self.bottom < other.top || self.top > other.bottom)
    }

    /// Check if this rectangle intersects another
    pub const fn intersects(&self, other: &Bounds) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Check if this rectangle lies within a `width` x `height` grid
    pub const fn within(&self, width: i32, height: i32) -> bool {
        self.left >= 0 && self.top >= 0 && self.right < width && self.bottom < height
    }
}

/// Cardinal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in draw order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step for this direction (y grows downwards)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Hallway orientation: which axis the walkable strip runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Edge of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Direction pointing out of the room through this edge
    pub const fn outward(self) -> Direction {
        match self {
            Edge::Top => Direction::North,
            Edge::Right => Direction::East,
            Edge::Bottom => Direction::South,
            Edge::Left => Direction::West,
        }
    }
}
