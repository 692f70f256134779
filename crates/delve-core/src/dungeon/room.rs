//! Room types and structures
//!
//! A room is a walled rectangle of tiles with a floor interior. Hallways are
//! rooms too (see [`RoomKind::Hallway`]); everything else is a chamber.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use crate::error::DungeonError;

use super::geometry::{Bounds, Edge, Orientation, TilePos};
use super::grid::Grid;
use super::tile::Tile;

/// Stable room identifier: the room's index in [`crate::Dungeon::rooms`]
pub type RoomId = usize;

/// Gameplay role of a room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum RoomType {
    /// Not yet committed to a dungeon
    #[default]
    Unset,
    /// Where the player begins
    Start,
    /// Ordinary room that triggers a fight on first entry
    Battle,
    /// Small room holding an item
    Item,
    /// Connector between two rooms
    Hallway,
    /// Exit of the level
    End,
}

/// Structural variant of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomKind {
    /// A regular room
    #[default]
    Chamber,
    /// A straight corridor one tile wide between two doors
    Hallway {
        orientation: Orientation,
        /// The two chambers this hallway connects, once committed
        joins: Option<[RoomId; 2]>,
    },
}

/// A door on a room's boundary, in room-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    pub x: i32,
    pub y: i32,
    pub edge: Edge,
}

/// A rectangular room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: Option<RoomId>,
    width: i32,
    height: i32,
    bounds: Bounds,
    room_type: RoomType,
    kind: RoomKind,
    tiles: Grid<Tile>,
    doors: Vec<Door>,
    entered: bool,
}

impl Room {
    /// Create a walled chamber of the given size at the origin
    ///
    /// # Errors
    /// [`DungeonError::RoomTooSmall`] below 3x3.
    pub fn new(width: i32, height: i32) -> Result<Self, DungeonError> {
        if width < MIN_ROOM_WIDTH || height < MIN_ROOM_HEIGHT {
            return Err(DungeonError::RoomTooSmall { width, height });
        }
        Ok(Self::walled(width, height, RoomKind::Chamber))
    }

    /// Build a room with wall border and floor interior, no size checks
    pub(crate) fn walled(width: i32, height: i32, kind: RoomKind) -> Self {
        let mut tiles = Grid::new(width as usize, height as usize, Tile::Floor);
        for y in 0..height {
            for x in 0..width {
                if y == 0 || y == height - 1 || x == 0 || x == width - 1 {
                    tiles.set(x, y, Tile::Wall);
                }
            }
        }

        let room_type = match kind {
            RoomKind::Chamber => RoomType::Unset,
            RoomKind::Hallway { .. } => RoomType::Hallway,
        };

        Self {
            id: None,
            width,
            height,
            bounds: Bounds::from_origin(0, 0, width, height),
            room_type,
            kind,
            tiles,
            doors: Vec::new(),
            entered: false,
        }
    }

    /// Move the room so its top-left tile is at `(x, y)`
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.bounds = Bounds::from_origin(x, y, self.width, self.height);
    }

    /// Id assigned when the room was committed to a dungeon
    pub fn id(&self) -> Option<RoomId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: RoomId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn x(&self) -> i32 {
        self.bounds.left
    }

    pub fn y(&self) -> i32 {
        self.bounds.top
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn left(&self) -> i32 {
        self.bounds.left
    }

    pub fn right(&self) -> i32 {
        self.bounds.right
    }

    pub fn top(&self) -> i32 {
        self.bounds.top
    }

    pub fn bottom(&self) -> i32 {
        self.bounds.bottom
    }

    pub fn center_x(&self) -> i32 {
        self.bounds.left + self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.bounds.top + self.height / 2
    }

    /// Center tile in world space
    pub fn center(&self) -> TilePos {
        TilePos::new(self.center_x(), self.center_y())
    }

    /// Footprint in world space, walls included
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Area in tiles, walls included
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub(crate) fn set_room_type(&mut self, room_type: RoomType) {
        self.room_type = room_type;
    }

    pub fn kind(&self) -> RoomKind {
        self.kind
    }

    pub fn is_hallway(&self) -> bool {
        matches!(self.kind, RoomKind::Hallway { .. })
    }

    /// Orientation for hallways, `None` for chambers
    pub fn orientation(&self) -> Option<Orientation> {
        match self.kind {
            RoomKind::Hallway { orientation, .. } => Some(orientation),
            RoomKind::Chamber => None,
        }
    }

    /// The two chambers a committed hallway connects
    pub fn joins(&self) -> Option<[RoomId; 2]> {
        match self.kind {
            RoomKind::Hallway { joins, .. } => joins,
            RoomKind::Chamber => None,
        }
    }

    pub(crate) fn set_joins(&mut self, a: RoomId, b: RoomId) {
        if let RoomKind::Hallway { joins, .. } = &mut self.kind {
            *joins = Some([a, b]);
        }
    }

    /// Local tile grid (`height` rows of `width` tiles)
    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// Tile at room-local `(x, y)`
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.tiles.get(x, y).copied()
    }

    pub(crate) fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> bool {
        self.tiles.set(x, y, tile)
    }

    /// Put a marker tile on the room's center
    pub(crate) fn mark_center(&mut self, tile: Tile) {
        let (cx, cy) = (self.width / 2, self.height / 2);
        self.set_tile(cx, cy, tile);
    }

    /// Doors as of the last [`Room::update_door_positions`]
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Whether the player has been in this room
    pub fn entered(&self) -> bool {
        self.entered
    }

    /// Flag the room as visited. Returns true on the first visit.
    pub fn mark_entered(&mut self) -> bool {
        !std::mem::replace(&mut self.entered, true)
    }

    /// Check if this room overlaps another
    pub fn overlaps(&self, other: &Room) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    /// Check if the horizontal spans overlap
    pub fn overlaps_x(&self, other: &Room) -> bool {
        self.bounds.overlaps_x(&other.bounds)
    }

    /// Check if the vertical spans overlap
    pub fn overlaps_y(&self, other: &Room) -> bool {
        self.bounds.overlaps_y(&other.bounds)
    }

    /// Check if world-space point is inside the room, walls included
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Check if a world-space point is one of the four corner tiles
    pub fn is_corner(&self, pos: TilePos) -> bool {
        let b = &self.bounds;
        (pos.x == b.left || pos.x == b.right) && (pos.y == b.top || pos.y == b.bottom)
    }

    /// Classify a local coordinate against the room's edges.
    /// Rows win over columns, so corners report Top/Bottom.
    fn local_edge(&self, x: i32, y: i32) -> Option<Edge> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        if y == 0 {
            Some(Edge::Top)
        } else if y == self.height - 1 {
            Some(Edge::Bottom)
        } else if x == 0 {
            Some(Edge::Left)
        } else if x == self.width - 1 {
            Some(Edge::Right)
        } else {
            None
        }
    }

    /// Edge a world-space point lies on; `None` if interior or outside
    pub fn edge_at(&self, x: i32, y: i32) -> Option<Edge> {
        self.local_edge(x - self.bounds.left, y - self.bounds.top)
    }

    /// Scan the tiles for doors (local coordinates)
    pub fn door_positions(&self) -> Vec<TilePos> {
        self.tiles
            .iter()
            .filter(|(_, _, tile)| tile.is_door())
            .map(|(x, y, _)| TilePos::new(x, y))
            .collect()
    }

    /// Rebuild [`Room::doors`] from the current tiles
    pub fn update_door_positions(&mut self) {
        self.doors = self
            .door_positions()
            .into_iter()
            .filter_map(|pos| {
                self.local_edge(pos.x, pos.y).map(|edge| Door {
                    x: pos.x,
                    y: pos.y,
                    edge,
                })
            })
            .collect();
    }

    /// Check if a door of one room opens onto walkable ground of the other.
    ///
    /// Hallways carry no door tiles of their own, so both directions are
    /// checked: a chamber's door stepping out into the hallway's floor, and
    /// two adjacent chambers whose doors face each other.
    pub fn is_connected_to(&self, other: &Room) -> bool {
        self.door_opens_onto(other) || other.door_opens_onto(self)
    }

    fn door_opens_onto(&self, other: &Room) -> bool {
        self.door_positions().into_iter().any(|local| {
            let Some(edge) = self.local_edge(local.x, local.y) else {
                return false;
            };
            let outside = TilePos::new(local.x + self.x(), local.y + self.y()).step(edge.outward());
            other
                .tile(outside.x - other.x(), outside.y - other.y())
                .is_some_and(|tile| tile.is_walkable())
        })
    }

    /// Region a viewer should uncover while the player is in this room.
    ///
    /// Hallways reach one tile further at both ends so the doors they lead
    /// to are shown with them.
    pub fn reveal_bounds(&self) -> Bounds {
        let mut b = self.bounds;
        match self.orientation() {
            Some(Orientation::Horizontal) => {
                b.left -= 1;
                b.right += 1;
            }
            Some(Orientation::Vertical) => {
                b.top -= 1;
                b.bottom += 1;
            }
            None => {}
        }
        b
    }

    /// Tile-space point a quarter of the room from its center towards
    /// `edge`: where a player entering through that edge stops to fight
    pub fn staging_point(&self, edge: Edge) -> (f32, f32) {
        let cx = self.center_x() as f32 + 0.5;
        let cy = self.center_y() as f32 + 0.5;
        let qw = self.width as f32 / 4.0;
        let qh = self.height as f32 / 4.0;
        match edge {
            Edge::Top => (cx, cy - qh),
            Edge::Right => (cx + qw, cy),
            Edge::Bottom => (cx, cy + qh),
            Edge::Left => (cx - qw, cy),
        }
    }
}
