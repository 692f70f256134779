//! The generated dungeon

use crate::error::DungeonError;
use crate::rng::DungeonRng;

use super::config::DungeonConfig;
use super::connections::ConnectionGraph;
use super::generation::Generator;
use super::grid::{Grid, RoomIndex};
use super::room::{Room, RoomId};
use super::tile::Tile;

/// A fully generated dungeon level.
///
/// The layout never changes after generation; the only mutable state is the
/// per-room `entered` flag, see [`Dungeon::enter_room`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    pub(super) width: i32,
    pub(super) height: i32,
    pub(super) seed: u64,
    pub(super) rooms: Vec<Room>,
    pub(super) room_index: RoomIndex,
    pub(super) connections: ConnectionGraph,
    pub(super) start_room: RoomId,
    pub(super) end_room: RoomId,
    pub(super) tiles: Grid<Tile>,
}

impl Dungeon {
    /// Generate a dungeon from `config`.
    ///
    /// With `config.seed` set the result is fully reproducible; without it
    /// a seed is drawn from entropy and reported by [`Dungeon::seed`].
    pub fn generate(config: &DungeonConfig) -> Result<Self, DungeonError> {
        let rng = match config.seed {
            Some(seed) => DungeonRng::new(seed),
            None => DungeonRng::from_entropy(),
        };
        Self::generate_with_rng(config, rng)
    }

    /// Generate with an explicit RNG; `config.seed` is ignored
    pub fn generate_with_rng(config: &DungeonConfig, rng: DungeonRng) -> Result<Self, DungeonError> {
        Generator::new(config, rng)?.run()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Seed the layout was generated from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Flattened tile grid (`tiles.get(x, y)`, rows top to bottom)
    pub fn tiles(&self) -> &Grid<Tile> {
        &self.tiles
    }

    /// World tile at `(x, y)`
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.tiles.get(x, y).copied()
    }

    /// All rooms and hallways in commit order; a room's id is its index
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Rooms that are not hallways
    pub fn chambers(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| !room.is_hallway())
    }

    pub fn hallways(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.is_hallway())
    }

    pub fn start_room(&self) -> &Room {
        &self.rooms[self.start_room]
    }

    pub fn start_room_id(&self) -> RoomId {
        self.start_room
    }

    pub fn end_room(&self) -> &Room {
        &self.rooms[self.end_room]
    }

    pub fn end_room_id(&self) -> RoomId {
        self.end_room
    }

    /// Adjacency between chambers
    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    /// Room covering `(x, y)`, or `None` outside the grid or on empty ground.
    /// Where several rooms share a cell the lowest id wins.
    pub fn get_room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.room_index
            .first_at(x, y)
            .and_then(|id| self.rooms.get(id))
    }

    /// Ids of every room covering `(x, y)`
    pub fn rooms_at(&self, x: i32, y: i32) -> &[RoomId] {
        self.room_index.rooms_at(x, y)
    }

    /// Record that the player entered a room.
    ///
    /// Returns `Some(true)` on the first visit, `Some(false)` afterwards and
    /// `None` for an unknown id.
    pub fn enter_room(&mut self, id: RoomId) -> Option<bool> {
        self.rooms.get_mut(id).map(Room::mark_entered)
    }
}
