//! Dungeon system
//!
//! Contains rooms, hallways, the tile and occupancy grids, and the generator
//! that lays them out.

mod config;
mod connections;
mod generation;
mod geometry;
mod grid;
mod hallway;
mod layout;
mod render;
mod room;
mod tile;

pub use config::{DungeonConfig, RoomConfig, SizeRange};
pub use connections::ConnectionGraph;
pub use geometry::{Bounds, Direction, Edge, Orientation, TilePos};
pub use grid::{Grid, Occupants, RoomIndex};
pub use layout::Dungeon;
pub use render::MapSymbols;
pub use room::{Door, Room, RoomId, RoomKind, RoomType};
pub use tile::Tile;
