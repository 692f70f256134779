//! Tile types for room and dungeon grids

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Tile type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Wall = 1,
    Floor = 2,
    Door = 3,
    /// Marker at the center of the start room
    Start = 4,
    /// Marker at the center of the end room
    End = 5,
    /// Marker at the center of an item room
    Item = 6,
}

impl Tile {
    /// Check if this is a door
    pub const fn is_door(&self) -> bool {
        matches!(self, Tile::Door)
    }

    /// Check if a player can stand here
    pub const fn is_walkable(&self) -> bool {
        matches!(
            self,
            Tile::Floor | Tile::Door | Tile::Start | Tile::End | Tile::Item
        )
    }

    /// Get the default map character for this tile
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Floor => '=',
            Tile::Door => '.',
            Tile::Start => 'S',
            Tile::End => 'E',
            Tile::Item => 'I',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_walkable() {
        let walkable: Vec<Tile> = Tile::iter().filter(Tile::is_walkable).collect();
        assert_eq!(
            walkable,
            vec![Tile::Floor, Tile::Door, Tile::Start, Tile::End, Tile::Item]
        );
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::Empty.is_walkable());
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Tile::default(), Tile::Empty);
    }
}
