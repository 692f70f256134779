//! Hallway construction
//!
//! A hallway is a room three tiles thick whose middle strip is floor from
//! end to end. It is built purely from the two doors it joins; the doors
//! themselves stay on the rooms' walls and are not part of the hallway.

use super::geometry::{Orientation, TilePos};
use super::room::{Room, RoomKind};
use super::tile::Tile;

impl Room {
    /// Build the hallway running between two aligned doors (world space).
    ///
    /// Returns `None` if the doors share neither a column nor a row, or if
    /// they are less than two tiles apart (nothing to build between them).
    pub fn hallway_from_doors(a: TilePos, b: TilePos) -> Option<Room> {
        if a.x == b.x {
            let length = (a.y - b.y).abs() - 1;
            if length < 1 {
                return None;
            }
            let mut hallway = Room::walled(3, length, Self::hallway_kind(Orientation::Vertical));
            hallway.set_position(a.x - 1, a.y.min(b.y) + 1);
            for y in 0..length {
                hallway.set_tile(1, y, Tile::Floor);
            }
            Some(hallway)
        } else if a.y == b.y {
            let length = (a.x - b.x).abs() - 1;
            if length < 1 {
                return None;
            }
            let mut hallway = Room::walled(length, 3, Self::hallway_kind(Orientation::Horizontal));
            hallway.set_position(a.x.min(b.x) + 1, a.y - 1);
            for x in 0..length {
                hallway.set_tile(x, 1, Tile::Floor);
            }
            Some(hallway)
        } else {
            None
        }
    }

    fn hallway_kind(orientation: Orientation) -> RoomKind {
        RoomKind::Hallway {
            orientation,
            joins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Bounds, RoomType};

    #[test]
    fn test_vertical_hallway() {
        let hallway =
            Room::hallway_from_doors(TilePos::new(5, 10), TilePos::new(5, 14)).unwrap();
        assert_eq!(hallway.width(), 3);
        assert_eq!(hallway.height(), 3);
        assert_eq!((hallway.x(), hallway.y()), (4, 11));
        assert_eq!(hallway.room_type(), RoomType::Hallway);
        assert_eq!(hallway.orientation(), Some(Orientation::Vertical));
        assert!(hallway.is_hallway());
        for y in 0..3 {
            assert_eq!(hallway.tile(1, y), Some(Tile::Floor));
            assert_eq!(hallway.tile(0, y), Some(Tile::Wall));
            assert_eq!(hallway.tile(2, y), Some(Tile::Wall));
        }
    }

    #[test]
    fn test_door_order_does_not_matter() {
        let a = Room::hallway_from_doors(TilePos::new(5, 14), TilePos::new(5, 10)).unwrap();
        let b = Room::hallway_from_doors(TilePos::new(5, 10), TilePos::new(5, 14)).unwrap();
        assert_eq!(a.bounds(), b.bounds());
    }

    #[test]
    fn test_horizontal_hallway() {
        let hallway = Room::hallway_from_doors(TilePos::new(20, 7), TilePos::new(12, 7)).unwrap();
        assert_eq!(hallway.width(), 7);
        assert_eq!(hallway.height(), 3);
        assert_eq!((hallway.x(), hallway.y()), (13, 6));
        assert_eq!(hallway.orientation(), Some(Orientation::Horizontal));
        for x in 0..7 {
            assert_eq!(hallway.tile(x, 0), Some(Tile::Wall));
            assert_eq!(hallway.tile(x, 1), Some(Tile::Floor));
            assert_eq!(hallway.tile(x, 2), Some(Tile::Wall));
        }
        // Doors sit just outside both ends
        assert!(!hallway.contains(12, 7));
        assert!(!hallway.contains(20, 7));
    }

    #[test]
    fn test_short_hallway_is_open_at_both_ends() {
        let hallway = Room::hallway_from_doors(TilePos::new(3, 3), TilePos::new(3, 6)).unwrap();
        assert_eq!(hallway.height(), 2);
        assert_eq!(hallway.tile(1, 0), Some(Tile::Floor));
        assert_eq!(hallway.tile(1, 1), Some(Tile::Floor));
    }

    #[test]
    fn test_invalid_hallways() {
        assert!(Room::hallway_from_doors(TilePos::new(0, 0), TilePos::new(3, 4)).is_none());
        assert!(Room::hallway_from_doors(TilePos::new(2, 2), TilePos::new(2, 3)).is_none());
        assert!(Room::hallway_from_doors(TilePos::new(2, 2), TilePos::new(2, 2)).is_none());
    }

    #[test]
    fn test_hallway_reveal_bounds_reach_doors() {
        let vertical = Room::hallway_from_doors(TilePos::new(5, 10), TilePos::new(5, 14)).unwrap();
        assert_eq!(
            vertical.reveal_bounds(),
            Bounds {
                left: 4,
                top: 10,
                right: 6,
                bottom: 14
            }
        );

        let horizontal =
            Room::hallway_from_doors(TilePos::new(12, 7), TilePos::new(20, 7)).unwrap();
        let b = horizontal.reveal_bounds();
        assert_eq!((b.left, b.right, b.top, b.bottom), (12, 20, 6, 8));
    }

    #[test]
    fn test_hallway_joins_adjacent_chamber() {
        let mut upper = Room::new(5, 5).unwrap();
        upper.set_position(3, 5);
        upper.set_tile(2, 4, Tile::Door);
        let hallway = Room::hallway_from_doors(TilePos::new(5, 9), TilePos::new(5, 13)).unwrap();
        assert!(upper.is_connected_to(&hallway));
        assert!(hallway.is_connected_to(&upper));
    }
}
