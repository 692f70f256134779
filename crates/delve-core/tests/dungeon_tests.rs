use std::collections::BTreeSet;

use delve_core::dungeon::{DungeonConfig, Room, RoomId, RoomType, SizeRange, Tile, TilePos};
use delve_core::{Dungeon, DungeonError, DungeonRng};
use proptest::prelude::*;

fn seeded(seed: u64) -> DungeonConfig {
    DungeonConfig::default().with_seed(seed)
}

/// Role selection can legitimately fail on an unlucky layout
fn is_role_failure(err: &DungeonError) -> bool {
    matches!(
        err,
        DungeonError::NoStartRoom { .. } | DungeonError::NoEndRoom { .. } | DungeonError::TooFewRooms { .. }
    )
}

fn generated(config: &DungeonConfig, seeds: std::ops::Range<u64>) -> Vec<Dungeon> {
    seeds
        .filter_map(|seed| Dungeon::generate(&config.clone().with_seed(seed)).ok())
        .collect()
}

fn assert_layout(dungeon: &Dungeon) {
    let rooms = dungeon.rooms();
    for (i, room) in rooms.iter().enumerate() {
        assert_eq!(room.id(), Some(i), "ids follow commit order");
        assert!(room.left() >= 0 && room.top() >= 0);
        assert!(room.right() < dungeon.width() && room.bottom() < dungeon.height());
        for other in &rooms[i + 1..] {
            assert!(!room.overlaps(other), "rooms {:?} and {:?} overlap", room.id(), other.id());
        }
    }
}

fn assert_connectivity(dungeon: &Dungeon) {
    let graph = dungeon.connections();
    assert!(graph.is_symmetric());
    for a in graph.ids() {
        for &b in graph.neighbors(a) {
            assert!(graph.neighbors(b).contains(&a));
        }
    }

    let chambers: BTreeSet<RoomId> = dungeon.chambers().filter_map(Room::id).collect();
    assert_eq!(graph.ids().collect::<BTreeSet<_>>(), chambers);
    assert_eq!(graph.reachable_from(0), chambers);

    for hallway in dungeon.hallways() {
        let [a, b] = hallway.joins().unwrap();
        assert!(graph.are_connected(a, b));
    }

    // Growth builds a spanning tree; loop closure adds at most three edges
    let extra = graph.edge_count() + 1 - chambers.len();
    assert!(extra <= 3, "{extra} loop hallways");
}

fn assert_roles(dungeon: &Dungeon) {
    let starts: Vec<&Room> = dungeon
        .rooms()
        .iter()
        .filter(|room| room.room_type() == RoomType::Start)
        .collect();
    let ends: Vec<&Room> = dungeon
        .rooms()
        .iter()
        .filter(|room| room.room_type() == RoomType::End)
        .collect();
    assert_eq!(starts.len(), 1);
    assert_eq!(ends.len(), 1);

    let start = dungeon.start_room_id();
    let end = dungeon.end_room_id();
    assert_eq!(starts[0].id(), Some(start));
    assert_eq!(ends[0].id(), Some(end));
    assert!(dungeon.connections().degree(start) >= 3);
    assert!(dungeon.connections().degree(end) < 2);

    let mut by_area: Vec<&Room> = dungeon.chambers().collect();
    by_area.sort_by_key(|room| room.area());
    let expected: BTreeSet<RoomId> = by_area
        .iter()
        .take(5)
        .filter_map(|room| room.id())
        .filter(|&id| id != start && id != end)
        .collect();
    let items: BTreeSet<RoomId> = dungeon
        .rooms()
        .iter()
        .filter(|room| room.room_type() == RoomType::Item)
        .filter_map(Room::id)
        .collect();
    assert_eq!(items, expected);

    for room in dungeon.rooms() {
        assert_ne!(room.room_type(), RoomType::Unset);
        assert_eq!(room.is_hallway(), room.room_type() == RoomType::Hallway);
    }
}

fn assert_tiles(dungeon: &Dungeon) {
    for room in dungeon.rooms() {
        for (x, y, &tile) in room.tiles().iter() {
            assert_eq!(dungeon.tile(room.x() + x, room.y() + y), Some(tile));
        }
    }

    // Every door opens onto walkable ground belonging to another room
    for room in dungeon.rooms() {
        assert_eq!(room.doors().len(), room.door_positions().len());
        for door in room.doors() {
            let world = TilePos::new(room.x() + door.x, room.y() + door.y);
            let outside = world.step(door.edge.outward());
            assert!(dungeon.tile(outside.x, outside.y).is_some_and(|t| t.is_walkable()));
            let neighbor = dungeon.get_room_at(outside.x, outside.y).unwrap();
            assert_ne!(neighbor.id(), room.id());
            assert!(room.is_connected_to(neighbor));
        }
    }

    let markers = |marker: Tile| {
        dungeon
            .tiles()
            .iter()
            .filter(|&(_, _, &tile)| tile == marker)
            .count()
    };
    assert_eq!(markers(Tile::Start), 1);
    assert_eq!(markers(Tile::End), 1);
}

fn assert_valid(dungeon: &Dungeon) {
    assert_layout(dungeon);
    assert_connectivity(dungeon);
    assert_roles(dungeon);
    assert_tiles(dungeon);
}

#[test]
fn test_same_seed_same_dungeon() {
    let config = DungeonConfig {
        width: 55,
        height: 55,
        ..seeded(42)
    }
    .with_max_rooms(10);

    let first = Dungeon::generate(&config);
    let second = Dungeon::generate(&config);
    assert_eq!(first, second);

    if let (Ok(a), Ok(b)) = (&first, &second) {
        assert_eq!(a.rooms().len(), b.rooms().len());
        assert_eq!(a.start_room_id(), b.start_room_id());
        assert_eq!(a.tiles(), b.tiles());
    }
}

#[test]
fn test_different_seeds_differ() {
    let dungeons = generated(&DungeonConfig::default(), 0..40);
    assert!(dungeons.len() > 1);
    assert!(dungeons.iter().any(|d| d.tiles() != dungeons[0].tiles()));
}

#[test]
fn test_default_config_layouts_are_valid() {
    let dungeons = generated(&DungeonConfig::default(), 0..30);
    assert!(!dungeons.is_empty());
    for dungeon in &dungeons {
        assert_valid(dungeon);
        assert!(dungeon.rooms().len() <= 51);
    }
}

#[test]
fn test_small_budget_layouts_are_valid() {
    let config = DungeonConfig::default().with_max_rooms(10);
    for dungeon in generated(&config, 0..60) {
        assert_valid(&dungeon);
    }
}

#[test]
fn test_even_room_sizes() {
    let mut config = DungeonConfig::default();
    config.rooms.width = SizeRange::new(6, 14, Some(delve_core::Parity::Even));
    config.rooms.height = SizeRange::new(6, 10, Some(delve_core::Parity::Even));
    for dungeon in generated(&config, 0..30) {
        assert_valid(&dungeon);
        for room in dungeon.chambers() {
            assert_eq!(room.width() % 2, 0);
            assert_eq!(room.height() % 2, 0);
        }
    }
}

#[test]
fn test_unseeded_config_is_usable() {
    let config = DungeonConfig::default();
    let dungeon = (0..50)
        .find_map(|_| Dungeon::generate(&config).ok())
        .unwrap();
    assert_valid(&dungeon);

    let replay = Dungeon::generate(&seeded(dungeon.seed())).unwrap();
    assert_eq!(replay.tiles(), dungeon.tiles());
}

#[test]
fn test_explicit_rng_matches_seed() {
    let config = seeded(5);
    let a = Dungeon::generate(&config);
    let b = Dungeon::generate_with_rng(&DungeonConfig::default(), DungeonRng::new(5));
    assert_eq!(a, b);
}

#[test]
fn test_configuration_errors() {
    let config = DungeonConfig {
        height: -3,
        ..DungeonConfig::default()
    };
    assert!(matches!(
        Dungeon::generate(&config),
        Err(DungeonError::InvalidConfig { field: "height", .. })
    ));

    let config = DungeonConfig {
        width: 6,
        height: 6,
        ..seeded(1)
    };
    assert_eq!(
        Dungeon::generate(&config),
        Err(DungeonError::GridTooSmall {
            grid_width: 6,
            grid_height: 6,
            min_width: 7,
            min_height: 7
        })
    );

    assert_eq!(
        Dungeon::generate(&seeded(1).with_max_rooms(1)),
        Err(DungeonError::TooFewRooms { placed: 1 })
    );
}

#[test]
fn test_oversized_door_padding_fails_cleanly() {
    let config = DungeonConfig {
        door_padding: i32::MAX,
        ..seeded(1)
    };
    assert_eq!(
        Dungeon::generate(&config),
        Err(DungeonError::TooFewRooms { placed: 1 })
    );
}

#[test]
fn test_loop_hallways_on_default_layouts() {
    let dungeons = generated(&DungeonConfig::default(), 0..20);
    assert!(!dungeons.is_empty());
    for dungeon in &dungeons {
        let extra = dungeon.connections().edge_count() + 1 - dungeon.chambers().count();
        assert!((1..=3).contains(&extra), "seed {}: {extra} loop hallways", dungeon.seed());
    }
}

#[test]
fn test_cramped_grid_fails_cleanly() {
    let mut config = DungeonConfig {
        width: 20,
        height: 20,
        ..DungeonConfig::default()
    };
    config.rooms.width = SizeRange::new(3, 7, None);
    config.rooms.height = SizeRange::new(3, 7, None);

    for seed in 0..40 {
        match Dungeon::generate(&config.clone().with_seed(seed)) {
            Ok(dungeon) => assert_valid(&dungeon),
            Err(err) => assert!(is_role_failure(&err), "unexpected error {err}"),
        }
    }
}

#[test]
fn test_room_and_hallway_shapes() {
    let room = Room::new(7, 7).unwrap();
    assert_eq!(room.tile(0, 0), Some(Tile::Wall));
    assert_eq!(room.tile(3, 3), Some(Tile::Floor));

    let hallway = Room::hallway_from_doors(TilePos::new(5, 10), TilePos::new(5, 14)).unwrap();
    assert_eq!((hallway.width(), hallway.height()), (3, 3));
    assert_eq!((hallway.x(), hallway.y()), (4, 11));
    assert!((0..3).all(|y| hallway.tile(1, y) == Some(Tile::Floor)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_generated_dungeons_are_valid(seed in any::<u64>(), max_rooms in 4u32..40) {
        let config = seeded(seed).with_max_rooms(max_rooms);
        match Dungeon::generate(&config) {
            Ok(dungeon) => {
                prop_assert_eq!(dungeon.seed(), seed);
                assert_valid(&dungeon);
            }
            Err(err) => prop_assert!(is_role_failure(&err)),
        }
    }
}
