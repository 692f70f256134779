//! Dungeon generation
//!
//! Grows a level outwards from one centered room. Every new room is attached
//! to an existing chamber through a straight hallway, a few extra hallways
//! close loops, and the finished chambers get their roles before everything
//! is flattened into a single tile grid.

use tracing::{debug, info, trace};

use crate::consts::{
    END_MAX_DEGREE, GROW_ITERATIONS_PER_ROOM, ITEM_ROOM_COUNT, MAX_EXTRA_HALLWAYS,
    MAX_HALL_LENGTH, MAX_RETRY_COUNT, MIN_HALL_LENGTH, MIN_VIABLE_ROOMS, START_MIN_DEGREE,
};
use crate::error::DungeonError;
use crate::rng::DungeonRng;

use super::config::DungeonConfig;
use super::connections::ConnectionGraph;
use super::geometry::{Direction, TilePos};
use super::grid::{Grid, RoomIndex};
use super::layout::Dungeon;
use super::room::{Room, RoomId, RoomType};
use super::tile::Tile;

/// Candidate placement next to an existing chamber
#[derive(Debug, Clone, Copy)]
struct Attachment {
    x: i32,
    y: i32,
    target: RoomId,
    /// Side of the target the candidate sits on
    direction: Direction,
}

/// Generation state, consumed by [`Generator::run`]
pub(super) struct Generator {
    config: DungeonConfig,
    rng: DungeonRng,
    rooms: Vec<Room>,
    index: RoomIndex,
    connections: ConnectionGraph,
}

impl Generator {
    /// Normalize the configuration and allocate an empty room index
    pub(super) fn new(config: &DungeonConfig, rng: DungeonRng) -> Result<Self, DungeonError> {
        let config = config.normalized()?;
        let index = RoomIndex::new(config.width as usize, config.height as usize);
        Ok(Self {
            config,
            rng,
            rooms: Vec::new(),
            index,
            connections: ConnectionGraph::new(),
        })
    }

    /// Run every phase and produce the finished dungeon
    pub(super) fn run(mut self) -> Result<Dungeon, DungeonError> {
        self.seed_room()?;
        self.grow()?;

        let chambers = self.chamber_ids().len();
        if chambers < MIN_VIABLE_ROOMS {
            return Err(DungeonError::TooFewRooms { placed: chambers });
        }

        self.close_loops();
        let (start, end) = self.assign_roles()?;
        Ok(self.flatten(start, end))
    }

    /// Ids of all committed rooms that are not hallways, in id order
    fn chamber_ids(&self) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|room| !room.is_hallway())
            .filter_map(Room::id)
            .collect()
    }

    /// Sample width and height until the area fits under `max_area`
    fn create_random_room(&mut self) -> Result<Room, DungeonError> {
        let rooms = &self.config.rooms;
        loop {
            let width = self
                .rng
                .rand_int(rooms.width.min, rooms.width.max, rooms.width.parity);
            let height = self
                .rng
                .rand_int(rooms.height.min, rooms.height.max, rooms.height.parity);
            if width * height <= rooms.max_area {
                return Room::new(width, height);
            }
        }
    }

    fn seed_room(&mut self) -> Result<RoomId, DungeonError> {
        let mut room = self.create_random_room()?;
        room.set_position(
            self.config.width / 2 - room.width() / 2,
            self.config.height / 2 - room.height() / 2,
        );
        let id = self
            .add_room(&room)
            .ok_or(DungeonError::TooFewRooms { placed: 0 })?;
        self.connections.register(id);
        debug!(
            id,
            x = room.x(),
            y = room.y(),
            width = room.width(),
            height = room.height(),
            "seed room placed"
        );
        Ok(id)
    }

    fn grow(&mut self) -> Result<(), DungeonError> {
        let max_rooms = self.config.rooms.max_rooms as usize;
        let mut budget = self
            .config
            .rooms
            .max_rooms
            .saturating_mul(GROW_ITERATIONS_PER_ROOM);
        let mut dropped = 0u32;

        while self.rooms.len() < max_rooms && budget > 0 {
            if !self.generate_room()? {
                dropped += 1;
            }
            budget -= 1;
        }

        debug!(rooms = self.rooms.len(), dropped, "growth finished");
        Ok(())
    }

    /// Create one candidate and try to attach it. Returns false if every
    /// attempt failed and the candidate was dropped.
    fn generate_room(&mut self) -> Result<bool, DungeonError> {
        let mut room = self.create_random_room()?;

        for attempt in 0..MAX_RETRY_COUNT {
            let Some(attachment) = self.find_room_attachment(&room) else {
                return Ok(false);
            };
            room.set_position(attachment.x, attachment.y);

            let Some(id) = self.add_room(&room) else {
                trace!(attempt, x = attachment.x, y = attachment.y, "candidate does not fit");
                continue;
            };

            let joined = self
                .find_door_locations(id, attachment.target, attachment.direction)
                .is_some_and(|(door, target_door)| {
                    self.join(id, attachment.target, door, target_door)
                });
            if joined {
                trace!(id, anchor = attachment.target, direction = %attachment.direction, "room attached");
                return Ok(true);
            }

            trace!(attempt, id, "hallway blocked, candidate rolled back");
            self.remove_room(id);
        }

        Ok(false)
    }

    /// Pick an anchor chamber, a gap and a side, and position `room` flush
    /// against that side with a lateral offset that leaves room for a door
    fn find_room_attachment(&mut self, room: &Room) -> Option<Attachment> {
        let chambers = self.chamber_ids();
        let target = *self.rng.rand_pick(&chambers)?;
        let anchor = self.rooms.get(target)?.bounds();
        let pad = 2 * self.config.door_padding;

        let dist = self.rng.rand_int(MIN_HALL_LENGTH, MAX_HALL_LENGTH, None);
        let direction = self.rng.rand_direction();

        let (x, y) = match direction {
            Direction::North | Direction::South => {
                let x = self.rng.rand_int(
                    anchor.left - (room.width() - 1) + pad,
                    anchor.right - pad,
                    None,
                );
                let y = if direction == Direction::North {
                    anchor.top - room.height() - dist
                } else {
                    anchor.bottom + 1 + dist
                };
                (x, y)
            }
            Direction::West | Direction::East => {
                let y = self.rng.rand_int(
                    anchor.top - (room.height() - 1) + pad,
                    anchor.bottom - pad,
                    None,
                );
                let x = if direction == Direction::West {
                    anchor.left - room.width() - dist
                } else {
                    anchor.right + 1 + dist
                };
                (x, y)
            }
        };

        Some(Attachment {
            x,
            y,
            target,
            direction,
        })
    }

    /// Pick a door on each of the two facing walls, aligned with each other.
    ///
    /// `direction` is the side of `target` that `room` lies on. The door is
    /// drawn from the span both walls share, shrunk by the door padding;
    /// `None` if that span is empty.
    fn find_door_locations(
        &mut self,
        room: RoomId,
        target: RoomId,
        direction: Direction,
    ) -> Option<(TilePos, TilePos)> {
        let a = self.rooms.get(room)?.bounds();
        let b = self.rooms.get(target)?.bounds();
        let p = self.config.door_padding;

        match direction {
            Direction::North | Direction::South => {
                let lo = a.left.max(b.left) + p;
                let hi = a.right.min(b.right) - p;
                if lo > hi {
                    return None;
                }
                let x = self.rng.rand_int(lo, hi, None);
                let (ya, yb) = if direction == Direction::North {
                    (a.bottom, b.top)
                } else {
                    (a.top, b.bottom)
                };
                Some((TilePos::new(x, ya), TilePos::new(x, yb)))
            }
            Direction::West | Direction::East => {
                let lo = a.top.max(b.top) + p;
                let hi = a.bottom.min(b.bottom) - p;
                if lo > hi {
                    return None;
                }
                let y = self.rng.rand_int(lo, hi, None);
                let (xa, xb) = if direction == Direction::West {
                    (a.right, b.left)
                } else {
                    (a.left, b.right)
                };
                Some((TilePos::new(xa, y), TilePos::new(xb, y)))
            }
        }
    }

    /// Build the hallway between two doors (if any is needed), then carve
    /// both doors and connect the two chambers
    fn join(&mut self, a: RoomId, b: RoomId, door_a: TilePos, door_b: TilePos) -> bool {
        if !self.add_hallway(door_a, door_b, [a, b]) {
            return false;
        }
        self.connections.connect(a, b);
        self.add_door(door_a);
        self.add_door(door_b);
        true
    }

    /// Commit the hallway between two aligned doors.
    ///
    /// Doors with no tiles between them need no hallway. A gap shorter than
    /// [`MIN_HALL_LENGTH`] or a hallway that does not fit is a failure.
    fn add_hallway(&mut self, door_a: TilePos, door_b: TilePos, joins: [RoomId; 2]) -> bool {
        let gap = if door_a.x == door_b.x {
            (door_a.y - door_b.y).abs() - 1
        } else if door_a.y == door_b.y {
            (door_a.x - door_b.x).abs() - 1
        } else {
            return false;
        };

        if gap == 0 {
            return true;
        }
        if gap < MIN_HALL_LENGTH {
            return false;
        }

        let Some(mut hallway) = Room::hallway_from_doors(door_a, door_b) else {
            return false;
        };
        hallway.set_joins(joins[0], joins[1]);
        self.add_room(&hallway).is_some()
    }

    /// Commit a copy of `room` if it fits: assign the next id, index its
    /// footprint and turn chambers into battle rooms
    fn add_room(&mut self, room: &Room) -> Option<RoomId> {
        if !self.index.can_fit(&room.bounds()) {
            return None;
        }

        let id = self.rooms.len();
        let mut room = room.clone();
        room.assign_id(id);
        if !room.is_hallway() {
            room.set_room_type(RoomType::Battle);
        }
        self.index.insert(&room);
        self.rooms.push(room);
        Some(id)
    }

    /// Roll back the most recently committed room
    fn remove_room(&mut self, id: RoomId) {
        if self.rooms.last().and_then(Room::id) != Some(id) {
            return;
        }
        if let Some(mut room) = self.rooms.pop() {
            self.index.remove(id, &room.bounds());
            room.clear_id();
        }
    }

    /// Turn the wall tile at a world position into a door in every room
    /// covering it
    fn add_door(&mut self, pos: TilePos) {
        for &id in self.index.rooms_at(pos.x, pos.y) {
            if let Some(room) = self.rooms.get_mut(id) {
                let (x, y) = (pos.x - room.x(), pos.y - room.y());
                room.set_tile(x, y, Tile::Door);
            }
        }
    }

    /// Try to add a few hallways between chambers that are not yet adjacent
    fn close_loops(&mut self) {
        let chambers = self.chamber_ids();
        let mut added = 0;

        for attempt in 0..MAX_RETRY_COUNT {
            if added >= MAX_EXTRA_HALLWAYS {
                break;
            }

            let Some(&a) = self.rng.rand_pick(&chambers) else {
                break;
            };
            let others: Vec<RoomId> = chambers.iter().copied().filter(|&id| id != a).collect();
            let Some(&b) = self.rng.rand_pick(&others) else {
                break;
            };

            if self.connections.are_connected(a, b) {
                continue;
            }

            let (room_a, room_b) = (&self.rooms[a], &self.rooms[b]);
            let direction = if room_a.overlaps_x(room_b) {
                if room_a.top() < room_b.top() {
                    Direction::North
                } else {
                    Direction::South
                }
            } else if room_a.overlaps_y(room_b) {
                if room_a.left() < room_b.left() {
                    Direction::West
                } else {
                    Direction::East
                }
            } else {
                continue;
            };

            let Some((door_a, door_b)) = self.find_door_locations(a, b, direction) else {
                continue;
            };
            if self.rooms[a].is_corner(door_a) || self.rooms[b].is_corner(door_b) {
                continue;
            }

            if self.join(a, b, door_a, door_b) {
                added += 1;
                debug!(attempt, a, b, "loop hallway added");
            }
        }

        debug!(added, "loop closure finished");
    }

    /// Mark item rooms, then pick the start and end rooms.
    ///
    /// Start and end are uniform picks among the chambers that meet their
    /// degree requirement and may replace an item role.
    fn assign_roles(&mut self) -> Result<(RoomId, RoomId), DungeonError> {
        let chambers = self.chamber_ids();

        let mut by_area = chambers.clone();
        by_area.sort_by_key(|&id| self.rooms[id].area());
        for &id in by_area.iter().take(ITEM_ROOM_COUNT) {
            self.set_role(id, RoomType::Item, Tile::Item);
        }

        let starts: Vec<RoomId> = chambers
            .iter()
            .copied()
            .filter(|&id| self.connections.degree(id) >= START_MIN_DEGREE)
            .collect();
        let start = *self
            .rng
            .rand_pick(&starts)
            .ok_or(DungeonError::NoStartRoom {
                min_degree: START_MIN_DEGREE,
            })?;
        self.set_role(start, RoomType::Start, Tile::Start);

        let ends: Vec<RoomId> = chambers
            .iter()
            .copied()
            .filter(|&id| self.connections.degree(id) < END_MAX_DEGREE)
            .collect();
        let end = *self.rng.rand_pick(&ends).ok_or(DungeonError::NoEndRoom {
            max_degree: END_MAX_DEGREE,
        })?;
        self.set_role(end, RoomType::End, Tile::End);

        debug!(
            items = by_area.len().min(ITEM_ROOM_COUNT),
            start,
            start_degree = self.connections.degree(start),
            end,
            "roles assigned"
        );
        Ok((start, end))
    }

    fn set_role(&mut self, id: RoomId, room_type: RoomType, marker: Tile) {
        if let Some(room) = self.rooms.get_mut(id) {
            room.set_room_type(room_type);
            room.mark_center(marker);
        }
    }

    /// Copy every room into the world grid, later rooms on top
    fn flatten(mut self, start: RoomId, end: RoomId) -> Dungeon {
        let mut tiles = Grid::new(
            self.config.width as usize,
            self.config.height as usize,
            Tile::Empty,
        );
        for room in &self.rooms {
            for (x, y, &tile) in room.tiles().iter() {
                tiles.set(room.x() + x, room.y() + y, tile);
            }
        }
        for room in &mut self.rooms {
            room.update_door_positions();
        }

        let hallways = self.rooms.iter().filter(|room| room.is_hallway()).count();
        info!(
            seed = self.rng.seed(),
            rooms = self.rooms.len() - hallways,
            hallways,
            connections = self.connections.edge_count(),
            start,
            end,
            "dungeon generated"
        );

        Dungeon {
            width: self.config.width,
            height: self.config.height,
            seed: self.rng.seed(),
            rooms: self.rooms,
            room_index: self.index,
            connections: self.connections,
            start_room: start,
            end_room: end,
            tiles,
        }
    }
}
