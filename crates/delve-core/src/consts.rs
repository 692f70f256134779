//! Generation constants

/// Minimum width of any chamber, regardless of configuration
pub const MIN_ROOM_WIDTH: i32 = 3;

/// Minimum height of any chamber, regardless of configuration
pub const MIN_ROOM_HEIGHT: i32 = 3;

/// Shortest gap (in tiles) that gets a hallway between two doors
pub const MIN_HALL_LENGTH: i32 = 2;

/// Longest gap (in tiles) used when attaching a new room to an anchor
pub const MAX_HALL_LENGTH: i32 = 8;

/// Placement attempts per candidate room, and loop-closure attempts
pub const MAX_RETRY_COUNT: u32 = 150;

/// Outer growth iterations per requested room
pub const GROW_ITERATIONS_PER_ROOM: u32 = 5;

/// Extra hallways added after growth to form loops
pub const MAX_EXTRA_HALLWAYS: u32 = 3;

/// Number of smallest chambers turned into item rooms
pub const ITEM_ROOM_COUNT: usize = 5;

/// The start room needs at least this many connections
pub const START_MIN_DEGREE: usize = 3;

/// The end room needs fewer than this many connections
pub const END_MAX_DEGREE: usize = 2;

/// Fewer chambers than this is not a usable dungeon
pub const MIN_VIABLE_ROOMS: usize = 2;

/// Largest accepted grid width or height
pub const MAX_GRID_SIZE: i32 = 4096;
