//! Dungeon generation configuration
//!
//! Every field has a default, and partial JSON documents are merged over the
//! defaults field by field (including inside the room size ranges).

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::{MAX_GRID_SIZE, MIN_ROOM_HEIGHT, MIN_ROOM_WIDTH};
use crate::error::DungeonError;
use crate::rng::Parity;

/// Inclusive size range with an optional parity restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: i32,
    pub max: i32,
    pub parity: Option<Parity>,
}

impl SizeRange {
    pub const fn new(min: i32, max: i32, parity: Option<Parity>) -> Self {
        Self { min, max, parity }
    }

    /// Default chamber widths: odd values 7..=21
    pub const fn default_width() -> Self {
        Self::new(7, 21, Some(Parity::Odd))
    }

    /// Default chamber heights: odd values 7..=17
    pub const fn default_height() -> Self {
        Self::new(7, 17, Some(Parity::Odd))
    }

    /// Smallest value [`crate::DungeonRng::rand_int`] can return for this range
    pub fn smallest(&self) -> i32 {
        match self.parity {
            Some(parity) if !parity.matches(self.min) && self.min < self.max => self.min + 1,
            _ => self.min,
        }
    }
}

/// Room generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    #[serde(deserialize_with = "width_range")]
    pub width: SizeRange,
    #[serde(deserialize_with = "height_range")]
    pub height: SizeRange,
    /// Largest chamber area in tiles, walls included
    pub max_area: i32,
    /// Room budget; hallways count towards it
    pub max_rooms: u32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: SizeRange::default_width(),
            height: SizeRange::default_height(),
            max_area: 250,
            max_rooms: 50,
        }
    }
}

/// Top-level generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Grid width in tiles
    pub width: i32,
    /// Grid height in tiles
    pub height: i32,
    /// Seed for reproducible layouts; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Tiles kept between a door and the corners of the walls it sits on
    pub door_padding: i32,
    pub rooms: RoomConfig,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 55,
            height: 55,
            seed: None,
            door_padding: 1,
            rooms: RoomConfig::default(),
        }
    }
}

impl DungeonConfig {
    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Same configuration with a different room budget
    pub fn with_max_rooms(mut self, max_rooms: u32) -> Self {
        self.rooms.max_rooms = max_rooms;
        self
    }

    /// Clamp the configuration into a generatable shape.
    ///
    /// Room minimums are raised to 3x3, maximums to at least the minimums and
    /// at most the grid size, `max_area` to at least the smallest sampleable
    /// room and `door_padding` into `1..=max(width, height)`.
    ///
    /// # Errors
    /// [`DungeonError::InvalidConfig`] for grid dimensions outside
    /// `1..=MAX_GRID_SIZE` or a zero room budget,
    /// [`DungeonError::GridTooSmall`] when the grid cannot hold the smallest
    /// room.
    pub fn normalized(&self) -> Result<DungeonConfig, DungeonError> {
        if self.width <= 0 {
            return Err(DungeonError::invalid("width", format!("must be positive, got {}", self.width)));
        }
        if self.height <= 0 {
            return Err(DungeonError::invalid("height", format!("must be positive, got {}", self.height)));
        }
        if self.width > MAX_GRID_SIZE {
            return Err(DungeonError::invalid(
                "width",
                format!("must be at most {MAX_GRID_SIZE}, got {}", self.width),
            ));
        }
        if self.height > MAX_GRID_SIZE {
            return Err(DungeonError::invalid(
                "height",
                format!("must be at most {MAX_GRID_SIZE}, got {}", self.height),
            ));
        }
        if self.rooms.max_rooms == 0 {
            return Err(DungeonError::invalid("rooms.max_rooms", "must be at least 1"));
        }

        let mut config = self.clone();

        if config.door_padding < 1 {
            tracing::warn!(door_padding = config.door_padding, "door padding raised to 1");
            config.door_padding = 1;
        }
        let max_padding = config.width.max(config.height);
        if config.door_padding > max_padding {
            tracing::warn!(
                door_padding = config.door_padding,
                max_padding,
                "door padding lowered to the grid size"
            );
            config.door_padding = max_padding;
        }

        let rooms = &mut config.rooms;
        rooms.width = clamp_range("rooms.width", rooms.width, MIN_ROOM_WIDTH, config.width);
        rooms.height = clamp_range("rooms.height", rooms.height, MIN_ROOM_HEIGHT, config.height);

        if rooms.width.min > config.width || rooms.height.min > config.height {
            return Err(DungeonError::GridTooSmall {
                grid_width: config.width,
                grid_height: config.height,
                min_width: rooms.width.min,
                min_height: rooms.height.min,
            });
        }

        let min_area = rooms.width.smallest() * rooms.height.smallest();
        if rooms.max_area < min_area {
            tracing::warn!(max_area = rooms.max_area, min_area, "max area raised to the smallest room");
            rooms.max_area = min_area;
        }

        Ok(config)
    }
}

fn clamp_range(field: &'static str, range: SizeRange, floor: i32, grid: i32) -> SizeRange {
    let mut clamped = range;
    clamped.min = clamped.min.max(floor);
    clamped.max = clamped.max.max(clamped.min);
    if clamped.min <= grid {
        clamped.max = clamped.max.min(grid);
    }
    if clamped != range {
        tracing::warn!(
            field,
            from_min = range.min,
            from_max = range.max,
            to_min = clamped.min,
            to_max = clamped.max,
            "room size range clamped"
        );
    }
    clamped
}

/// Partially specified [`SizeRange`]; absent fields keep their defaults
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SizeRangePatch {
    min: Option<i32>,
    max: Option<i32>,
    /// Absent: keep; `null`: no restriction; `"even"`/`"odd"`: restrict
    #[serde(deserialize_with = "present_parity")]
    parity: Option<Option<Parity>>,
}

impl SizeRangePatch {
    fn apply(self, base: SizeRange) -> SizeRange {
        SizeRange {
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
            parity: self.parity.unwrap_or(base.parity),
        }
    }
}

fn present_parity<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<Parity>>, D::Error> {
    Option::<Parity>::deserialize(d).map(Some)
}

fn width_range<'de, D: Deserializer<'de>>(d: D) -> Result<SizeRange, D::Error> {
    SizeRangePatch::deserialize(d).map(|patch| patch.apply(SizeRange::default_width()))
}

fn height_range<'de, D: Deserializer<'de>>(d: D) -> Result<SizeRange, D::Error> {
    SizeRangePatch::deserialize(d).map(|patch| patch.apply(SizeRange::default_height()))
}
