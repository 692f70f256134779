//! Error types for dungeon generation

use thiserror::Error;

/// Errors surfaced by configuration, room construction and generation.
///
/// Recoverable conditions during generation (a candidate that does not fit,
/// a loop hallway that cannot be built) are retried or skipped internally
/// and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DungeonError {
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error(
        "grid {grid_width}x{grid_height} cannot hold the smallest room ({min_width}x{min_height})"
    )]
    GridTooSmall {
        grid_width: i32,
        grid_height: i32,
        min_width: i32,
        min_height: i32,
    },

    #[error("room of {width}x{height} is smaller than the 3x3 minimum")]
    RoomTooSmall { width: i32, height: i32 },

    #[error("generation placed only {placed} room(s); at least 2 are required")]
    TooFewRooms { placed: usize },

    #[error("no room has {min_degree} or more connections to serve as the start room")]
    NoStartRoom { min_degree: usize },

    #[error("no room has fewer than {max_degree} connections to serve as the end room")]
    NoEndRoom { max_degree: usize },
}

impl DungeonError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DungeonError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
