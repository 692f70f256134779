//! delve-core: procedural dungeon generation
//!
//! Builds grid-based dungeon levels out of rectangular rooms joined by
//! straight hallways. Generation is deterministic for a given seed and
//! configuration, and the crate does no I/O of its own.
//!
//! ```no_run
//! use delve_core::{Dungeon, dungeon::DungeonConfig};
//!
//! let config = DungeonConfig::default().with_seed(42);
//! let dungeon = Dungeon::generate(&config)?;
//! println!("{dungeon}");
//! # Ok::<(), delve_core::DungeonError>(())
//! ```

mod consts;
pub mod dungeon;
mod error;
pub mod rng;

pub use consts::*;
pub use dungeon::Dungeon;
pub use error::DungeonError;
pub use rng::{DungeonRng, Parity};
