//! Plain-text map rendering

use std::fmt;

use serde::{Deserialize, Serialize};

use super::layout::Dungeon;
use super::tile::Tile;

/// Characters used when drawing a map. Defaults to [`Tile::symbol`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSymbols {
    pub empty: char,
    pub wall: char,
    pub floor: char,
    pub door: char,
    pub start: char,
    pub end: char,
    pub item: char,
    /// Put a space after every tile so the map looks square in a terminal
    pub spaced: bool,
}

impl Default for MapSymbols {
    fn default() -> Self {
        Self {
            empty: Tile::Empty.symbol(),
            wall: Tile::Wall.symbol(),
            floor: Tile::Floor.symbol(),
            door: Tile::Door.symbol(),
            start: Tile::Start.symbol(),
            end: Tile::End.symbol(),
            item: Tile::Item.symbol(),
            spaced: true,
        }
    }
}

impl MapSymbols {
    pub fn symbol(&self, tile: Tile) -> char {
        match tile {
            Tile::Empty => self.empty,
            Tile::Wall => self.wall,
            Tile::Floor => self.floor,
            Tile::Door => self.door,
            Tile::Start => self.start,
            Tile::End => self.end,
            Tile::Item => self.item,
        }
    }
}

impl Dungeon {
    /// Draw the flattened tiles, one text line per row
    pub fn render_ascii(&self, symbols: &MapSymbols) -> String {
        let mut out = String::new();
        for row in self.tiles.rows() {
            for &tile in row {
                out.push(symbols.symbol(tile));
                if symbols.spaced {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Dungeon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_ascii(&MapSymbols::default()))
    }
}
