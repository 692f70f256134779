//! Owned 2D grids: the tile grid and the cell-to-room occupancy index

use serde::{Deserialize, Serialize};

use super::geometry::Bounds;
use super::room::{Room, RoomId};

/// A row-major `width` x `height` grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Cell at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.offset(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        self.offset(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite the cell at `(x, y)`. Returns false outside the grid.
    pub fn set(&mut self, x: i32, y: i32, value: T) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> Option<&[T]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on 0; an empty grid has no rows anyway
        self.cells.chunks_exact(self.width.max(1))
    }

    /// Iterate `(x, y, cell)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &T)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as i32, (i / width) as i32, cell))
    }
}

/// Ordered set of room ids covering one cell
///
/// Kept sorted so insertion and removal are binary searches and the first
/// entry is always the lowest id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupants(Vec<RoomId>);

impl Occupants {
    pub fn insert(&mut self, id: RoomId) {
        if let Err(pos) = self.0.binary_search(&id) {
            self.0.insert(pos, id);
        }
    }

    pub fn remove(&mut self, id: RoomId) -> bool {
        match self.0.binary_search(&id) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn first(&self) -> Option<RoomId> {
        self.0.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[RoomId] {
        &self.0
    }
}

/// Index from grid cell to the rooms covering it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomIndex {
    cells: Grid<Occupants>,
}

impl RoomIndex {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::new(width, height, Occupants::default()),
        }
    }

    /// Check if `bounds` lies inside the grid and no indexed room covers any of it
    pub fn can_fit(&self, bounds: &Bounds) -> bool {
        let (width, height) = (self.cells.width() as i32, self.cells.height() as i32);
        if !bounds.within(width, height) {
            return false;
        }
        (bounds.top..=bounds.bottom).all(|y| {
            (bounds.left..=bounds.right)
                .all(|x| self.cells.get(x, y).is_some_and(Occupants::is_empty))
        })
    }

    /// Mark every cell under a committed room as occupied by it
    pub fn insert(&mut self, room: &Room) {
        let Some(id) = room.id() else {
            return;
        };
        self.for_each_cell(&room.bounds(), |cell| cell.insert(id));
    }

    /// Clear a room from every cell under it
    pub fn remove(&mut self, id: RoomId, bounds: &Bounds) {
        self.for_each_cell(bounds, |cell| {
            cell.remove(id);
        });
    }

    fn for_each_cell(&mut self, bounds: &Bounds, mut f: impl FnMut(&mut Occupants)) {
        for y in bounds.top..=bounds.bottom {
            for x in bounds.left..=bounds.right {
                if let Some(cell) = self.cells.get_mut(x, y) {
                    f(cell);
                }
            }
        }
    }

    /// All rooms covering `(x, y)`, lowest id first
    pub fn rooms_at(&self, x: i32, y: i32) -> &[RoomId] {
        self.cells
            .get(x, y)
            .map(Occupants::as_slice)
            .unwrap_or_default()
    }

    /// The lowest-id room covering `(x, y)`
    pub fn first_at(&self, x: i32, y: i32) -> Option<RoomId> {
        self.cells.get(x, y).and_then(Occupants::first)
    }
}
