//! Room connectivity
//!
//! Undirected adjacency between chamber ids. An edge is added whenever a
//! hallway (or a direct door-to-door opening) joins two chambers, always in
//! both directions.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::room::RoomId;

/// Symmetric adjacency map keyed by room id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionGraph {
    adjacency: BTreeMap<RoomId, Vec<RoomId>>,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room with no connections (no-op if already present)
    pub fn register(&mut self, id: RoomId) {
        self.adjacency.entry(id).or_default();
    }

    /// Connect two rooms in both directions. Duplicate edges and self-loops
    /// are ignored; returns true if a new edge was added.
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || self.are_connected(a, b) {
            return false;
        }
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        true
    }

    /// Check if two rooms share an edge
    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }

    /// Neighbors in the order their edges were added
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn degree(&self, id: RoomId) -> usize {
        self.neighbors(id).len()
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Registered room ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// All rooms reachable from `root` (breadth-first), `root` included
    pub fn reachable_from(&self, root: RoomId) -> BTreeSet<RoomId> {
        let mut seen = BTreeSet::new();
        if !self.contains(root) {
            return seen;
        }
        let mut queue = VecDeque::from([root]);
        seen.insert(root);
        while let Some(id) = queue.pop_front() {
            for &n in self.neighbors(id) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen
    }

    /// Check if every registered room is reachable from every other
    pub fn all_connected(&self) -> bool {
        match self.ids().next() {
            None => true,
            Some(first) => self.reachable_from(first).len() == self.len(),
        }
    }

    /// Check that every edge is stored in both directions
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(&a, neighbors)| {
            neighbors.iter().all(|&b| self.are_connected(b, a))
        })
    }
}
