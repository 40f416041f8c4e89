//! Vertex interning and the finalize step of board construction.
//!
//! During generation every tile reports its six corners, and corners shared
//! by neighboring tiles must collapse to a single vertex. `GraphBuilder`
//! interns corner coordinates into dense provisional ids; [`GraphBuilder::finish`]
//! renumbers them into reading order and derives the adjacency and edge lists
//! the board keeps for placement queries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::hex::VertexCoord;

/// Dense id of a tile on a finished board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub(crate) usize);

impl TileId {
    /// Position of this tile in the board's tile list
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense id of a vertex on a finished board.
///
/// Ids follow reading order of the display positions (top row first, left to
/// right), so `VertexId(0)` is the topmost-leftmost corner of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of this vertex in the board's vertex list
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense id of an edge on a finished board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    /// Position of this edge in the board's edge list
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interns tile corners into shared vertices during board generation.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    coords: Vec<VertexCoord>,
    ids: HashMap<VertexCoord, VertexId>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct vertices interned so far
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// True if no vertex has been interned yet
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Intern a corner, returning the existing id when it was already seen.
    ///
    /// Ids handed out here are provisional (insertion order); `finish`
    /// reports how they map to final reading-order ids.
    pub fn add_or_reuse_vertex(&mut self, coord: VertexCoord) -> VertexId {
        if let Some(&id) = self.ids.get(&coord) {
            return id;
        }
        let id = VertexId(self.coords.len());
        self.coords.push(coord);
        self.ids.insert(coord, id);
        id
    }

    /// Renumber vertices into reading order and derive adjacency and edges.
    ///
    /// Adjacency lists hold only vertices that were actually interned, in
    /// ascending id order. Each edge appears once as `[a, b]` with `a < b`,
    /// and the edge list is ordered by that pair.
    pub fn finish(self) -> FinishedGraph {
        let GraphBuilder { coords, ids } = self;

        let mut order: Vec<usize> = (0..coords.len()).collect();
        order.sort_by_key(|&i| coords[i].row_major_key());

        let mut remap = vec![VertexId(0); coords.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = VertexId(new);
        }

        let sorted: Vec<VertexCoord> = order.iter().map(|&i| coords[i]).collect();

        let mut adjacency: Vec<Vec<VertexId>> = Vec::with_capacity(sorted.len());
        for coord in &sorted {
            let mut neighbors: Vec<VertexId> = coord
                .adjacent_vertices()
                .iter()
                .filter_map(|n| ids.get(n).map(|&old| remap[old.0]))
                .collect();
            neighbors.sort();
            adjacency.push(neighbors);
        }

        let mut edges = Vec::new();
        for (i, neighbors) in adjacency.iter().enumerate() {
            let a = VertexId(i);
            for &b in neighbors {
                if a < b {
                    edges.push([a, b]);
                }
            }
        }

        FinishedGraph {
            coords: sorted,
            adjacency,
            edges,
            remap,
        }
    }
}

/// Output of [`GraphBuilder::finish`].
///
/// `remap` translates the provisional ids handed out during interning into
/// final reading-order ids; everything else is already in final order.
#[derive(Debug)]
pub struct FinishedGraph {
    /// Vertex coordinates indexed by final id
    pub coords: Vec<VertexCoord>,
    /// Neighbor ids per vertex, ascending
    pub adjacency: Vec<Vec<VertexId>>,
    /// Distinct edges as `[a, b]` with `a < b`, lexicographically ordered
    pub edges: Vec<[VertexId; 2]>,
    /// Provisional id index to final id
    pub remap: Vec<VertexId>,
}
