//! Board generation and the placement graph.
//!
//! This module contains:
//! - Resource and port types
//! - The tile factory and the fairness check driving regeneration
//! - The `Board` aggregate: tiles, vertices, edges, and every query and
//!   placement operation the turn loop uses
//! - A flat snapshot form for rendering and serialization

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{EdgeId, GraphBuilder, TileId, VertexId};
use crate::hex::{HexCoord, VertexCoord};

/// Player identifier (0-3 for a 4-player game)
pub type PlayerId = u8;

/// Grid offsets placing the board inside the renderer's viewport
const OFFSET_Q: i32 = 2;
const OFFSET_R: i32 = 1;

/// Fairness retries before generation reports failure
const MAX_GENERATION_ATTEMPTS: usize = 1000;

/// Hit radius of the pixel lookup operations, in pixels
const PICK_RADIUS: f64 = 10.0;

/// Production numbers and how many tiles carry each (18 total)
const NUMBER_COUNTS: [(u8, usize); 10] = [
    (2, 1),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (8, 2),
    (9, 2),
    (10, 2),
    (11, 2),
    (12, 1),
];

/// Tile resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// The one tile that produces nothing
    Desert,
    Sheep,
    Wheat,
    Ore,
    Wood,
    Brick,
}

impl Resource {
    /// Tile counts of the standard layout (19 total, exactly one desert)
    pub const TILE_COUNTS: [(Resource, usize); 6] = [
        (Resource::Desert, 1),
        (Resource::Sheep, 4),
        (Resource::Wheat, 4),
        (Resource::Ore, 3),
        (Resource::Wood, 4),
        (Resource::Brick, 3),
    ];
}

/// Trading bonus attached to specific boundary vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Port {
    /// Trade any 3 identical cards for 1 of choice
    ThreeForOne,
    Sheep,
    Brick,
    Wood,
    Ore,
    Wheat,
}

impl Port {
    /// Port carried by a 1-based vertex label, if that label is one of the
    /// 18 dock vertices of the standard board (9 docks, 2 vertices each).
    pub fn for_label(label: usize) -> Option<Port> {
        match label {
            2 | 3 | 5 | 7 | 22 | 28 | 51 | 54 => Some(Port::ThreeForOne),
            8 | 12 => Some(Port::Sheep),
            16 | 21 => Some(Port::Brick),
            38 | 43 => Some(Port::Wood),
            39 | 44 => Some(Port::Ore),
            49 | 53 => Some(Port::Wheat),
            _ => None,
        }
    }
}

/// Failure of the generate-validate-retry pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Every attempt produced a layout rejected by the fairness rule
    #[error("No fair board layout found in {attempts} attempts")]
    AttemptsExhausted { attempts: usize },
}

/// Refusal of a placement write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Vertex already has a settlement")]
    VertexOwned,
    #[error("Edge already has a road")]
    EdgeOwned,
}

/// One hex cell of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Position of this tile in the board's tile list
    pub id: TileId,
    /// Grid cell the tile occupies
    pub hex: HexCoord,
    /// What the tile produces
    pub resource: Resource,
    /// Production number, `None` only for the desert
    pub number: Option<u8>,
    /// Display center in pixels
    pub center: (f64, f64),
    /// Corner vertices, ordered like [`HexCoord::corner_points`]
    pub corners: [VertexId; 6],
}

impl Tile {
    /// Display corner points, ordered like the `corners` ids
    pub fn corner_points(&self) -> [(f64, f64); 6] {
        self.hex.corner_points()
    }

    /// Two-die combinations (out of 36) that produce on this tile.
    ///
    /// The desert contributes nothing. Keeping the weight integral makes
    /// score comparisons exact.
    pub fn production_weight(&self) -> u32 {
        match self.number {
            Some(6) | Some(8) => 5,
            Some(5) | Some(9) => 4,
            Some(4) | Some(10) => 3,
            Some(3) | Some(11) => 2,
            Some(2) | Some(12) => 1,
            _ => 0,
        }
    }

    /// Probability that a roll produces on this tile
    pub fn production_chance(&self) -> f64 {
        f64::from(self.production_weight()) / 36.0
    }
}

/// A corner of the board where up to 3 tiles meet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Position of this vertex in the board's vertex list (reading order)
    pub id: VertexId,
    /// Canonical coordinate
    pub coord: VertexCoord,
    /// Display position in pixels
    pub position: (f64, f64),
    /// Port on this vertex, if it is a dock vertex
    pub port: Option<Port>,
    /// Vertices one edge away, ascending
    pub neighbors: Vec<VertexId>,
    /// Tiles touching this vertex (1 at board corners, up to 3 inland)
    pub tiles: Vec<TileId>,
    settlement: Option<PlayerId>,
}

impl Vertex {
    /// 1-based label in reading order
    pub fn label(&self) -> usize {
        self.id.index() + 1
    }

    /// Display form of the label (`v1` through `v54` on the standard board)
    pub fn label_text(&self) -> String {
        format!("v{}", self.label())
    }

    /// Owner of the settlement built here, if any
    pub fn settlement(&self) -> Option<PlayerId> {
        self.settlement
    }
}

/// A segment between two adjacent vertices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Position of this edge in the board's edge list
    pub id: EdgeId,
    /// Endpoint vertices, smaller id first
    pub vertices: [VertexId; 2],
    /// Display midpoint in pixels
    pub midpoint: (f64, f64),
    road: Option<PlayerId>,
}

impl Edge {
    /// True if this edge has the given vertex as an endpoint
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Owner of the road built here, if any
    pub fn road(&self) -> Option<PlayerId> {
        self.road
    }
}

/// A fully generated board: 19 tiles, 54 labeled vertices, 72 edges.
///
/// Collections are fixed in structure after generation; only settlement and
/// road ownership mutates, through [`Board::create_settlement`] and
/// [`Board::create_road`], each written at most once per entity.
#[derive(Debug, Clone)]
pub struct Board {
    tiles: Vec<Tile>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Board {
    // ==================== Generation ====================

    /// Generate a board from thread randomness
    pub fn generate_default() -> Result<Board, GenerationError> {
        Self::generate(&mut rand::thread_rng())
    }

    /// Run the full generate-validate-retry-label pipeline.
    ///
    /// Each attempt draws fresh resource and number sequences from `rng`;
    /// layouts where some vertex touches two tiles numbered in {6, 8} or two
    /// numbered in {2, 12} are discarded. Deterministic for a given RNG
    /// state. Fails only if every attempt was rejected.
    pub fn generate<R: Rng>(rng: &mut R) -> Result<Board, GenerationError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            if let Some(board) = Self::attempt(rng) {
                return Ok(board);
            }
        }
        Err(GenerationError::AttemptsExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// One attempt: build tiles and vertex associations, check fairness,
    /// and finish the graph only on acceptance.
    fn attempt<R: Rng>(rng: &mut R) -> Option<Board> {
        let resources = random_resource_order(rng);
        let mut numbers = random_number_order(rng).into_iter();

        let mut builder = GraphBuilder::new();
        let mut tiles: Vec<Tile> = Vec::with_capacity(resources.len());
        // Tiles touching each provisional vertex, for the fairness check
        let mut touching: Vec<Vec<TileId>> = Vec::new();

        for (hex, resource) in grid_cells().into_iter().zip(resources) {
            let id = TileId(tiles.len());
            let number = match resource {
                Resource::Desert => None,
                _ => numbers.next(),
            };

            let mut corners = [VertexId(0); 6];
            for (slot, coord) in corners.iter_mut().zip(hex.corner_vertices()) {
                let vertex = builder.add_or_reuse_vertex(coord);
                if vertex.index() == touching.len() {
                    touching.push(Vec::new());
                }
                touching[vertex.index()].push(id);
                *slot = vertex;
            }

            tiles.push(Tile {
                id,
                hex,
                resource,
                number,
                center: hex.to_pixel(),
                corners,
            });
        }

        if !numbers_are_fair(&tiles, &touching) {
            return None;
        }

        Some(Self::finalize(tiles, touching, builder))
    }

    /// Order vertices, rewrite provisional ids, assign labels and ports,
    /// and build the edge list.
    fn finalize(mut tiles: Vec<Tile>, touching: Vec<Vec<TileId>>, builder: GraphBuilder) -> Board {
        let finished = builder.finish();

        for tile in &mut tiles {
            for corner in &mut tile.corners {
                *corner = finished.remap[corner.index()];
            }
        }

        let mut vertices: Vec<Vertex> = finished
            .coords
            .iter()
            .enumerate()
            .map(|(i, &coord)| Vertex {
                id: VertexId(i),
                coord,
                position: coord.to_pixel(),
                port: Port::for_label(i + 1),
                neighbors: finished.adjacency[i].clone(),
                tiles: Vec::new(),
                settlement: None,
            })
            .collect();

        for (old, tile_ids) in touching.into_iter().enumerate() {
            vertices[finished.remap[old].index()].tiles = tile_ids;
        }

        let edges: Vec<Edge> = finished
            .edges
            .iter()
            .enumerate()
            .map(|(i, &pair)| {
                let (ax, ay) = vertices[pair[0].index()].position;
                let (bx, by) = vertices[pair[1].index()].position;
                Edge {
                    id: EdgeId(i),
                    vertices: pair,
                    midpoint: ((ax + bx) / 2.0, (ay + by) / 2.0),
                    road: None,
                }
            })
            .collect();

        Board {
            tiles,
            vertices,
            edges,
        }
    }

    // ==================== Query Methods ====================

    /// All tiles, in draw order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All vertices, in reading order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, ordered by endpoint id pair
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up one tile
    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Look up one vertex
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Look up one edge
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// True if the vertex is unowned and none of its neighbors is owned
    /// (the distance rule)
    pub fn is_settleable(&self, vertex: VertexId) -> bool {
        let v = &self.vertices[vertex.index()];
        v.settlement.is_none()
            && v.neighbors
                .iter()
                .all(|n| self.vertices[n.index()].settlement.is_none())
    }

    /// All vertices currently satisfying the distance rule
    pub fn settleable_vertices(&self) -> Vec<VertexId> {
        self.vertices
            .iter()
            .filter(|v| self.is_settleable(v.id))
            .map(|v| v.id)
            .collect()
    }

    /// Unbuilt edges incident to the given vertex
    pub fn open_edges_at(&self, vertex: VertexId) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.road.is_none() && e.touches(vertex))
            .map(|e| e.id)
            .collect()
    }

    // ==================== Placement ====================

    /// Claim a vertex for a player's settlement.
    ///
    /// Write-once: claiming an owned vertex is refused, never overwritten.
    /// The distance rule is the caller's contract (the game engine or the
    /// [`Board::settleable_vertices`] query), not re-checked here.
    pub fn create_settlement(
        &mut self,
        vertex: VertexId,
        player: PlayerId,
    ) -> Result<(), PlacementError> {
        let v = &mut self.vertices[vertex.index()];
        if v.settlement.is_some() {
            return Err(PlacementError::VertexOwned);
        }
        v.settlement = Some(player);
        Ok(())
    }

    /// Claim an edge for a player's road. Write-once, like
    /// [`Board::create_settlement`].
    pub fn create_road(&mut self, edge: EdgeId, player: PlayerId) -> Result<(), PlacementError> {
        let e = &mut self.edges[edge.index()];
        if e.road.is_some() {
            return Err(PlacementError::EdgeOwned);
        }
        e.road = Some(player);
        Ok(())
    }

    // ==================== Pixel Lookups ====================

    /// The tile containing the given pixel position, if any
    pub fn tile_at(&self, x: f64, y: f64) -> Option<TileId> {
        let hex = HexCoord::from_pixel(x, y);
        self.tiles.iter().find(|t| t.hex == hex).map(|t| t.id)
    }

    /// The settleable vertex nearest the given position, within the pick
    /// radius
    pub fn settleable_vertex_near(&self, x: f64, y: f64) -> Option<VertexId> {
        self.vertices
            .iter()
            .filter(|v| self.is_settleable(v.id))
            .map(|v| (v.id, distance(v.position, (x, y))))
            .filter(|&(_, d)| d <= PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// The unbuilt edge whose midpoint is nearest the given position, within
    /// the pick radius
    pub fn open_edge_near(&self, x: f64, y: f64) -> Option<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.road.is_none())
            .map(|e| (e.id, distance(e.midpoint, (x, y))))
            .filter(|&(_, d)| d <= PICK_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    // ==================== Snapshot ====================

    /// Flat, JSON-friendly view of the whole board for renderers and
    /// other clients that work in pixels and indices rather than ids.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tiles: self
                .tiles
                .iter()
                .map(|t| TileSnapshot {
                    resource: t.resource,
                    number: t.number,
                    center: t.center,
                    corners: t.corner_points(),
                })
                .collect(),
            vertices: self
                .vertices
                .iter()
                .map(|v| VertexSnapshot {
                    label: v.label_text(),
                    position: v.position,
                    port: v.port,
                    neighbors: v.neighbors.iter().map(|n| n.index()).collect(),
                    tiles: v.tiles.iter().map(|t| t.index()).collect(),
                    settlement: v.settlement,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeSnapshot {
                    vertices: [e.vertices[0].index(), e.vertices[1].index()],
                    midpoint: e.midpoint,
                    road: e.road,
                })
                .collect(),
        }
    }
}

/// The 19 grid cells of the standard board, in draw order.
///
/// A 5x5 axial block with the two extreme diagonals cut off, shifted by the
/// viewport offsets.
fn grid_cells() -> Vec<HexCoord> {
    let mut cells = Vec::with_capacity(19);
    for q in 0..5 {
        for r in 0..5 {
            if (2..=6).contains(&(q + r)) {
                cells.push(HexCoord::new(q + OFFSET_Q, r + OFFSET_R));
            }
        }
    }
    cells
}

/// Shuffled resource sequence for one attempt (desert exactly once)
fn random_resource_order<R: Rng>(rng: &mut R) -> Vec<Resource> {
    let mut resources = Vec::with_capacity(19);
    for (resource, count) in Resource::TILE_COUNTS {
        for _ in 0..count {
            resources.push(resource);
        }
    }
    resources.shuffle(rng);
    resources
}

/// Shuffled production-number sequence for one attempt (18 numbers; the
/// desert draws none)
fn random_number_order<R: Rng>(rng: &mut R) -> Vec<u8> {
    let mut numbers = Vec::with_capacity(18);
    for (number, count) in NUMBER_COUNTS {
        for _ in 0..count {
            numbers.push(number);
        }
    }
    numbers.shuffle(rng);
    numbers
}

/// Fairness rule: no vertex may touch two tiles numbered in {6, 8}, nor two
/// numbered in {2, 12}.
fn numbers_are_fair(tiles: &[Tile], touching: &[Vec<TileId>]) -> bool {
    for tile_ids in touching {
        let mut high = 0; // 6s and 8s
        let mut low = 0; // 2s and 12s
        for id in tile_ids {
            match tiles[id.index()].number {
                Some(6) | Some(8) => high += 1,
                Some(2) | Some(12) => low += 1,
                _ => {}
            }
        }
        if high > 1 || low > 1 {
            return false;
        }
    }
    true
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

// ==================== Snapshot Types ====================

/// Serializable view of one tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub resource: Resource,
    pub number: Option<u8>,
    pub center: (f64, f64),
    pub corners: [(f64, f64); 6],
}

/// Serializable view of one vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexSnapshot {
    pub label: String,
    pub position: (f64, f64),
    pub port: Option<Port>,
    pub neighbors: Vec<usize>,
    pub tiles: Vec<usize>,
    pub settlement: Option<PlayerId>,
}

/// Serializable view of one edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub vertices: [usize; 2],
    pub midpoint: (f64, f64),
    pub road: Option<PlayerId>,
}

/// Flat board view handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tiles: Vec<TileSnapshot>,
    pub vertices: Vec<VertexSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl BoardSnapshot {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
