//! Axial hex coordinates and the board's pixel frame.
//!
//! This module provides the foundational coordinate types for the hex board:
//! - `HexCoord`: identifies individual tiles
//! - `VertexCoord`: identifies corners where settlements are placed
//!
//! The pixel frame matches the renderer the engine was built for: `q` advances
//! down the screen (rows), `r` advances to the right (columns), and hexes are
//! pointy-top so every hex has exactly one corner straight above its center
//! and one straight below. Those two corners are the North and South poles,
//! and every corner of every hex is the pole of exactly one hex - which is
//! what lets us use integer coordinates as vertex identity instead of
//! comparing floating-point positions.

use serde::{Deserialize, Serialize};

/// Circumradius of a hex in pixels (center to corner).
pub const HEX_SIZE: f64 = 60.0;

/// Which pole of its owning hex a vertex is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexDirection {
    /// Corner straight above the hex center
    North,
    /// Corner straight below the hex center
    South,
}

/// Axial coordinate for the hex grid.
///
/// `q` increases going down the screen, `r` increases going right. The third
/// cube coordinate `s` (not stored) satisfies q + r + s = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Row (increases going down)
    pub q: i32,
    /// Column (increases going right, shifted half a hex per row)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Convert to pixel coordinates (center of the hex)
    pub fn to_pixel(&self) -> (f64, f64) {
        let x = HEX_SIZE * (3.0_f64.sqrt() / 2.0 * self.q as f64 + 3.0_f64.sqrt() * self.r as f64);
        let y = HEX_SIZE * (3.0 / 2.0 * self.q as f64);
        (x, y)
    }

    /// Convert pixel coordinates to the hex containing that point
    pub fn from_pixel(x: f64, y: f64) -> Self {
        let q = (2.0 / 3.0 * y) / HEX_SIZE;
        let r = x / (3.0_f64.sqrt() * HEX_SIZE) - q / 2.0;
        Self::axial_round(q, r)
    }

    /// Round fractional axial coordinates to the nearest hex
    fn axial_round(q: f64, r: f64) -> Self {
        let s = -q - r;

        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }

    /// The six corner points of this hex in pixel coordinates.
    ///
    /// Corner `i` lies at angle `60 * i` degrees from the downward vertical,
    /// at distance `HEX_SIZE` from the center, each coordinate rounded to a
    /// whole pixel. Index order matches [`HexCoord::corner_vertices`].
    pub fn corner_points(&self) -> [(f64, f64); 6] {
        let (cx, cy) = self.to_pixel();
        std::array::from_fn(|i| {
            let angle = ((60 * i) as f64).to_radians();
            (
                (cx + HEX_SIZE * angle.sin()).round(),
                (cy + HEX_SIZE * angle.cos()).round(),
            )
        })
    }

    /// The six corners of this hex as canonical vertex coordinates.
    ///
    /// Corner 0 is the hex's own South pole and corner 3 its North pole; the
    /// four slanted corners are poles of neighboring hexes. Index order
    /// matches [`HexCoord::corner_points`].
    pub fn corner_vertices(&self) -> [VertexCoord; 6] {
        let HexCoord { q, r } = *self;
        [
            VertexCoord::new(HexCoord::new(q, r), VertexDirection::South),
            VertexCoord::new(HexCoord::new(q + 1, r), VertexDirection::North),
            VertexCoord::new(HexCoord::new(q - 1, r + 1), VertexDirection::South),
            VertexCoord::new(HexCoord::new(q, r), VertexDirection::North),
            VertexCoord::new(HexCoord::new(q - 1, r), VertexDirection::South),
            VertexCoord::new(HexCoord::new(q + 1, r - 1), VertexDirection::North),
        ]
    }
}

/// Vertex coordinate - a corner where up to 3 hexes meet.
///
/// Each vertex is stored as the North or South pole of the one hex that has
/// it as a pole. This form is already canonical: a North pole sits at pixel
/// row `3q - 2` (in half-`HEX_SIZE` units) and a South pole at `3q + 2`, and
/// no pair of integers q, q' satisfies `3q - 2 == 3q' + 2`, so the same
/// physical corner can never be written both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexCoord {
    /// The hex that has this vertex as a pole
    pub hex: HexCoord,
    /// Which pole of that hex
    pub direction: VertexDirection,
}

impl VertexCoord {
    /// Create a new vertex coordinate
    pub const fn new(hex: HexCoord, direction: VertexDirection) -> Self {
        Self { hex, direction }
    }

    /// The 3 hexes that meet at this vertex.
    ///
    /// The owning hex comes first. On a finite board some of these cells may
    /// not exist; callers filter against the tiles they actually have.
    pub fn touching_hexes(&self) -> [HexCoord; 3] {
        let HexCoord { q, r } = self.hex;
        match self.direction {
            VertexDirection::North => [
                HexCoord::new(q, r),
                HexCoord::new(q - 1, r),
                HexCoord::new(q - 1, r + 1),
            ],
            VertexDirection::South => [
                HexCoord::new(q, r),
                HexCoord::new(q + 1, r),
                HexCoord::new(q + 1, r - 1),
            ],
        }
    }

    /// The 3 vertices one edge away from this one.
    ///
    /// Every neighbor of a North pole is a South pole and vice versa. As with
    /// [`VertexCoord::touching_hexes`], boundary vertices of a finite board
    /// have fewer live neighbors than this full set.
    pub fn adjacent_vertices(&self) -> [VertexCoord; 3] {
        let HexCoord { q, r } = self.hex;
        match self.direction {
            VertexDirection::North => [
                VertexCoord::new(HexCoord::new(q - 1, r), VertexDirection::South),
                VertexCoord::new(HexCoord::new(q - 1, r + 1), VertexDirection::South),
                VertexCoord::new(HexCoord::new(q - 2, r + 1), VertexDirection::South),
            ],
            VertexDirection::South => [
                VertexCoord::new(HexCoord::new(q + 1, r), VertexDirection::North),
                VertexCoord::new(HexCoord::new(q + 1, r - 1), VertexDirection::North),
                VertexCoord::new(HexCoord::new(q + 2, r - 1), VertexDirection::North),
            ],
        }
    }

    /// Display position of this vertex, rounded to a whole pixel.
    ///
    /// Matches the rounding of [`HexCoord::corner_points`], so a tile corner
    /// and the vertex it deduplicates to always land on the same pixel.
    pub fn to_pixel(&self) -> (f64, f64) {
        let (cx, cy) = self.hex.to_pixel();
        let y = match self.direction {
            VertexDirection::North => cy - HEX_SIZE,
            VertexDirection::South => cy + HEX_SIZE,
        };
        (cx.round(), y.round())
    }

    /// Integer sort key reproducing reading order of the display positions.
    ///
    /// The display y of a pole is `HEX_SIZE / 2 * (3q -+ 2)` and the display x
    /// is `HEX_SIZE * sqrt(3) / 2 * (q + 2r)`, so sorting by this key is
    /// exactly sorting by (y, x): top row first, left to right, with no
    /// floats involved.
    pub fn row_major_key(&self) -> (i32, i32) {
        let pole = match self.direction {
            VertexDirection::North => -2,
            VertexDirection::South => 2,
        };
        (3 * self.hex.q + pole, self.hex.q + 2 * self.hex.r)
    }
}
