//! Collision detection for oriented rectangles
//!
//! Two phases:
//! - Broad: a conservative axis-aligned box per collider, cheap to compare.
//! - Narrow: the separating axis theorem over the polygons' edge normals.
//!
//! Everything here is pure; interaction policy lives in `interaction`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Edges shorter than this produce no separating axis
const MIN_EDGE_LENGTH: f32 = 1e-6;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Square box of half-side `radius` around `center`
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            left: center.x - radius,
            right: center.x + radius,
            top: center.y - radius,
            bottom: center.y + radius,
        }
    }

    /// Strict overlap; boxes that only touch do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Anything that can take part in a collision query
pub trait Collider {
    /// World-space polygon, in winding order. May be empty.
    fn vertices(&self) -> Vec<Vec2>;

    /// Conservative box that contains the polygon
    fn broad_bounds(&self) -> Aabb;
}

/// A free-standing oriented box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub rotation: f32,
}

impl Obb {
    pub fn new(center: Vec2, size: Vec2, rotation: f32) -> Self {
        Self {
            center,
            half_extents: size.max(Vec2::ZERO) / 2.0,
            rotation,
        }
    }

    /// Box from a top-left corner and size, unrotated
    pub fn from_rect(top_left: Vec2, size: Vec2) -> Self {
        Self::new(top_left + size / 2.0, size, 0.0)
    }
}

impl Collider for Obb {
    fn vertices(&self) -> Vec<Vec2> {
        let h = self.half_extents;
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
        .into_iter()
        .map(|v| crate::rotate_about(self.center, self.rotation, v))
        .collect()
    }

    fn broad_bounds(&self) -> Aabb {
        Aabb::around(self.center, self.half_extents.length())
    }
}

/// One edge of the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

impl Wall {
    /// Vertical walls reflect X, horizontal walls reflect Y
    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }
}

/// The rectangle entities must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            left: (CANVAS_WIDTH - PLAY_WIDTH) / 2.0,
            right: (CANVAS_WIDTH + PLAY_WIDTH) / 2.0,
            top: 0.0,
            bottom: CANVAS_HEIGHT,
        }
    }
}

impl PlayArea {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Which wall, if any, an axis-aligned extent has crossed.
///
/// Checks left, right, top, bottom in that order and reports the first hit.
pub fn boundary_check(top_left: Vec2, size: Vec2, area: &PlayArea) -> Option<Wall> {
    if top_left.x < area.left {
        Some(Wall::Left)
    } else if top_left.x + size.x > area.right {
        Some(Wall::Right)
    } else if top_left.y < area.top {
        Some(Wall::Top)
    } else if top_left.y + size.y > area.bottom {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Cheap conservative pre-check; never rejects a true overlap
#[inline]
pub fn broad_overlap(a: &impl Collider, b: &impl Collider) -> bool {
    a.broad_bounds().overlaps(&b.broad_bounds())
}

/// Exact convex polygon overlap via the separating axis theorem
pub fn narrow_overlap(a: &impl Collider, b: &impl Collider) -> bool {
    polygons_overlap(&a.vertices(), &b.vertices())
}

/// Broad phase, then SAT only if the broad boxes touch
pub fn check_aabb(a: &impl Collider, b: &impl Collider) -> bool {
    if !broad_overlap(a, b) {
        return false;
    }
    narrow_overlap(a, b)
}

/// SAT over two vertex lists. Touching counts as overlap.
///
/// A polygon with no edge of non-zero length never collides.
pub fn polygons_overlap(poly_a: &[Vec2], poly_b: &[Vec2]) -> bool {
    let axes_a: Vec<Vec2> = edge_normals(poly_a).collect();
    let axes_b: Vec<Vec2> = edge_normals(poly_b).collect();
    if axes_a.is_empty() || axes_b.is_empty() {
        return false;
    }

    axes_a.iter().chain(&axes_b).all(|&axis| {
        let (min_a, max_a) = project(poly_a, axis);
        let (min_b, max_b) = project(poly_b, axis);
        max_a >= min_b && max_b >= min_a
    })
}

/// Project a polygon onto an axis, returning (min, max)
pub fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), d| {
            (min.min(d), max.max(d))
        })
}

/// Unit normals of every edge, skipping degenerate (coincident-vertex) edges
pub fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = vertices.len();
    (0..n).filter_map(move |i| {
        let edge = vertices[(i + 1) % n] - vertices[i];
        let length = edge.length();
        if length < MIN_EDGE_LENGTH {
            return None;
        }
        Some(Vec2::new(-edge.y, edge.x) / length)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Obb {
        Obb::from_rect(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_boundary_order_left_first() {
        let area = PlayArea {
            left: 0.0,
            right: 100.0,
            top: 0.0,
            bottom: 100.0,
        };
        // Crosses left and top at once - left wins
        let hit = boundary_check(Vec2::new(-5.0, -5.0), Vec2::splat(10.0), &area);
        assert_eq!(hit, Some(Wall::Left));
        // Crosses right and bottom - right wins
        let hit = boundary_check(Vec2::new(95.0, 95.0), Vec2::splat(10.0), &area);
        assert_eq!(hit, Some(Wall::Right));
        let hit = boundary_check(Vec2::new(50.0, 95.0), Vec2::splat(10.0), &area);
        assert_eq!(hit, Some(Wall::Bottom));
        let hit = boundary_check(Vec2::new(50.0, 50.0), Vec2::splat(10.0), &area);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_separated_rects_miss() {
        assert!(!check_aabb(&rect(0.0, 0.0, 10.0, 10.0), &rect(30.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_broad_passes_but_sat_rejects() {
        // Diagonal neighbours: broad boxes (from the diagonal) overlap, shapes don't
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(11.0, 11.0, 10.0, 10.0);
        assert!(broad_overlap(&a, &b));
        assert!(!narrow_overlap(&a, &b));
        assert!(!check_aabb(&a, &b));
    }

    #[test]
    fn test_rotated_diamond_gap() {
        // A 45° diamond next to a box: corner gaps are only visible on the diamond's axes
        let diamond = Obb::new(Vec2::new(0.0, 0.0), Vec2::splat(10.0), FRAC_PI_4);
        let boxed = rect(5.5, 5.5, 10.0, 10.0);
        assert!(!check_aabb(&diamond, &boxed));
        let touching = rect(2.0, -5.0, 10.0, 10.0);
        assert!(check_aabb(&diamond, &touching));
    }

    #[test]
    fn test_degenerate_polygons_never_collide() {
        let solid = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!polygons_overlap(&[], &solid.vertices()));
        assert!(!polygons_overlap(&[Vec2::new(5.0, 5.0)], &solid.vertices()));
        // Four coincident vertices: every edge is zero length
        let collapsed = [Vec2::splat(5.0); 4];
        assert!(!polygons_overlap(&collapsed, &solid.vertices()));
        assert!(!polygons_overlap(&solid.vertices(), &collapsed));
        // Two coincident points inside the other polygon
        assert!(!polygons_overlap(&[Vec2::splat(5.0); 2], &solid.vertices()));
    }

    #[test]
    fn test_edge_normals_are_unit() {
        let verts = Obb::new(Vec2::ZERO, Vec2::new(30.0, 4.0), 0.3).vertices();
        for n in edge_normals(&verts) {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        assert_eq!(edge_normals(&verts).count(), 4);
    }

    #[test]
    fn test_project() {
        let verts = rect(2.0, 3.0, 4.0, 5.0).vertices();
        let (min, max) = project(&verts, Vec2::X);
        assert!((min - 2.0).abs() < 1e-5);
        assert!((max - 6.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_axis_aligned_matches_interval_overlap(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            aw in 1.0f32..80.0, ah in 1.0f32..80.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0,
            bw in 1.0f32..80.0, bh in 1.0f32..80.0,
        ) {
            // Signed separation per axis: negative means the intervals overlap
            let gap_x = (bx - (ax + aw)).max(ax - (bx + bw));
            let gap_y = (by - (ay + ah)).max(ay - (by + bh));
            // Stay clear of the touching case where float rounding decides
            prop_assume!(gap_x.abs() > 0.01 && gap_y.abs() > 0.01);

            let expected = gap_x < 0.0 && gap_y < 0.0;
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(check_aabb(&a, &b), expected);
        }

        #[test]
        fn prop_sat_is_reflexive(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            size in 1.0f32..100.0,
            rotation in -10.0f32..10.0,
        ) {
            let shape = Obb::new(Vec2::new(x, y), Vec2::splat(size), rotation);
            let copy = shape;
            prop_assert!(check_aabb(&shape, &copy));
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -50.0f32..50.0, ay in -50.0f32..50.0, ar in -3.2f32..3.2,
            bx in -50.0f32..50.0, by in -50.0f32..50.0, br in -3.2f32..3.2,
        ) {
            let a = Obb::new(Vec2::new(ax, ay), Vec2::new(30.0, 8.0), ar);
            let b = Obb::new(Vec2::new(bx, by), Vec2::new(20.0, 20.0), br);
            prop_assert_eq!(check_aabb(&a, &b), check_aabb(&b, &a));
        }
    }
}
