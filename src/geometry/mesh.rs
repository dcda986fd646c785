//! Local-space tessellation of solids and line segments.
//!
//! Solids are emitted as triangles wound counter-clockwise when seen from outside, so the
//! right-hand normal `(b - a) x (c - a)` points away from the surface.

use std::f64::consts::{PI, TAU};

use glam::{DMat4, DVec3};

/// Squared cross-product length below which a triangle is treated as degenerate.
const DEGENERATE_AREA2: f64 = 1e-20;

/// Pending triangles between a solid command and its draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    triangles: Vec<[DVec3; 3]>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one triangle as given.
    pub fn push_triangle(&mut self, tri: [DVec3; 3]) {
        self.triangles.push(tri);
    }

    /// Borrow every triangle.
    pub fn triangles(&self) -> &[[DVec3; 3]] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// `true` when no triangles are pending.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Drop every triangle, keeping the allocation.
    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    /// Map every vertex through `m` in place.
    pub fn transform(&mut self, m: &DMat4) {
        for tri in &mut self.triangles {
            for p in tri.iter_mut() {
                *p = m.transform_point3(*p);
            }
        }
    }

    /// Append a triangle, flipping its winding if needed so the normal faces away from
    /// `inside`. Degenerate triangles are dropped.
    fn push_facing_out(&mut self, mut tri: [DVec3; 3], inside: DVec3) {
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        if normal.length_squared() <= DEGENERATE_AREA2 {
            return;
        }
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        if normal.dot(centroid - inside) < 0.0 {
            tri.swap(1, 2);
        }
        self.triangles.push(tri);
    }
}

/// Pending line segments between a `line` command and its draw call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeList {
    edges: Vec<[DVec3; 2]>,
}

impl EdgeList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow every segment.
    pub fn edges(&self) -> &[[DVec3; 2]] {
        &self.edges
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// `true` when no segments are pending.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drop every segment.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Map every endpoint through `m` in place.
    pub fn transform(&mut self, m: &DMat4) {
        for edge in &mut self.edges {
            for p in edge.iter_mut() {
                *p = m.transform_point3(*p);
            }
        }
    }
}

/// Append one segment.
pub fn add_edge(edges: &mut EdgeList, from: DVec3, to: DVec3) {
    edges.edges.push([from, to]);
}

/// Append a box whose front-top-left corner is `corner`, spanning `size.x` along +x,
/// `size.y` along -y and `size.z` along -z.
pub fn add_box(mesh: &mut TriangleMesh, corner: DVec3, size: DVec3) {
    let (x0, y0, z0) = (corner.x, corner.y, corner.z);
    let (x1, y1, z1) = (x0 + size.x, y0 - size.y, z0 - size.z);
    let inside = DVec3::new((x0 + x1) / 2.0, (y0 + y1) / 2.0, (z0 + z1) / 2.0);

    let v = DVec3::new;
    let quads = [
        // front (+z)
        [v(x0, y1, z0), v(x1, y1, z0), v(x1, y0, z0), v(x0, y0, z0)],
        // back (-z)
        [v(x0, y1, z1), v(x0, y0, z1), v(x1, y0, z1), v(x1, y1, z1)],
        // top (+y)
        [v(x0, y0, z0), v(x1, y0, z0), v(x1, y0, z1), v(x0, y0, z1)],
        // bottom (-y)
        [v(x0, y1, z1), v(x1, y1, z1), v(x1, y1, z0), v(x0, y1, z0)],
        // right (+x)
        [v(x1, y1, z0), v(x1, y1, z1), v(x1, y0, z1), v(x1, y0, z0)],
        // left (-x)
        [v(x0, y1, z1), v(x0, y1, z0), v(x0, y0, z0), v(x0, y0, z1)],
    ];

    for [a, b, c, d] in quads {
        mesh.push_facing_out([a, b, c], inside);
        mesh.push_facing_out([a, c, d], inside);
    }
}

/// Append a sphere tessellated into `step` latitude bands and `step` longitude slices.
pub fn add_sphere(mesh: &mut TriangleMesh, center: DVec3, radius: f64, step: u32) {
    let step = step.max(3);
    let point = |band: u32, slice: u32| {
        let phi = PI * f64::from(band) / f64::from(step);
        let theta = TAU * f64::from(slice % step) / f64::from(step);
        center
            + radius
                * DVec3::new(
                    phi.cos(),
                    phi.sin() * theta.cos(),
                    phi.sin() * theta.sin(),
                )
    };

    for band in 0..step {
        for slice in 0..step {
            let a = point(band, slice);
            let b = point(band + 1, slice);
            let c = point(band + 1, slice + 1);
            let d = point(band, slice + 1);
            mesh.push_facing_out([a, b, c], center);
            mesh.push_facing_out([a, c, d], center);
        }
    }
}

/// Append a torus around the y axis through `center`, tessellated into `step` ring segments
/// and `step` tube segments.
pub fn add_torus(
    mesh: &mut TriangleMesh,
    center: DVec3,
    tube_radius: f64,
    major_radius: f64,
    step: u32,
) {
    let step = step.max(3);
    let angle = |i: u32| TAU * f64::from(i % step) / f64::from(step);
    let point = |ring: u32, tube: u32| {
        let (theta, phi) = (angle(ring), angle(tube));
        let reach = major_radius + tube_radius * phi.cos();
        center + DVec3::new(reach * theta.cos(), tube_radius * phi.sin(), -reach * theta.sin())
    };
    // Centre of the tube cross-section nearest to `p`.
    let tube_center = |p: DVec3| {
        let radial = DVec3::new(p.x - center.x, 0.0, p.z - center.z).normalize_or_zero();
        center + radial * major_radius
    };

    for ring in 0..step {
        for tube in 0..step {
            let a = point(ring, tube);
            let b = point(ring, tube + 1);
            let c = point(ring + 1, tube + 1);
            let d = point(ring + 1, tube);
            for tri in [[a, b, c], [a, c, d]] {
                let inside = tube_center((tri[0] + tri[1] + tri[2]) / 3.0);
                mesh.push_facing_out(tri, inside);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;
