use glam::DVec3;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{MdlError, MdlResult};
use crate::geometry::mesh::{EdgeList, TriangleMesh};
use crate::render::lighting::{SceneLighting, shade};
use crate::render::target::DrawTarget;
use crate::script::symbols::{Material, SymbolTable};

/// Screen-space area below which a projected triangle is skipped.
const MIN_SCREEN_AREA: f64 = 1e-12;

/// Rasterize every front-facing triangle of `mesh` with flat shading.
///
/// `material` names an entry of `symbols`; `None` selects the neutral material. Triangles whose
/// normal does not face `scene.view` are culled.
pub fn draw_polygons(
    mesh: &TriangleMesh,
    target: &mut DrawTarget,
    scene: &SceneLighting,
    symbols: &SymbolTable,
    material: Option<&str>,
) -> MdlResult<()> {
    let mat = symbols.material_for(material).ok_or_else(|| {
        MdlError::syntax(format!(
            "undefined constants '{}'",
            material.unwrap_or(Material::DEFAULT_NAME)
        ))
    })?;

    for tri in mesh.triangles() {
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
        if normal.dot(scene.view) <= 0.0 {
            continue;
        }
        let color = shade(normal, scene, &mat);
        fill_triangle(target, tri, color);
    }
    Ok(())
}

/// Rasterize every segment of `edges` in a single colour, depth-tested but unlit.
pub fn draw_lines(edges: &EdgeList, target: &mut DrawTarget, color: Rgb8) {
    for [from, to] in edges.edges() {
        draw_line(target, *from, *to, color);
    }
}

fn edge_fn(a: DVec3, b: DVec3, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

/// Fill pixels whose integer coordinates fall inside the xy projection of `tri`, interpolating
/// depth barycentrically.
fn fill_triangle(target: &mut DrawTarget, tri: &[DVec3; 3], color: Rgb8) {
    let [p0, p1, p2] = *tri;
    let area = edge_fn(p0, p1, p2.x, p2.y);
    if area.abs() < MIN_SCREEN_AREA || !area.is_finite() {
        return;
    }

    let max_x = f64::from(target.width()) - 1.0;
    let max_y = f64::from(target.height()) - 1.0;
    let x_lo = p0.x.min(p1.x).min(p2.x).ceil().max(0.0);
    let x_hi = p0.x.max(p1.x).max(p2.x).floor().min(max_x);
    let y_lo = p0.y.min(p1.y).min(p2.y).ceil().max(0.0);
    let y_hi = p0.y.max(p1.y).max(p2.y).floor().min(max_y);
    if x_lo > x_hi || y_lo > y_hi {
        return;
    }

    for y in (y_lo as i64)..=(y_hi as i64) {
        let py = y as f64;
        for x in (x_lo as i64)..=(x_hi as i64) {
            let px = x as f64;
            let b0 = edge_fn(p1, p2, px, py) / area;
            let b1 = edge_fn(p2, p0, px, py) / area;
            let b2 = edge_fn(p0, p1, px, py) / area;
            if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                continue;
            }
            let z = b0 * p0.z + b1 * p1.z + b2 * p2.z;
            target.plot(x, y, z, color);
        }
    }
}

/// Clip the segment to the pixel rectangle of `target`, padded by one pixel so rounding at the
/// border matches the unclipped stepping. Depth stays linear along the kept part.
fn clip_to_target(target: &DrawTarget, from: DVec3, to: DVec3) -> Option<(DVec3, DVec3)> {
    let (x_min, x_max) = (-1.0, f64::from(target.width()));
    let (y_min, y_max) = (-1.0, f64::from(target.height()));
    let d = to - from;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    // Liang-Barsky: each boundary contributes p * t <= q.
    for (p, q) in [
        (-d.x, from.x - x_min),
        (d.x, x_max - from.x),
        (-d.y, from.y - y_min),
        (d.y, y_max - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    if t0 == 0.0 && t1 == 1.0 {
        return Some((from, to));
    }
    Some((from + d * t0, from + d * t1))
}

/// Step along the major axis one pixel at a time, interpolating depth linearly.
///
/// The segment is clipped first, so the step count is bounded by the target size.
fn draw_line(target: &mut DrawTarget, from: DVec3, to: DVec3, color: Rgb8) {
    if !(from.is_finite() && to.is_finite()) {
        return;
    }
    let Some((from, to)) = clip_to_target(target, from, to) else {
        return;
    };
    let (x0, y0) = (from.x.round(), from.y.round());
    let (x1, y1) = (to.x.round(), to.y.round());
    let steps = (x1 - x0).abs().max((y1 - y0).abs());

    if steps == 0.0 {
        target.plot(x0 as i64, y0 as i64, from.z.max(to.z), color);
        return;
    }

    let n = steps as i64;
    for s in 0..=n {
        let t = s as f64 / steps;
        let x = (x0 + (x1 - x0) * t).round() as i64;
        let y = (y0 + (y1 - y0) * t).round() as i64;
        let z = from.z + (to.z - from.z) * t;
        target.plot(x, y, z, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
