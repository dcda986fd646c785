use super::*;
use crate::foundation::core::Canvas;
use crate::geometry::mesh::add_edge;

fn scene() -> SceneLighting {
    SceneLighting {
        view: DVec3::Z,
        ambient: Rgb8::new(50, 50, 50),
        lights: vec![],
        specular_exponent: 4,
    }
}

fn target(w: u32, h: u32) -> DrawTarget {
    DrawTarget::new(
        Canvas {
            width: w,
            height: h,
        },
        Rgb8::BLACK,
    )
}

fn lit_pixels(t: &DrawTarget) -> usize {
    let mut n = 0;
    for y in 0..i64::from(t.height()) {
        for x in 0..i64::from(t.width()) {
            if t.pixel(x, y) != Some(Rgb8::BLACK) {
                n += 1;
            }
        }
    }
    n
}

fn quad(z: f64, ccw: bool) -> TriangleMesh {
    let (a, b, c, d) = (
        DVec3::new(2.0, 2.0, z),
        DVec3::new(7.0, 2.0, z),
        DVec3::new(7.0, 7.0, z),
        DVec3::new(2.0, 7.0, z),
    );
    let mut m = TriangleMesh::new();
    if ccw {
        m.push_triangle([a, b, c]);
        m.push_triangle([a, c, d]);
    } else {
        m.push_triangle([a, c, b]);
        m.push_triangle([a, d, c]);
    }
    m
}

#[test]
fn front_facing_quad_fills_its_pixels() {
    let mut t = target(10, 10);
    draw_polygons(&quad(0.0, true), &mut t, &scene(), &SymbolTable::new(), None).unwrap();
    assert_eq!(lit_pixels(&t), 36);
    assert_eq!(t.pixel(2, 2), Some(Rgb8::new(10, 10, 10)));
    assert_eq!(t.pixel(7, 7), Some(Rgb8::new(10, 10, 10)));
    assert_eq!(t.pixel(8, 8), Some(Rgb8::BLACK));
}

#[test]
fn back_facing_triangles_are_culled() {
    let mut t = target(10, 10);
    draw_polygons(&quad(0.0, false), &mut t, &scene(), &SymbolTable::new(), None).unwrap();
    assert_eq!(lit_pixels(&t), 0);
}

#[test]
fn nearer_surface_wins_regardless_of_draw_order() {
    let mut symbols = SymbolTable::new();
    let mut bright = Material::NEUTRAL;
    bright.red.ambient = 1.0;
    symbols.define_material("bright", bright);

    let mut t = target(10, 10);
    draw_polygons(&quad(5.0, true), &mut t, &scene(), &symbols, Some("bright")).unwrap();
    draw_polygons(&quad(-5.0, true), &mut t, &scene(), &symbols, None).unwrap();
    assert_eq!(t.pixel(4, 4), Some(Rgb8::new(50, 10, 10)));
    assert_eq!(t.depth(4, 4), Some(5.0));
}

#[test]
fn undefined_material_is_an_error() {
    let mut t = target(4, 4);
    let err = draw_polygons(&quad(0.0, true), &mut t, &scene(), &SymbolTable::new(), Some("nope"))
        .unwrap_err();
    assert!(err.to_string().contains("undefined constants 'nope'"));
}

#[test]
fn lines_cover_both_endpoints() {
    let mut edges = EdgeList::new();
    add_edge(&mut edges, DVec3::new(0.0, 0.0, 0.0), DVec3::new(9.0, 4.0, 0.0));
    add_edge(&mut edges, DVec3::new(3.0, 9.0, 0.0), DVec3::new(3.0, 9.0, 0.0));

    let mut t = target(10, 10);
    draw_lines(&edges, &mut t, Rgb8::WHITE);
    assert_eq!(t.pixel(0, 0), Some(Rgb8::WHITE));
    assert_eq!(t.pixel(9, 4), Some(Rgb8::WHITE));
    assert_eq!(t.pixel(3, 9), Some(Rgb8::WHITE));
    // Ten pixels along x plus the single-point segment.
    assert_eq!(lit_pixels(&t), 11);
}

#[test]
fn geometry_outside_the_target_is_clipped() {
    let mut m = TriangleMesh::new();
    m.push_triangle([
        DVec3::new(-50.0, -50.0, 0.0),
        DVec3::new(100.0, -50.0, 0.0),
        DVec3::new(-50.0, 100.0, 0.0),
    ]);
    let mut t = target(5, 5);
    draw_polygons(&m, &mut t, &scene(), &SymbolTable::new(), None).unwrap();
    assert_eq!(lit_pixels(&t), 25);
}

#[test]
fn far_off_canvas_endpoints_are_clipped() {
    let mut edges = EdgeList::new();
    add_edge(&mut edges, DVec3::new(0.0, 0.0, 0.0), DVec3::new(1e12, 0.0, 0.0));
    add_edge(&mut edges, DVec3::new(-1e15, 5.0, 0.0), DVec3::new(1e15, 5.0, 0.0));
    // Entirely outside: never reaches the target.
    add_edge(&mut edges, DVec3::new(-1e12, 50.0, 0.0), DVec3::new(1e12, 50.0, 0.0));

    let mut t = target(8, 8);
    draw_lines(&edges, &mut t, Rgb8::WHITE);
    for x in 0..8 {
        assert_eq!(t.pixel(x, 0), Some(Rgb8::WHITE), "row 0, x = {x}");
        assert_eq!(t.pixel(x, 5), Some(Rgb8::WHITE), "row 5, x = {x}");
    }
    assert_eq!(lit_pixels(&t), 16);
}

#[test]
fn clipping_keeps_depth_linear() {
    let mut edges = EdgeList::new();
    add_edge(&mut edges, DVec3::new(-10.0, 2.0, -10.0), DVec3::new(10.0, 2.0, 10.0));
    let mut t = target(10, 10);
    draw_lines(&edges, &mut t, Rgb8::WHITE);
    // The segment has z == x, before and after clipping.
    for x in [0, 5, 9] {
        let z = t.depth(x, 2).unwrap();
        assert!((z - x as f64).abs() < 1e-9, "x = {x}, z = {z}");
    }
}
