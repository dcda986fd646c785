use super::*;

fn normal(tri: &[DVec3; 3]) -> DVec3 {
    (tri[1] - tri[0]).cross(tri[2] - tri[0])
}

fn centroid(tri: &[DVec3; 3]) -> DVec3 {
    (tri[0] + tri[1] + tri[2]) / 3.0
}

#[test]
fn box_has_twelve_outward_triangles() {
    let mut mesh = TriangleMesh::new();
    add_box(&mut mesh, DVec3::new(0.0, 10.0, 0.0), DVec3::new(4.0, 10.0, 6.0));
    assert_eq!(mesh.len(), 12);

    let inside = DVec3::new(2.0, 5.0, -3.0);
    for tri in mesh.triangles() {
        assert!(normal(tri).dot(centroid(tri) - inside) > 0.0);
        for p in tri {
            assert!((0.0..=4.0).contains(&p.x));
            assert!((0.0..=10.0).contains(&p.y));
            assert!((-6.0..=0.0).contains(&p.z));
        }
    }
}

#[test]
fn box_front_face_points_towards_viewer() {
    let mut mesh = TriangleMesh::new();
    add_box(&mut mesh, DVec3::ZERO, DVec3::splat(1.0));
    let front: Vec<_> = mesh
        .triangles()
        .iter()
        .filter(|t| t.iter().all(|p| p.z == 0.0))
        .collect();
    assert_eq!(front.len(), 2);
    for tri in front {
        assert!(normal(tri).z > 0.0);
    }
}

#[test]
fn sphere_vertices_lie_on_surface_and_face_out() {
    let center = DVec3::new(5.0, -3.0, 2.0);
    let mut mesh = TriangleMesh::new();
    add_sphere(&mut mesh, center, 7.0, 12);
    assert!(!mesh.is_empty());
    // One triangle per quad is degenerate at each pole.
    assert_eq!(mesh.len(), 2 * 12 * 12 - 2 * 12);

    for tri in mesh.triangles() {
        for p in tri {
            assert!(((*p - center).length() - 7.0).abs() < 1e-9);
        }
        assert!(normal(tri).dot(centroid(tri) - center) > 0.0);
    }
}

#[test]
fn torus_vertices_lie_on_tube_and_face_out() {
    let mut mesh = TriangleMesh::new();
    add_torus(&mut mesh, DVec3::ZERO, 2.0, 10.0, 16);
    assert_eq!(mesh.len(), 2 * 16 * 16);

    for tri in mesh.triangles() {
        for p in tri {
            let ring = DVec3::new(p.x, 0.0, p.z).normalize() * 10.0;
            assert!(((*p - ring).length() - 2.0).abs() < 1e-9);
        }
        let c = centroid(tri);
        let ring = DVec3::new(c.x, 0.0, c.z).normalize() * 10.0;
        assert!(normal(tri).dot(c - ring) > 0.0);
    }
}

#[test]
fn transform_and_clear_act_on_pending_geometry() {
    let mut mesh = TriangleMesh::new();
    mesh.push_triangle([DVec3::ZERO, DVec3::X, DVec3::Y]);
    mesh.transform(&DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)));
    assert_eq!(mesh.triangles()[0][0], DVec3::new(1.0, 2.0, 3.0));
    mesh.clear();
    assert!(mesh.is_empty());

    let mut edges = EdgeList::new();
    add_edge(&mut edges, DVec3::ZERO, DVec3::X);
    edges.transform(&DMat4::from_scale(DVec3::splat(3.0)));
    assert_eq!(edges.edges()[0][1], DVec3::new(3.0, 0.0, 0.0));
    assert_eq!(edges.len(), 1);
    edges.clear();
    assert!(edges.is_empty());
}
